//! Encyclopedia lookup providers for Reelscript.
//!
//! [`WikipediaClient`] summarises the top search hits for a query using the
//! MediaWiki action API. Lookups never fail: every problem is reported as a
//! [`ResearchOutcome`](reelscript_core::ResearchOutcome) variant.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod wikipedia;

pub use wikipedia::{ExtractPage, SearchHit, WikipediaClient, format_pages};
