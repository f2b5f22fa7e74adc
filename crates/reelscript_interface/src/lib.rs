//! Trait definitions for the Reelscript providers.
//!
//! The script generator talks to two external services, each behind a trait
//! so tests and alternative backends can stand in for the real clients.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ChatDriver, EncyclopediaLookup};
