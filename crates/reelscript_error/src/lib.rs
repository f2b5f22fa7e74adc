//! Error types for the Reelscript library.
//!
//! This crate provides the error types shared by every Reelscript crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use reelscript_error::{ConfigError, ConfigErrorKind, ReelscriptResult};
//!
//! fn resolve_key() -> ReelscriptResult<String> {
//!     Err(ConfigError::new(ConfigErrorKind::MissingCredential {
//!         env_var: "DEEPSEEK_API_KEY".to_string(),
//!     }))?
//! }
//!
//! assert!(resolve_key().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod generation;
mod template;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{ReelscriptError, ReelscriptErrorKind, ReelscriptResult};
pub use generation::{GenerationError, GenerationErrorKind, RetryableError, truncate_detail};
pub use template::TemplateError;
