//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, TemplateError};

/// Every failure a Reelscript operation can surface.
///
/// # Examples
///
/// ```
/// use reelscript_error::{GenerationError, GenerationErrorKind, ReelscriptError};
///
/// let err: ReelscriptError = GenerationError::new(GenerationErrorKind::EmptyResponse).into();
/// assert!(format!("{}", err).contains("Generation Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelscriptErrorKind {
    /// Missing credential or unreadable configuration
    #[from(ConfigError)]
    Config(ConfigError),
    /// Chat-completion provider failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Prompt template rendering failure
    #[from(TemplateError)]
    Template(TemplateError),
    /// Invalid request
    #[from(BuilderError)]
    Builder(BuilderError),
}

/// Reelscript error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reelscript_error::{ConfigError, ReelscriptErrorKind, ReelscriptResult};
///
/// fn might_fail() -> ReelscriptResult<()> {
///     Err(ConfigError::missing_credential("DEEPSEEK_API_KEY"))?
/// }
///
/// match might_fail() {
///     Err(e) => assert!(matches!(e.kind(), ReelscriptErrorKind::Config(_))),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelscript Error: {}", _0)]
pub struct ReelscriptError(Box<ReelscriptErrorKind>);

impl ReelscriptError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelscriptErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelscriptErrorKind {
        &self.0
    }

    /// True when the failure is a configuration problem.
    pub fn is_config(&self) -> bool {
        matches!(self.kind(), ReelscriptErrorKind::Config(_))
    }

    /// True when the failure came from the chat-completion provider.
    pub fn is_generation(&self) -> bool {
        matches!(self.kind(), ReelscriptErrorKind::Generation(_))
    }

    /// Tag a generation error with the pipeline stage that raised it.
    ///
    /// Other kinds pass through unchanged.
    pub fn with_stage(mut self, stage: &'static str) -> Self {
        if let ReelscriptErrorKind::Generation(err) = self.0.as_mut() {
            err.stage = Some(stage);
        }
        self
    }
}

// Generic From implementation for any type that converts to ReelscriptErrorKind
impl<T> From<T> for ReelscriptError
where
    T: Into<ReelscriptErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Reelscript operations.
pub type ReelscriptResult<T> = std::result::Result<T, ReelscriptError>;
