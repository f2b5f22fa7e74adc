//! Request validation errors.

/// Why a request could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// A field was set to a value the request cannot use
    #[display("Invalid value for '{}': {}", field, reason)]
    InvalidField {
        /// The offending field
        field: String,
        /// What is wrong with the value
        reason: String,
    },
}

/// Request validation error with location tracking.
///
/// Returned directly by request builders, so a failed `build()` already
/// names the field at fault.
///
/// # Examples
///
/// ```
/// use reelscript_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::invalid_field("subject", "must not be blank");
/// assert!(matches!(err.kind(), BuilderErrorKind::InvalidField { field, .. } if field == "subject"));
/// assert!(err.to_string().contains("must not be blank"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A field holds an unusable value.
    #[track_caller]
    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        Self::new(BuilderErrorKind::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    #[track_caller]
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::new(BuilderErrorKind::MissingField(err.field_name().to_string()))
    }
}
