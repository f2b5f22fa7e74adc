//! Prompt template errors.

/// A template could not be rendered.
///
/// # Examples
///
/// ```
/// use reelscript_error::TemplateError;
///
/// let err = TemplateError::missing_variable("subject");
/// assert!(format!("{}", err).contains("subject"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Template Error: {} at line {} in {}", message, line, file)]
pub struct TemplateError {
    /// What went wrong
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new TemplateError at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// A placeholder had no value supplied.
    #[track_caller]
    pub fn missing_variable(name: &str) -> Self {
        Self::new(format!("No value supplied for template variable '{{{}}}'", name))
    }
}
