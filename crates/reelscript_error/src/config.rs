//! Configuration error types.

/// Configuration failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// No credential was passed and none was configured
    #[display(
        "No API key available: set the {} environment variable or pass a credential explicitly",
        env_var
    )]
    MissingCredential {
        /// Environment variable consulted when loading configuration
        env_var: String,
    },
    /// Configuration sources could not be read or merged
    #[display("Failed to build configuration: {}", _0)]
    Load(String),
    /// Configuration was read but did not match the expected shape
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// HTTP client could not be constructed from the configuration
    #[display("Failed to create HTTP client: {}", _0)]
    Client(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use reelscript_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::MissingCredential {
///     env_var: "DEEPSEEK_API_KEY".to_string(),
/// });
/// assert!(format!("{}", err).contains("DEEPSEEK_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of configuration failure
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a missing credential error.
    #[track_caller]
    pub fn missing_credential(env_var: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::MissingCredential {
            env_var: env_var.into(),
        })
    }
}
