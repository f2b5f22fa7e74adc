//! Chat-completion error types and retry classification.

/// Chat-completion failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Transport-level failure (connection refused, DNS, TLS)
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// The provider did not answer within the configured timeout
    #[display("Request timed out after {} seconds", _0)]
    Timeout(u64),
    /// Non-success status returned by the provider
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        message: String,
    },
    /// Provider rejected the request because of rate limiting
    #[display("Rate limit exceeded")]
    RateLimit,
    /// Provider rejected the credential
    #[display("Credential rejected by provider")]
    Unauthorized,
    /// Requested model does not exist
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),
    /// Response decoded but carried no completion text
    #[display("Provider returned no completion text")]
    EmptyResponse,
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::Http(_) => true,
            GenerationErrorKind::Timeout(_) => true,
            GenerationErrorKind::RateLimit => true,
            GenerationErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Chat-completion error with source location tracking.
///
/// # Examples
///
/// ```
/// use reelscript_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::RateLimit).with_stage("title");
/// assert!(format!("{}", err).contains("title"));
/// assert!(format!("{}", err).contains("Rate limit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Generation Error ({}): {} at line {} in {}",
    stage.unwrap_or("request"),
    kind,
    line,
    file
)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Pipeline stage that issued the failing request, if known
    pub stage: Option<&'static str>,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            stage: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Tag the error with the pipeline stage that produced it.
    pub fn with_stage(mut self, stage: &'static str) -> Self {
        self.stage = Some(stage);
        self
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use reelscript_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::Api {
///     status: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = GenerationError::new(GenerationErrorKind::Unauthorized);
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503, 429 or network timeouts return true.
    /// Permanent errors like 401 or 400 return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Cut provider-supplied detail down to `max_chars` characters.
///
/// Upstream error bodies can echo request headers or internal traces, so
/// only a short prefix is ever embedded in an error or user-facing text.
/// A `...` marker is appended when anything was removed.
///
/// # Examples
///
/// ```
/// use reelscript_error::truncate_detail;
///
/// assert_eq!(truncate_detail("short", 10), "short");
/// assert_eq!(truncate_detail("维基百科搜索异常", 4), "维基百科...");
/// ```
pub fn truncate_detail(detail: &str, max_chars: usize) -> String {
    let mut chars = detail.chars();
    let prefix: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
