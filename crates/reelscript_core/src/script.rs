//! Script generation request and result.

use crate::ApiKey;
use derive_builder::Builder;
use derive_getters::Getters;
use reelscript_error::{BuilderError, ReelscriptResult};

/// Spoken words per minute assumed when sizing a script.
pub(crate) const WORDS_PER_MINUTE: f64 = 200.0;

/// Everything needed to generate one video script.
///
/// Built through [`ScriptRequestBuilder`], which rejects blank subjects and
/// non-positive or non-finite lengths. `creativity` is passed to the model as
/// its sampling temperature without range checks.
///
/// # Examples
///
/// ```
/// use reelscript_core::ScriptRequest;
///
/// let request = ScriptRequest::builder()
///     .subject("sora模型")
///     .video_length_minutes(2.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.word_count(), 500);
/// assert_eq!(*request.creativity(), 0.7);
/// assert!(request.credential().is_none());
///
/// assert!(ScriptRequest::builder().subject("  ").build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Getters)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "BuilderError"))]
pub struct ScriptRequest {
    /// Topic of the video
    subject: String,
    /// Target video length in minutes
    #[builder(default = "1.0")]
    video_length_minutes: f64,
    /// Sampling temperature for both model calls
    #[builder(default = "0.7")]
    creativity: f32,
    /// Explicit credential, taking precedence over configuration
    #[builder(default)]
    credential: Option<ApiKey>,
}

impl ScriptRequestBuilder {
    fn validate(&self) -> Result<(), BuilderError> {
        if let Some(subject) = &self.subject {
            if subject.trim().is_empty() {
                return Err(BuilderError::invalid_field("subject", "must not be blank"));
            }
        }
        if let Some(minutes) = self.video_length_minutes {
            if !(minutes.is_finite() && minutes > 0.0) {
                return Err(BuilderError::invalid_field(
                    "video_length_minutes",
                    format!("must be a positive number, got {}", minutes),
                ));
            }
        }
        Ok(())
    }
}

impl ScriptRequest {
    /// Creates a new builder for `ScriptRequest`.
    pub fn builder() -> ScriptRequestBuilder {
        ScriptRequestBuilder::default()
    }

    /// A request for `subject` with default length and creativity.
    ///
    /// # Errors
    ///
    /// Returns a builder error if `subject` is blank.
    pub fn new(subject: impl Into<String>) -> ReelscriptResult<Self> {
        Ok(Self::builder().subject(subject).build()?)
    }

    /// Advisory target length: `round(minutes * 200)`.
    pub fn word_count(&self) -> u32 {
        (self.video_length_minutes * WORDS_PER_MINUTE).round() as u32
    }

    /// Video length as shown in the prompt; whole numbers keep one decimal.
    pub fn duration_label(&self) -> String {
        if self.video_length_minutes.fract() == 0.0 {
            format!("{:.1}", self.video_length_minutes)
        } else {
            self.video_length_minutes.to_string()
        }
    }
}

/// The three generated strings, always populated together.
///
/// # Examples
///
/// ```
/// use reelscript_core::ScriptResult;
///
/// let result = ScriptResult::new("facts", "title", "script");
/// let (research, title, script) = result.into_parts();
/// assert_eq!((research.as_str(), title.as_str(), script.as_str()), ("facts", "title", "script"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ScriptResult {
    /// Research summary or fallback text used as grounding
    research_text: String,
    /// Generated video title
    title: String,
    /// Generated script with opening, middle and closing sections
    script: String,
}

impl ScriptResult {
    /// Assemble a result.
    pub fn new(
        research_text: impl Into<String>,
        title: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            research_text: research_text.into(),
            title: title.into(),
            script: script.into(),
        }
    }

    /// `(research_text, title, script)`.
    pub fn into_parts(self) -> (String, String, String) {
        (self.research_text, self.title, self.script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelscript_error::BuilderErrorKind;

    #[test]
    fn word_count_rounds() {
        let cases = [(1.0, 200), (2.5, 500), (0.5, 100), (0.333, 67)];
        for (minutes, expected) in cases {
            let request = ScriptRequest::builder()
                .subject("topic")
                .video_length_minutes(minutes)
                .build()
                .unwrap();
            assert_eq!(request.word_count(), expected, "minutes = {minutes}");
        }
    }

    #[test]
    fn duration_label_keeps_decimal_for_whole_minutes() {
        let whole = ScriptRequest::new("topic").unwrap();
        assert_eq!(whole.duration_label(), "1.0");

        let fractional = ScriptRequest::builder()
            .subject("topic")
            .video_length_minutes(2.5)
            .build()
            .unwrap();
        assert_eq!(fractional.duration_label(), "2.5");
    }

    #[test]
    fn rejects_bad_lengths() {
        for minutes in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = ScriptRequest::builder()
                .subject("topic")
                .video_length_minutes(minutes)
                .build()
                .unwrap_err();
            assert!(
                matches!(
                    err.kind(),
                    BuilderErrorKind::InvalidField { field, .. } if field == "video_length_minutes"
                ),
                "minutes = {minutes}: {err}"
            );
        }
    }

    #[test]
    fn blank_subject_names_the_field() {
        let err = ScriptRequest::builder().subject(" \t").build().unwrap_err();
        assert!(matches!(
            err.kind(),
            BuilderErrorKind::InvalidField { field, .. } if field == "subject"
        ));
    }

    #[test]
    fn missing_subject_is_missing_field() {
        let err = ScriptRequest::builder().build().unwrap_err();
        assert!(matches!(err.kind(), BuilderErrorKind::MissingField(f) if f == "subject"));
    }

    #[test]
    fn creativity_is_not_range_checked() {
        let request = ScriptRequest::builder()
            .subject("topic")
            .creativity(3.0_f32)
            .build()
            .unwrap();
        assert_eq!(*request.creativity(), 3.0);
    }
}
