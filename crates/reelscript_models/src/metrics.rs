//! Metrics for chat-completion calls.
//!
//! Instruments are created on the global OpenTelemetry meter. Without an
//! installed meter provider they are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use reelscript_error::GenerationErrorKind;
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for LLM API interactions, labelled by provider and model.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Successful LLM API requests
    pub requests: Counter<u64>,
    /// Failed LLM API requests
    pub errors: Counter<u64>,
    /// LLM API call duration in seconds
    pub duration: Histogram<f64>,
    /// Total tokens used (prompt + completion)
    pub tokens_used: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("reelscript_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Successful LLM API requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed LLM API requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("s")
                .with_description("LLM API call duration")
                .build(),
            tokens_used: meter
                .u64_counter("llm.tokens")
                .with_description("Total tokens used (prompt + completion)")
                .build(),
        }
    }

    /// Get the global LLM metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful LLM API request.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed LLM API request.
    pub fn record_error(&self, provider: &str, model: &str, kind: &GenerationErrorKind) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_label(kind)),
        ];
        self.errors.add(1, labels);
    }

    /// Record token usage from a response.
    pub fn record_tokens(&self, model: &str, total_tokens: u64) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.tokens_used.add(total_tokens, labels);
    }
}

/// Metric label for an error kind.
///
/// Returns one of: "rate_limit", "auth", "network", "timeout",
/// "invalid_request", "parse", "unknown".
pub fn error_label(kind: &GenerationErrorKind) -> &'static str {
    match kind {
        GenerationErrorKind::RateLimit => "rate_limit",
        GenerationErrorKind::Unauthorized => "auth",
        GenerationErrorKind::Http(_) => "network",
        GenerationErrorKind::Timeout(_) => "timeout",
        GenerationErrorKind::ModelNotFound(_) => "invalid_request",
        GenerationErrorKind::Api { status, .. } if (400..500).contains(status) => {
            "invalid_request"
        }
        GenerationErrorKind::ResponseParsing(_) | GenerationErrorKind::EmptyResponse => "parse",
        GenerationErrorKind::Api { .. } => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_status_ranges() {
        let client_side = GenerationErrorKind::Api {
            status: 422,
            message: String::new(),
        };
        let server_side = GenerationErrorKind::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(error_label(&client_side), "invalid_request");
        assert_eq!(error_label(&server_side), "unknown");
        assert_eq!(error_label(&GenerationErrorKind::Timeout(30)), "timeout");
    }

    #[test]
    fn recording_without_provider_is_noop() {
        let metrics = LlmMetrics::get();
        metrics.record_request("deepseek", "deepseek-chat", 0.25);
        metrics.record_error("deepseek", "deepseek-chat", &GenerationErrorKind::RateLimit);
        metrics.record_tokens("deepseek-chat", 42);
    }
}
