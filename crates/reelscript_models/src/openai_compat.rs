//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use reelscript_core::{ApiKey, ChatConfig, GenerateRequest, GenerateResponse, Message, TokenUsage};
use reelscript_error::{
    ConfigError, ConfigErrorKind, GenerationError, GenerationErrorKind, ReelscriptResult,
    RetryableError, truncate_detail,
};
use reelscript_interface::ChatDriver;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio_retry2::{
    Retry, RetryError,
    strategy::{ExponentialBackoff, jitter},
};
use tracing::{debug, error, instrument, warn};

use crate::LlmMetrics;

/// Characters of an upstream error body kept in [`GenerationErrorKind::Api`].
const ERROR_BODY_CHARS: usize = 100;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// Body of `POST {base_url}/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation so far
    pub messages: Vec<Message>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Completion token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Always false, streaming is not used
    pub stream: bool,
}

/// Decoded chat-completions response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

/// One completion candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatChoice {
    /// Completion text, if the provider sent any.
    pub fn content(&self) -> Option<&str> {
        self.message.content.as_deref()
    }
}

/// Token usage block.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

impl From<ChatUsage> for TokenUsage {
    fn from(usage: ChatUsage) -> Self {
        TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

impl ChatCompletionResponse {
    /// Parse a raw response body into a [`GenerateResponse`].
    ///
    /// The completion is `choices[0].message.content`. A body without it is
    /// [`GenerationErrorKind::EmptyResponse`].
    ///
    /// # Examples
    ///
    /// ```
    /// use reelscript_models::ChatCompletionResponse;
    ///
    /// let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Hi"}}]}"#;
    /// let response = ChatCompletionResponse::parse(body).unwrap();
    /// assert_eq!(response.content, "Hi");
    /// ```
    pub fn parse(body: &str) -> Result<GenerateResponse, GenerationError> {
        let decoded: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
            GenerationError::new(GenerationErrorKind::ResponseParsing(truncate_detail(
                &e.to_string(),
                ERROR_BODY_CHARS,
            )))
        })?;

        let content = decoded
            .choices
            .first()
            .and_then(ChatChoice::content)
            .map(str::to_string)
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        Ok(GenerateResponse {
            content,
            model: decoded.model,
            usage: decoded.usage.map(TokenUsage::from),
        })
    }
}

/// Map a non-success status to an error kind.
fn status_error(status: StatusCode, body: &str, model: &str) -> GenerationErrorKind {
    match status.as_u16() {
        401 | 403 => GenerationErrorKind::Unauthorized,
        404 => GenerationErrorKind::ModelNotFound(model.to_string()),
        429 => GenerationErrorKind::RateLimit,
        code => GenerationErrorKind::Api {
            status: code,
            message: truncate_detail(body.trim(), ERROR_BODY_CHARS),
        },
    }
}

/// Client for any endpoint speaking the OpenAI chat-completions protocol.
///
/// Defaults target DeepSeek (`deepseek-chat` at `https://api.deepseek.com/v1`).
/// Transient failures (timeouts, connection errors, 408, 429 and 5xx) are
/// retried up to `max_retries` times with jittered exponential backoff.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: Option<ApiKey>,
    provider: &'static str,
    model: String,
    url: String,
    timeout_secs: u64,
    max_retries: usize,
    retry_backoff_ms: u64,
    max_tokens: Option<u32>,
}

impl OpenAICompatibleClient {
    /// Creates a client for `provider` from endpoint settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    #[instrument(skip(config), fields(model = %config.model))]
    pub fn new(provider: &'static str, config: &ChatConfig) -> ReelscriptResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Client(e.to_string())))?;

        debug!(url = %config.completions_url(), "Created chat-completions client");

        Ok(Self {
            client,
            api_key: None,
            provider,
            model: config.model.clone(),
            url: config.completions_url(),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
            max_tokens: config.max_tokens,
        })
    }

    /// Creates a DeepSeek client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn deepseek(config: &ChatConfig) -> ReelscriptResult<Self> {
        Self::new("deepseek", config)
    }

    /// Sets the credential used when a request carries none.
    pub fn with_api_key(mut self, key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Send one user prompt and return the trimmed completion text.
    ///
    /// Model, endpoint, timeout and retry count come from the [`ChatConfig`]
    /// the client was built with.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no credential is available, or a
    /// generation error if the provider call fails.
    pub async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        credential: Option<&ApiKey>,
    ) -> ReelscriptResult<String> {
        let request = GenerateRequest::from_prompt(prompt, temperature, credential.cloned());
        let response = self.generate(&request).await?;
        Ok(response.trimmed().to_string())
    }

    /// Build the wire body for a request.
    pub fn to_wire(&self, req: &GenerateRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: req.model().clone().unwrap_or_else(|| self.model.clone()),
            messages: req.messages().clone(),
            temperature: *req.temperature(),
            max_tokens: req.max_tokens().or(self.max_tokens),
            stream: false,
        }
    }

    fn map_transport(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::new(GenerationErrorKind::Timeout(self.timeout_secs))
        } else {
            GenerationError::new(GenerationErrorKind::Http(truncate_detail(
                &e.to_string(),
                ERROR_BODY_CHARS,
            )))
        }
    }

    /// One HTTP round trip, no retries.
    async fn send_once(
        &self,
        body: &ChatCompletionRequest,
        key: &ApiKey,
    ) -> Result<GenerateResponse, GenerationError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(key.expose())
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            error!(status = %status, "Chat-completions API returned error");
            return Err(GenerationError::new(status_error(status, &text, &body.model)));
        }

        debug!(response_len = text.len(), "Received chat completion");
        ChatCompletionResponse::parse(&text)
    }
}

#[async_trait]
impl ChatDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = self.provider, model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> ReelscriptResult<GenerateResponse> {
        let key = req
            .credential()
            .as_ref()
            .filter(|key| !key.is_blank())
            .or(self.api_key.as_ref().filter(|key| !key.is_blank()))
            .ok_or_else(|| ConfigError::missing_credential(reelscript_core::DEEPSEEK_API_KEY))?;

        let body = self.to_wire(req);
        let metrics = LlmMetrics::get();
        let started = Instant::now();

        let strategy = ExponentialBackoff::from_millis(self.retry_backoff_ms.max(1))
            .factor(2)
            .max_delay(MAX_RETRY_DELAY)
            .map(jitter)
            .take(self.max_retries);

        let wire = &body;
        let result = Retry::spawn(strategy, move || async move {
            match self.send_once(wire, key).await {
                Ok(response) => Ok(response),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e.kind, "Transient chat-completions failure, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        })
        .await;

        match result {
            Ok(response) => {
                metrics.record_request(
                    self.provider,
                    &body.model,
                    started.elapsed().as_secs_f64(),
                );
                if let Some(usage) = response.usage {
                    metrics.record_tokens(&body.model, usage.total_tokens);
                }
                Ok(response)
            }
            Err(e) => {
                metrics.record_error(self.provider, &body.model, &e.kind);
                Err(e.into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_completion_with_usage() {
        let body = r#"{
            "id": "chatcmpl-1",
            "model": "deepseek-chat",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "炸了！Sora居然能做电影？"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        }"#;

        let response = ChatCompletionResponse::parse(body).unwrap();
        assert_eq!(response.content, "炸了！Sora居然能做电影？");
        assert_eq!(response.model.as_deref(), Some("deepseek-chat"));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(20));
    }

    #[test]
    fn missing_choices_is_empty_response() {
        let err = ChatCompletionResponse::parse(r#"{"choices": []}"#).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::EmptyResponse);

        let err = ChatCompletionResponse::parse(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::EmptyResponse);
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let err = ChatCompletionResponse::parse("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::ResponseParsing(_)));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, "", "m"),
            GenerationErrorKind::Unauthorized
        );
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, "", "deepseek-chat"),
            GenerationErrorKind::ModelNotFound("deepseek-chat".to_string())
        );
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "", "m"),
            GenerationErrorKind::RateLimit
        );
        assert!(status_error(StatusCode::SERVICE_UNAVAILABLE, "busy", "m").is_retryable());
        assert!(!status_error(StatusCode::BAD_REQUEST, "bad", "m").is_retryable());
    }

    #[test]
    fn error_body_is_truncated() {
        let body = "x".repeat(500);
        match status_error(StatusCode::INTERNAL_SERVER_ERROR, &body, "m") {
            GenerationErrorKind::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message.chars().count(), ERROR_BODY_CHARS + 3);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn wire_body_prefers_request_overrides() {
        let config = ChatConfig {
            max_tokens: Some(512),
            ..Default::default()
        };
        let client = OpenAICompatibleClient::deepseek(&config).unwrap();

        let plain = GenerateRequest::from_prompt("hi", 0.7, None);
        let wire = client.to_wire(&plain);
        assert_eq!(wire.model, "deepseek-chat");
        assert_eq!(wire.max_tokens, Some(512));
        assert_eq!(wire.temperature, Some(0.7));
        assert!(!wire.stream);

        let overridden = GenerateRequest::builder()
            .messages(vec![Message::user("hi")])
            .model(Some("deepseek-reasoner".to_string()))
            .max_tokens(Some(64_u32))
            .build()
            .unwrap();
        let wire = client.to_wire(&overridden);
        assert_eq!(wire.model, "deepseek-reasoner");
        assert_eq!(wire.max_tokens, Some(64));
        assert!(wire.temperature.is_none());
    }

    #[test]
    fn wire_body_serialises_openai_shape() {
        let client = OpenAICompatibleClient::deepseek(&ChatConfig::default()).unwrap();
        let wire = client.to_wire(&GenerateRequest::from_prompt("你好", 1.0, None));
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "你好");
        assert!(json.get("max_tokens").is_none());
    }
}
