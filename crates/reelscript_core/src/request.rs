//! Request and response types for chat completion.

use crate::{ApiKey, Message};
use derive_builder::Builder;
use derive_getters::Getters;

/// A single chat-completion request.
///
/// `model` and `credential` override the values the driver was built with.
///
/// # Examples
///
/// ```
/// use reelscript_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .temperature(Some(0.7_f32))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(*request.temperature(), Some(0.7_f32));
/// assert!(request.model().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Builder, Getters)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Sampling temperature, passed through unvalidated
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    max_tokens: Option<u32>,
    /// Model identifier overriding the driver default
    model: Option<String>,
    /// Credential overriding the driver default
    credential: Option<ApiKey>,
}

impl GenerateRequest {
    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// A one-turn request: `prompt` as the user message.
    pub fn from_prompt(
        prompt: impl Into<String>,
        temperature: f32,
        credential: Option<ApiKey>,
    ) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            temperature: Some(temperature),
            credential,
            ..Default::default()
        }
    }

    /// Concatenated text of every message, in order.
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content().as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenUsage {
    /// Prompt tokens consumed
    pub prompt_tokens: u64,
    /// Completion tokens generated
    pub completion_tokens: u64,
    /// Total tokens billed
    pub total_tokens: u64,
}

/// The completion returned by a chat driver.
///
/// # Examples
///
/// ```
/// use reelscript_core::GenerateResponse;
///
/// let response = GenerateResponse::text("  A title  ");
/// assert_eq!(response.trimmed(), "A title");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    /// Raw completion text as returned by the provider
    pub content: String,
    /// Model that produced the completion, when reported
    pub model: Option<String>,
    /// Token usage, when reported
    pub usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// A response carrying only text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: None,
            usage: None,
        }
    }

    /// Completion text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }
}
