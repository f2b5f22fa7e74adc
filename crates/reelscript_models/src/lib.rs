//! Chat-completion provider integrations for Reelscript.
//!
//! The only wire protocol spoken here is the OpenAI chat-completions API,
//! which DeepSeek implements. Point [`ChatConfig`](reelscript_core::ChatConfig)
//! at another compatible endpoint to use a different provider.
//!
//! # Example
//!
//! ```no_run
//! use reelscript_core::{ApiKey, ChatConfig, GenerateRequest};
//! use reelscript_interface::ChatDriver;
//! use reelscript_models::OpenAICompatibleClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAICompatibleClient::deepseek(&ChatConfig::default())?
//!     .with_api_key(ApiKey::new("sk-..."));
//! let request = GenerateRequest::from_prompt("Say hello", 0.7, None);
//! let response = client.generate(&request).await?;
//! println!("{}", response.trimmed());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod metrics;
mod openai_compat;

pub use metrics::{LlmMetrics, error_label};
pub use openai_compat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatUsage, OpenAICompatibleClient,
};
