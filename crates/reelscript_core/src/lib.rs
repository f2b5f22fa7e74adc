//! Core data types for the Reelscript script generator.
//!
//! This crate provides the request/response types exchanged with the chat
//! provider, the script request and result types, the research outcome
//! discriminant, configuration loading and telemetry setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credential;
mod message;
mod request;
mod research;
mod script;
mod telemetry;

pub use config::{ChatConfig, DEEPSEEK_API_KEY, GeneratorConfig, ResearchConfig};
pub use credential::ApiKey;
pub use message::{Message, Role};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, TokenUsage};
pub use research::ResearchOutcome;
pub use script::{ScriptRequest, ScriptRequestBuilder, ScriptResult};
pub use telemetry::init_telemetry;
