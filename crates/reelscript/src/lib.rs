//! Reelscript - short-video scripts from encyclopedia research
//!
//! Reelscript turns a subject into a catchy title, a research summary and a
//! structured script (【开头】/【中间】/【结尾】) sized to a target video length.
//! Titles and scripts come from an OpenAI-compatible chat model (DeepSeek by
//! default); research comes from Wikipedia.
//!
//! # Quick Start
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     reelscript::init_telemetry()?;
//!
//!     let (research, title, script) =
//!         reelscript::generate_script("sora模型", 1.0, 0.7, None).await?;
//!
//!     println!("{research}\n\n{title}\n\n{script}");
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Settings are layered from bundled defaults, `~/.config/reelscript/reelscript.toml`
//! and `./reelscript.toml`. The credential comes from the `credential`
//! argument, else `DEEPSEEK_API_KEY` (a `.env` file is honoured).
//!
//! # Architecture
//!
//! - `reelscript_error` - Error types
//! - `reelscript_core` - Data types and configuration
//! - `reelscript_interface` - `ChatDriver` and `EncyclopediaLookup` traits
//! - `reelscript_models` - OpenAI-compatible chat client
//! - `reelscript_research` - Wikipedia client
//! - `reelscript_narrative` - Prompts and the generation pipeline
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use reelscript_core::{
    ApiKey, ChatConfig, DEEPSEEK_API_KEY, GenerateRequest, GenerateRequestBuilder,
    GenerateResponse, GeneratorConfig, Message, ResearchConfig, ResearchOutcome,
    Role, ScriptRequest, ScriptRequestBuilder, ScriptResult, TokenUsage, init_telemetry,
};
pub use reelscript_error::{
    BuilderError, BuilderErrorKind, ConfigError, ConfigErrorKind, GenerationError,
    GenerationErrorKind, ReelscriptError, ReelscriptErrorKind, ReelscriptResult, RetryableError,
    TemplateError,
};
pub use reelscript_interface::{ChatDriver, EncyclopediaLookup};
pub use reelscript_models::{LlmMetrics, OpenAICompatibleClient};
pub use reelscript_narrative::{
    NETWORK_FALLBACK, NOT_FOUND_FALLBACK, PromptTemplate, SCRIPT_PROMPT, ScriptGenerator,
    TIMEOUT_FALLBACK, TITLE_PROMPT, research_text,
};
pub use reelscript_research::WikipediaClient;

use tracing::instrument;

/// Generate `(research_text, title, script)` for `subject`.
///
/// Loads configuration (see the crate docs). `DEEPSEEK_API_KEY` is only
/// consulted when `credential` is `None` or blank.
///
/// # Errors
///
/// - Builder error if `subject` is blank or `video_length` is not positive.
/// - Configuration error if no credential is available; no request is sent.
/// - Generation error if either model call fails.
#[instrument(skip(credential), fields(has_credential = credential.is_some()))]
pub async fn generate_script(
    subject: &str,
    video_length: f64,
    creativity: f32,
    credential: Option<ApiKey>,
) -> ReelscriptResult<(String, String, String)> {
    let credential = credential.filter(|key| !key.is_blank());
    let config = GeneratorConfig::load_files()?;
    let config = if credential.is_some() {
        config
    } else {
        config.with_env_credential()
    };
    generate_script_with_config(config, subject, video_length, creativity, credential).await
}

/// [`generate_script`] with an explicit configuration.
///
/// # Errors
///
/// Same as [`generate_script`].
pub async fn generate_script_with_config(
    config: GeneratorConfig,
    subject: &str,
    video_length: f64,
    creativity: f32,
    credential: Option<ApiKey>,
) -> ReelscriptResult<(String, String, String)> {
    let request = ScriptRequest::builder()
        .subject(subject)
        .video_length_minutes(video_length)
        .creativity(creativity)
        .credential(credential)
        .build()?;

    let generator = ScriptGenerator::from_config(config)?;
    Ok(generator.generate(&request).await?.into_parts())
}
