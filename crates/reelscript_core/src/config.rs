//! Generator configuration.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from reelscript.toml)
//! - User overrides (~/.config/reelscript/reelscript.toml, then ./reelscript.toml)
//!
//! The credential never comes from these files. [`GeneratorConfig::load`]
//! reads `DEEPSEEK_API_KEY` once (after loading an optional `.env`) and keeps
//! it on the returned value; nothing reads the environment afterwards.

use crate::ApiKey;
use config::{Config, File, FileFormat};
use reelscript_error::{ConfigError, ConfigErrorKind, ReelscriptResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the DeepSeek credential.
pub const DEEPSEEK_API_KEY: &str = "DEEPSEEK_API_KEY";

const DEFAULT_CONFIG: &str = include_str!("../reelscript.toml");

/// Chat-completion endpoint settings.
///
/// ```toml
/// [chat]
/// base_url = "https://api.deepseek.com/v1"
/// model = "deepseek-chat"
/// timeout_secs = 30
/// max_retries = 2
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Base URL of the OpenAI-compatible API, without `/chat/completions`
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after the first attempt for transient failures
    pub max_retries: usize,
    /// Initial retry backoff in milliseconds
    pub retry_backoff_ms: u64,
    /// Completion token cap, provider default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
            timeout_secs: 30,
            max_retries: 2,
            retry_backoff_ms: 500,
            max_tokens: None,
        }
    }
}

impl ChatConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Encyclopedia lookup settings.
///
/// ```toml
/// [research]
/// locale = "zh"
/// timeout_secs = 15
/// max_sentences = 10
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// MediaWiki API endpoint; derived from `locale` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Wikipedia language edition
    pub locale: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Sentences kept from each page extract
    pub max_sentences: u32,
    /// Search hits summarised
    pub top_k_results: u32,
    /// Character cap on the combined summary
    pub max_chars: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            locale: "zh".to_string(),
            timeout_secs: 15,
            max_sentences: 10,
            top_k_results: 3,
            max_chars: 4000,
        }
    }
}

impl ResearchConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// MediaWiki action API URL.
    pub fn endpoint(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/w/api.php", self.locale))
    }
}

/// Top-level configuration handed to the script generator.
///
/// # Example
///
/// ```
/// use reelscript_core::{ApiKey, GeneratorConfig};
///
/// let config = GeneratorConfig::default().with_api_key(ApiKey::new("sk-test"));
/// assert_eq!(config.chat.model, "deepseek-chat");
/// assert_eq!(config.research.endpoint(), "https://zh.wikipedia.org/w/api.php");
/// assert!(config.resolve_credential(None).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Chat-completion settings
    #[serde(default)]
    pub chat: ChatConfig,
    /// Encyclopedia settings
    #[serde(default)]
    pub research: ResearchConfig,
    /// Credential used when a request does not carry one
    #[serde(skip)]
    pub api_key: Option<ApiKey>,
}

impl GeneratorConfig {
    /// Bundled defaults only, without touching the filesystem or environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse.
    pub fn bundled() -> ReelscriptResult<Self> {
        Self::build(
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
        )
    }

    /// Bundled defaults overridden by a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ReelscriptResult<Self> {
        debug!("Loading configuration from file");

        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence: current dir > home dir > bundled
    /// defaults, then pick up `DEEPSEEK_API_KEY`.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present config file cannot be parsed.
    pub fn load() -> ReelscriptResult<Self> {
        Ok(Self::load_files()?.with_env_credential())
    }

    /// Like [`load`](Self::load) but leaves the credential unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a present config file cannot be parsed.
    #[instrument]
    pub fn load_files() -> ReelscriptResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/reelscript/reelscript.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("reelscript").required(false));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ReelscriptResult<Self> {
        let config = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        Ok(config)
    }

    /// Set the fallback credential explicitly.
    pub fn with_api_key(mut self, key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Read `DEEPSEEK_API_KEY` (after an optional `.env`) into the config.
    ///
    /// An explicitly set key is kept; blank values count as absent.
    pub fn with_env_credential(mut self) -> Self {
        if self.api_key.is_none() {
            if let Err(e) = dotenvy::dotenv() {
                debug!(error = %e, "No .env file loaded");
            }
            self.api_key = std::env::var(DEEPSEEK_API_KEY)
                .ok()
                .and_then(ApiKey::non_empty);
            debug!(
                found = self.api_key.is_some(),
                "Resolved {} from environment", DEEPSEEK_API_KEY
            );
        }
        self
    }

    /// Pick the credential for one call: the explicit one, else the
    /// configured one. Blank keys count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigErrorKind::MissingCredential`] if neither is usable.
    pub fn resolve_credential(&self, explicit: Option<&ApiKey>) -> ReelscriptResult<ApiKey> {
        explicit
            .filter(|key| !key.is_blank())
            .or(self.api_key.as_ref().filter(|key| !key.is_blank()))
            .cloned()
            .ok_or_else(|| ConfigError::missing_credential(DEEPSEEK_API_KEY).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_matches_defaults() {
        let bundled = GeneratorConfig::bundled().unwrap();
        assert_eq!(bundled, GeneratorConfig::default());
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let chat = ChatConfig {
            base_url: "https://api.deepseek.com/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(chat.completions_url(), "https://api.deepseek.com/v1/chat/completions");
    }

    #[test]
    fn research_endpoint_follows_locale() {
        let research = ResearchConfig {
            locale: "en".to_string(),
            ..Default::default()
        };
        assert_eq!(research.endpoint(), "https://en.wikipedia.org/w/api.php");

        let pinned = ResearchConfig {
            base_url: Some("http://localhost:8080/w/api.php".to_string()),
            ..Default::default()
        };
        assert_eq!(pinned.endpoint(), "http://localhost:8080/w/api.php");
    }

    #[test]
    fn explicit_credential_wins() {
        let config = GeneratorConfig::default().with_api_key("from-config");
        let explicit = ApiKey::new("explicit");
        let key = config.resolve_credential(Some(&explicit)).unwrap();
        assert_eq!(key.expose(), "explicit");
        assert_eq!(config.resolve_credential(None).unwrap().expose(), "from-config");
    }

    #[test]
    fn blank_credentials_are_absent() {
        let config = GeneratorConfig::default().with_api_key("from-config");
        let blank = ApiKey::new("");
        let key = config.resolve_credential(Some(&blank)).unwrap();
        assert_eq!(key.expose(), "from-config");

        let err = GeneratorConfig::default()
            .with_api_key("  ")
            .resolve_credential(Some(&blank))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn missing_credential_is_config_error() {
        let err = GeneratorConfig::default().resolve_credential(None).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(DEEPSEEK_API_KEY));
    }
}
