//! Script generation pipeline.

use crate::{PromptTemplate, SCRIPT_PROMPT, TITLE_PROMPT, research_text};
use reelscript_core::{
    ApiKey, GenerateRequest, GeneratorConfig, ScriptRequest, ScriptResult,
};
use reelscript_error::ReelscriptResult;
use reelscript_interface::{ChatDriver, EncyclopediaLookup};
use reelscript_models::OpenAICompatibleClient;
use reelscript_research::WikipediaClient;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Stage label on errors raised while generating the title.
pub const TITLE_STAGE: &str = "title";
/// Stage label on errors raised while generating the script.
pub const SCRIPT_STAGE: &str = "script";

/// Generates a title, research text and script for a subject.
///
/// Calls run strictly in sequence: title, research, script. The generator
/// holds no mutable state, so one instance can serve concurrent callers.
///
/// # Example
///
/// ```no_run
/// use reelscript_core::{GeneratorConfig, ScriptRequest};
/// use reelscript_narrative::ScriptGenerator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = ScriptGenerator::from_config(GeneratorConfig::load()?)?;
/// let result = generator.generate(&ScriptRequest::new("sora模型")?).await?;
/// println!("{}\n\n{}", result.title(), result.script());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScriptGenerator<D, L> {
    driver: D,
    lookup: L,
    config: GeneratorConfig,
    title_template: PromptTemplate,
    script_template: PromptTemplate,
}

impl ScriptGenerator<OpenAICompatibleClient, WikipediaClient> {
    /// DeepSeek chat plus Wikipedia research, both from `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either HTTP client cannot be built.
    pub fn from_config(config: GeneratorConfig) -> ReelscriptResult<Self> {
        let driver = OpenAICompatibleClient::deepseek(&config.chat)?;
        let lookup = WikipediaClient::new(&config.research)?;
        Self::new(driver, lookup, config)
    }
}

impl<D, L> ScriptGenerator<D, L>
where
    D: ChatDriver,
    L: EncyclopediaLookup,
{
    /// Assemble a generator from its collaborators.
    ///
    /// # Errors
    ///
    /// Returns a template error if a prompt fails to parse.
    pub fn new(driver: D, lookup: L, config: GeneratorConfig) -> ReelscriptResult<Self> {
        Ok(Self {
            driver,
            lookup,
            config,
            title_template: PromptTemplate::new(TITLE_PROMPT)?,
            script_template: PromptTemplate::new(SCRIPT_PROMPT)?,
        })
    }

    /// The configuration this generator was built with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the pipeline for one request.
    ///
    /// # Errors
    ///
    /// - Configuration error if no credential is available. Nothing is sent.
    /// - Generation error (tagged `title` or `script`) if a model call fails.
    ///
    /// Research problems never fail the call; they become fallback text.
    #[instrument(
        skip(self, request),
        fields(
            subject = %request.subject(),
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
        )
    )]
    pub async fn generate(&self, request: &ScriptRequest) -> ReelscriptResult<ScriptResult> {
        let credential = self
            .config
            .resolve_credential(request.credential().as_ref())?;
        let temperature = *request.creativity();

        let title_prompt = self
            .title_template
            .render(&HashMap::from([("subject", request.subject().clone())]))?;
        let title = self
            .complete(TITLE_STAGE, title_prompt, temperature, &credential)
            .await?;
        info!(title = %title, "Generated title");

        let outcome = self.lookup.search(request.subject()).await;
        debug!(
            provider = self.lookup.provider_name(),
            outcome = outcome.category(),
            "Research finished"
        );
        let research = research_text(&outcome);

        let script_prompt = self.script_template.render(&HashMap::from([
            ("title", title.clone()),
            ("duration", request.duration_label()),
            ("word_count", request.word_count().to_string()),
            ("research", research.clone()),
        ]))?;
        let script = self
            .complete(SCRIPT_STAGE, script_prompt, temperature, &credential)
            .await?;
        info!(script_chars = script.chars().count(), "Generated script");

        Ok(ScriptResult::new(research, title, script))
    }

    async fn complete(
        &self,
        stage: &'static str,
        prompt: String,
        temperature: f32,
        credential: &ApiKey,
    ) -> ReelscriptResult<String> {
        let request = GenerateRequest::from_prompt(prompt, temperature, Some(credential.clone()));
        let response = self
            .driver
            .generate(&request)
            .await
            .map_err(|e| e.with_stage(stage))?;
        Ok(response.trimmed().to_string())
    }
}
