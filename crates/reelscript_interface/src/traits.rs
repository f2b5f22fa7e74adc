//! Trait definitions for the external providers.

use async_trait::async_trait;
use reelscript_core::{GenerateRequest, GenerateResponse, ResearchOutcome};
use reelscript_error::ReelscriptResult;

/// Chat-completion backend.
///
/// One request in, one completion out. Retries and timeouts are the
/// implementation's business; callers see only the final outcome.
#[async_trait]
pub trait ChatDriver: Send + Sync {
    /// Generate a completion for the request.
    async fn generate(&self, req: &GenerateRequest) -> ReelscriptResult<GenerateResponse>;

    /// Provider name (e.g., "deepseek").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier (e.g., "deepseek-chat").
    fn model_name(&self) -> &str;
}

/// Encyclopedia backend used for research.
///
/// Never fails: every failure mode is reported as a [`ResearchOutcome`]
/// variant.
#[async_trait]
pub trait EncyclopediaLookup: Send + Sync {
    /// Summarise what the encyclopedia knows about `query`.
    async fn search(&self, query: &str) -> ResearchOutcome;

    /// Provider name (e.g., "wikipedia").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: ChatDriver + ?Sized> ChatDriver for std::sync::Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> ReelscriptResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: EncyclopediaLookup + ?Sized> EncyclopediaLookup for std::sync::Arc<T> {
    async fn search(&self, query: &str) -> ResearchOutcome {
        (**self).search(query).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
