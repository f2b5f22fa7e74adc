//! Wikipedia lookup over the MediaWiki action API.

use async_trait::async_trait;
use derive_getters::Getters;
use reelscript_core::{ResearchConfig, ResearchOutcome};
use reelscript_error::{ConfigError, ConfigErrorKind, ReelscriptResult};
use reelscript_interface::EncyclopediaLookup;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Longest query forwarded to the search API.
const MAX_QUERY_CHARS: usize = 300;

const USER_AGENT: &str = concat!(
    "reelscript/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/crumplecup/reelscript)"
);

/// A `list=search` hit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct SearchHit {
    title: String,
}

/// A `prop=extracts` page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct ExtractPage {
    title: String,
    #[serde(default)]
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct ExtractEnvelope {
    #[serde(default)]
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<ExtractPage>,
}

/// Why a single API round trip produced nothing usable.
#[derive(Debug)]
enum Fetch {
    Transport(reqwest::Error),
    Decode(String),
}

impl Fetch {
    fn into_outcome(self) -> ResearchOutcome {
        match self {
            Fetch::Transport(e) if e.is_timeout() => ResearchOutcome::Timeout,
            Fetch::Transport(e) if e.is_status() => ResearchOutcome::Failed(e.to_string()),
            Fetch::Transport(e) if e.is_connect() || e.is_request() => {
                ResearchOutcome::NetworkFailure(e.to_string())
            }
            Fetch::Transport(e) => ResearchOutcome::Failed(e.to_string()),
            Fetch::Decode(msg) => ResearchOutcome::Failed(msg),
        }
    }
}

/// Render page extracts as `Page: <title>\nSummary: <extract>` blocks
/// separated by blank lines, capped at `max_chars` characters.
///
/// Pages without extract text are skipped.
///
/// # Examples
///
/// ```
/// use reelscript_research::format_pages;
///
/// let pages = vec![("Sora".to_string(), "Sora is a video model.".to_string())];
/// assert_eq!(
///     format_pages(&pages, 4000),
///     "Page: Sora\nSummary: Sora is a video model."
/// );
/// ```
pub fn format_pages(pages: &[(String, String)], max_chars: usize) -> String {
    let joined = pages
        .iter()
        .filter(|(_, extract)| !extract.trim().is_empty())
        .map(|(title, extract)| format!("Page: {}\nSummary: {}", title, extract.trim()))
        .collect::<Vec<_>>()
        .join("\n\n");
    joined.chars().take(max_chars).collect()
}

/// Wikipedia client summarising the top search hits for a query.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: Client,
    endpoint: String,
    config: ResearchConfig,
}

impl WikipediaClient {
    /// Creates a client for the configured language edition.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    #[instrument(skip(config), fields(locale = %config.locale))]
    pub fn new(config: &ResearchConfig) -> ReelscriptResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Client(e.to_string())))?;

        let endpoint = config.endpoint();
        debug!(endpoint = %endpoint, "Created Wikipedia client");

        Ok(Self {
            client,
            endpoint,
            config: config.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T, Fetch> {
        let text = self
            .client
            .get(&self.endpoint)
            .query(params)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(Fetch::Transport)?
            .text()
            .await
            .map_err(Fetch::Transport)?;

        serde_json::from_str(&text).map_err(|e| Fetch::Decode(format!("invalid response: {e}")))
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>, Fetch> {
        let params = [
            ("action", "query".to_string()),
            ("list", "search".to_string()),
            ("srsearch", query.to_string()),
            ("srlimit", self.config.top_k_results.to_string()),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
        ];
        let envelope: SearchEnvelope = self.get_json(&params).await?;
        Ok(envelope
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default())
    }

    async fn page_extract(&self, title: &str) -> Result<Option<String>, Fetch> {
        let params = [
            ("action", "query".to_string()),
            ("prop", "extracts".to_string()),
            ("explaintext", "1".to_string()),
            ("exsentences", self.config.max_sentences.to_string()),
            ("redirects", "1".to_string()),
            ("titles", title.to_string()),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
        ];
        let envelope: ExtractEnvelope = self.get_json(&params).await?;
        Ok(envelope
            .query
            .and_then(|q| q.pages.into_iter().next())
            .and_then(|page| page.extract))
    }

    async fn lookup(&self, query: &str) -> Result<String, Fetch> {
        let titles = self.search_titles(query).await?;
        debug!(hits = titles.len(), "Wikipedia search returned");

        let mut pages = Vec::with_capacity(titles.len());
        for title in titles {
            if let Some(extract) = self.page_extract(&title).await? {
                pages.push((title, extract));
            }
        }

        Ok(format_pages(&pages, self.config.max_chars))
    }
}

#[async_trait]
impl EncyclopediaLookup for WikipediaClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn search(&self, query: &str) -> ResearchOutcome {
        let query: String = query.chars().take(MAX_QUERY_CHARS).collect();

        let outcome = match self.lookup(&query).await {
            Ok(text) if text.trim().is_empty() => ResearchOutcome::NotFound,
            Ok(text) => ResearchOutcome::Found(text),
            Err(fetch) => fetch.into_outcome(),
        };

        match &outcome {
            ResearchOutcome::Found(text) => debug!(chars = text.chars().count(), "Research found"),
            other => warn!(outcome = other.category(), "Research lookup degraded"),
        }
        outcome
    }

    fn provider_name(&self) -> &'static str {
        "wikipedia"
    }
}
