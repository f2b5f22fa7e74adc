//! Outcome of an encyclopedia lookup.

/// What the encyclopedia provider produced for a query.
///
/// Lookups never raise; every failure mode is a variant here so callers
/// must handle each one explicitly.
///
/// # Examples
///
/// ```
/// use reelscript_core::ResearchOutcome;
///
/// let outcome = ResearchOutcome::Timeout;
/// assert_eq!(outcome.category(), "timeout");
/// assert!(outcome.usable_text().is_none());
///
/// let outcome = ResearchOutcome::Found("Sora is a video model.".into());
/// assert_eq!(outcome.usable_text(), Some("Sora is a video model."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ResearchOutcome {
    /// Summary text returned by the provider
    Found(String),
    /// The provider had nothing for the query
    NotFound,
    /// The provider could not be reached
    NetworkFailure(String),
    /// The provider did not answer in time
    Timeout,
    /// Any other failure, with its description
    Failed(String),
}

impl ResearchOutcome {
    /// Short label for logs and metrics.
    pub fn category(&self) -> &'static str {
        self.into()
    }

    /// The summary, if there is one with visible content.
    pub fn usable_text(&self) -> Option<&str> {
        match self {
            ResearchOutcome::Found(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_summaries_are_not_usable() {
        assert!(ResearchOutcome::Found("  \n ".into()).usable_text().is_none());
        assert_eq!(ResearchOutcome::Found(" \n".into()).category(), "found");
    }

    #[test]
    fn categories_are_snake_case() {
        assert_eq!(ResearchOutcome::NotFound.category(), "not_found");
        assert_eq!(
            ResearchOutcome::NetworkFailure("refused".into()).category(),
            "network_failure"
        );
        assert_eq!(ResearchOutcome::Failed("boom".into()).category(), "failed");
    }
}
