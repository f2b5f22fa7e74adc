//! Mock encyclopedia lookup for testing.

use async_trait::async_trait;
use reelscript_core::ResearchOutcome;
use reelscript_interface::EncyclopediaLookup;
use std::sync::{Arc, Mutex};

/// Mock lookup returning a fixed outcome and recording queries.
pub struct MockLookup {
    outcome: ResearchOutcome,
    queries: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockLookup {
    /// Create a mock that always returns `outcome`.
    pub fn new(outcome: ResearchOutcome) -> Self {
        Self {
            outcome,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that finds `text`.
    pub fn found(text: impl Into<String>) -> Self {
        Self::new(ResearchOutcome::Found(text.into()))
    }

    /// Number of times search() was called.
    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Every query received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl EncyclopediaLookup for MockLookup {
    async fn search(&self, query: &str) -> ResearchOutcome {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcome.clone()
    }

    fn provider_name(&self) -> &'static str {
        "mock-lookup"
    }
}
