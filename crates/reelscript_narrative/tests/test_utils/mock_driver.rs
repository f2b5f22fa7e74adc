//! Mock chat driver for testing.

use async_trait::async_trait;
use reelscript_core::{GenerateRequest, GenerateResponse};
use reelscript_error::{GenerationError, GenerationErrorKind, ReelscriptResult};
use reelscript_interface::ChatDriver;
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(GenerationErrorKind),
    /// Return a sequence of responses (errors or success)
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(GenerationErrorKind),
}

/// Mock chat driver recording every request it receives.
pub struct MockChatDriver {
    behavior: MockBehavior,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

#[allow(dead_code)]
impl MockChatDriver {
    /// Create a mock that always succeeds with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Create a mock that always fails with the given error.
    pub fn new_error(error: GenerationErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    /// Create a mock with a sequence of responses.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Create a mock with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Prompt text of the nth request.
    pub fn prompt(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index].prompt_text()
    }

    fn next_response(&self, req: &GenerateRequest) -> ReelscriptResult<GenerateResponse> {
        let mut requests = self.requests.lock().unwrap();
        let current = requests.len();
        requests.push(req.clone());

        let outcome = match &self.behavior {
            MockBehavior::Success(text) => MockResponse::Success(text.clone()),
            MockBehavior::Error(kind) => MockResponse::Error(kind.clone()),
            MockBehavior::Sequence(responses) => {
                responses.get(current).cloned().unwrap_or_else(|| {
                    MockResponse::Error(GenerationErrorKind::Api {
                        status: 500,
                        message: format!(
                            "Mock sequence exhausted (call {} beyond {} responses)",
                            current + 1,
                            responses.len()
                        ),
                    })
                })
            }
        };

        match outcome {
            MockResponse::Success(text) => Ok(GenerateResponse::text(text)),
            MockResponse::Error(kind) => Err(GenerationError::new(kind).into()),
        }
    }
}

#[async_trait]
impl ChatDriver for MockChatDriver {
    async fn generate(&self, req: &GenerateRequest) -> ReelscriptResult<GenerateResponse> {
        tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
        self.next_response(req)
    }

    fn provider_name(&self) -> &'static str {
        "mock-chat"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
