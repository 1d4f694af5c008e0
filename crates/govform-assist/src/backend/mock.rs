//! Mock LLM backend for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::traits::{CompletionRequest, CompletionResponse, LlmBackend, LlmError};

/// Mock backend for testing.
///
/// Answers every request with the same text and records what it was asked.
#[derive(Debug)]
pub struct MockBackend {
    model_id: String,
    available: AtomicBool,
    response_content: String,
    call_count: AtomicU32,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            available: AtomicBool::new(true),
            response_content: "Mock response".to_string(),
            call_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Set the response content.
    #[must_use]
    pub fn with_response(mut self, content: impl Into<String>) -> Self {
        self.response_content = content.into();
        self
    }

    /// Set availability; an unavailable mock fails every request.
    #[must_use]
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Get the number of times complete was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("mock-model")
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    fn id(&self) -> &str {
        &self.model_id
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);

        if !self.available.load(Ordering::SeqCst) {
            return Err(LlmError::Unavailable("Mock backend unavailable".to_string()));
        }

        Ok(CompletionResponse {
            content: self.response_content.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_requests() {
        let backend = MockBackend::default().with_response("hi");
        let response = backend.complete(CompletionRequest::user("hello")).await.unwrap();

        assert_eq!(response.content, "hi");
        assert_eq!(backend.call_count(), 1);
        assert_eq!(backend.requests()[0].messages[0].content, "hello");
    }

    #[tokio::test]
    async fn unavailable_mock_fails() {
        let backend = MockBackend::default().with_available(false);
        let result = backend.complete(CompletionRequest::user("hello")).await;

        assert!(matches!(result, Err(LlmError::Unavailable(_))));
        assert_eq!(backend.call_count(), 1);
    }
}
