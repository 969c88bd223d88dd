use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};

const SCAFFOLD_RESPONSE: &str = r#"[
    {"question": "What does this service generate from an uploaded document?", "answer": "Question and answer flashcards."},
    {"question": "Which file types can be uploaded?", "answer": "PDF, PPTX and TXT."}
]"#;

/// Returns a fixed completion, optionally after a delay.
pub struct MockLlmClient {
    response: String,
    delay: Duration,
}

impl MockLlmClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            delay: Duration::ZERO,
        }
    }

    /// Canned deck used when the service runs without a model backend.
    pub fn scaffold(delay_ms: u64) -> Self {
        Self::new(SCAFFOLD_RESPONSE).with_delay(Duration::from_millis(delay_ms))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.response.clone())
    }
}
