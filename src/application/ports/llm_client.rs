use async_trait::async_trait;

/// A chat-completion backend. Each call sends the prompt as a single user message.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("backend unreachable: {0}")]
    Unavailable(String),
    #[error("backend timed out after {0}s")]
    Timeout(u64),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmClientError {
    /// True when the backend could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}
