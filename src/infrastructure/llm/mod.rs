mod chat_completion_client;
mod mock_llm_client;

pub use chat_completion_client::ChatCompletionClient;
pub use mock_llm_client::MockLlmClient;
