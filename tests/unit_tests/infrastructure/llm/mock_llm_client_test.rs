use std::time::Duration;

use cardsmith::application::ports::LlmClient;
use cardsmith::application::services::recover_flashcards;
use cardsmith::infrastructure::llm::MockLlmClient;

#[tokio::test]
async fn given_fixed_response_when_completing_then_returns_it_for_any_prompt() {
    let client = MockLlmClient::new("canned");

    assert_eq!(client.complete("first").await.unwrap(), "canned");
    assert_eq!(client.complete("second").await.unwrap(), "canned");
}

#[tokio::test(start_paused = true)]
async fn given_delay_when_completing_then_waits_before_responding() {
    let client = MockLlmClient::new("late").with_delay(Duration::from_millis(500));
    let started = tokio::time::Instant::now();

    let response = client.complete("prompt").await.unwrap();

    assert_eq!(response, "late");
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[tokio::test]
async fn given_scaffold_client_when_completing_then_returns_recoverable_deck() {
    let client = MockLlmClient::scaffold(0);

    let response = client.complete("prompt").await.unwrap();
    let items = recover_flashcards(&response).unwrap();

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["question"].is_string()));
}
