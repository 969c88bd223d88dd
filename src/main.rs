use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use cardsmith::application::ports::LlmClient;
use cardsmith::application::services::{FlashcardService, PromptBuilder};
use cardsmith::infrastructure::llm::{ChatCompletionClient, MockLlmClient};
use cardsmith::infrastructure::observability::{TracingConfig, init_tracing};
use cardsmith::infrastructure::text_processing::CompositeFileLoader;
use cardsmith::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::new(environment, &settings.logging));

    let scaffold_config = ScaffoldConfig::from_env();
    let llm_client: Arc<dyn LlmClient> = if scaffold_config.enabled {
        tracing::warn!(
            delay_ms = scaffold_config.mock_response_delay_ms,
            "Scaffold mode enabled, serving canned flashcards"
        );
        Arc::new(MockLlmClient::scaffold(
            scaffold_config.mock_response_delay_ms,
        ))
    } else {
        let client = ChatCompletionClient::new(&settings.llm)?;
        tracing::info!(
            base_url = %settings.llm.base_url,
            model = client.model(),
            timeout_seconds = settings.llm.timeout_seconds,
            "Model backend configured"
        );
        Arc::new(client)
    };

    let flashcard_service = Arc::new(FlashcardService::new(
        Arc::new(CompositeFileLoader::with_default_adapters()),
        llm_client,
        PromptBuilder::new(settings.prompt.max_input_chars),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let state = AppState {
        flashcard_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
