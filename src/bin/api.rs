use business_consultant_orchestrator::{
    adapter::{AdapterConfig, LlmAdapter},
    api::start_server,
    orchestrator::Orchestrator,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AdapterConfig::from_env();
    if config.use_mock {
        info!("OPENAI_API_KEY not set or USE_MOCK_LLM enabled, serving deterministic mock responses");
    }

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    let prompts_dir = std::env::var("PROMPTS_DIR").unwrap_or_else(|_| "prompts".to_string());

    info!("Multi-Agent Business Consultant - API Server");
    info!("Port: {}", api_port);
    info!("Model: {}", config.model);

    // Create components
    let adapter = Arc::new(LlmAdapter::new(config));
    let orchestrator = Arc::new(Orchestrator::new(adapter, &prompts_dir));

    info!("Orchestrator initialized");
    info!("Starting API server...");

    // Start API server
    start_server(orchestrator, api_port).await?;

    Ok(())
}
