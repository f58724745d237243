use business_consultant_orchestrator::{
    adapter::{AdapterConfig, LlmAdapter},
    orchestrator::Orchestrator,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("Business consultant demo starting");

    // The mock adapter keeps the demo deterministic and offline.
    let adapter = Arc::new(LlmAdapter::new(AdapterConfig::mock()));
    let orchestrator = Orchestrator::new(adapter, "prompts");

    let request = "An electric bike rental service for daily commuters in mid-sized cities.";

    info!(request = %request, "Running comprehensive consultation");

    let results = orchestrator.process_comprehensive(request).await;

    println!("\n=== COMPREHENSIVE CONSULTATION ===");
    for result in [&results.market, &results.financial, &results.strategy] {
        println!("\n--- {} ---", result.agent);
        println!("{}", result.response);
    }

    Ok(())
}
