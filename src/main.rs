use std::sync::Arc;

use loan_chat::cli;
use loan_chat::config::{EngineConfig, PredictConfig};
use loan_chat::engine::ConversationEngine;
use loan_chat::predict::HttpPredictClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let predict_config = PredictConfig::from_env()?;

    eprintln!("💬 Loan Chat v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Endpoint: {}", predict_config.endpoint);
    eprintln!("   Type your answers and press Enter. /quit to exit.\n");

    let client = HttpPredictClient::new(predict_config)?;

    // Advisory probe; the service may come up later.
    if let Err(e) = client.health_check().await {
        tracing::warn!("Prediction service health check failed: {}", e);
    }

    let engine = ConversationEngine::new(EngineConfig::default(), Arc::new(client));
    cli::run(engine).await?;

    Ok(())
}
