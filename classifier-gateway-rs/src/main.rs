// classifier-gateway-rs/src/main.rs
// Ticket Classifier Gateway - HTTP entry point and web console
// Port 5000 by default, see config-rs for overrides

use std::sync::Arc;

use classifier_gateway::ClassifierGateway;
use config_rs::ServiceConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config_rs::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::classifier();
    tracing::info!("Using bind address: {}", config.bind_address);
    tracing::info!("Maximum payload size: {} bytes", config.max_payload_bytes);

    let gateway = Arc::new(ClassifierGateway::new(&config));
    let app = gateway.create_router();

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("Classifier gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Classifier gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
