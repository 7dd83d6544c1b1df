//! Gateway binary entry point

use gateway::{ApiState, GatewayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=info,field_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;
    tracing::info!(storage = ?config.storage, "selected storage backend");

    let state = ApiState::new(config.storage.build(), config.api_key.clone());
    gateway::start_server(&config.addr, state).await?;

    Ok(())
}
