use anyhow::Context;
use product_api::app_system::{setup_tracing, ProductSystem};
use product_api::config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env().context("load configuration")?;
    info!(
        environment = ?config.environment,
        backend = ?config.backend,
        "Starting product API"
    );

    let system = ProductSystem::start(&config);
    let app = system.router(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Product API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("serve HTTP")?;

    // The router (and its store handle) is gone once `serve` returns.
    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Product API stopped");
    Ok(())
}
