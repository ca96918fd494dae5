use clap::Parser;
use safewalk_core::create_graph_store;
use safewalk_server::{AppState, Cli, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().resolve()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let dataset = config.dataset();
    let store = tokio::task::spawn_blocking(move || create_graph_store(&dataset)).await??;

    let app = router(AppState::new(store), &config);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("SafeWalk listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
