use anyhow::Context;
use scoreboard_backend::config::Config;
use scoreboard_backend::create_app;
use scoreboard_store::Store;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for structured logging, RUST_LOG overrides the default
    #[cfg(debug_assertions)]
    let log_level = "debug";
    #[cfg(not(debug_assertions))]
    let log_level = "info";

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .compact()
        .init();
    tracing::info!("Starting scoreboard backend...");

    // Load configuration from environment variables or use defaults
    let config = Config::from_env();
    tracing::info!(
        "Configuration: port={}, body_limit={}KB, timeout={}s",
        config.port,
        config.request_body_limit / 1024,
        config.request_timeout.as_secs(),
    );
    match config.rate_limit() {
        Some(rate_limit) => tracing::info!(
            "Rate limit: {}/sec (burst {})",
            rate_limit.per_sec,
            rate_limit.burst
        ),
        None => tracing::info!("Rate limit: disabled"),
    }

    let store = Store::new();
    let app = create_app(
        store,
        config.request_body_limit,
        config.request_timeout,
        config.rate_limit(),
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
