use anyhow::{Context, Result};
use dashboard_service::{
    api::{self, AppState},
    config::AppConfig,
    metrics_server, observability,
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let addr: SocketAddr = cfg
        .http
        .bind_addr
        .parse()
        .with_context(|| format!("invalid http.bind_addr '{}'", cfg.http.bind_addr))?;

    tracing::info!(
        start_date = %cfg.dataset.start_date,
        days = cfg.dataset.days,
        lines = ?cfg.dataset.lines,
        seed = cfg.dataset.seed,
        "dataset configured"
    );

    let app = api::router(AppState::new(cfg.dataset));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "dashboard service listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    tracing::info!("dashboard service stopped");
    Ok(())
}
