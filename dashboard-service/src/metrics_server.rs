use std::net::SocketAddr;

use anyhow::Context;
use axum::{http::StatusCode, routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROM_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Installs the Prometheus recorder and serves `/metrics` on `bind_addr`.
///
/// The listener is bound before the recorder is installed, so an address
/// that cannot be bound fails here and leaves no recorder behind. Must be
/// called from within a tokio runtime. Calling it twice is an error because
/// only one global recorder can be installed.
pub fn init(bind_addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("invalid metrics bind address '{bind_addr}'"))?;

    let std_listener = std::net::TcpListener::bind(addr)
        .with_context(|| format!("failed to bind metrics listener on {addr}"))?;
    std_listener
        .set_nonblocking(true)
        .context("failed to make metrics listener non-blocking")?;
    let listener = tokio::net::TcpListener::from_std(std_listener)
        .context("failed to register metrics listener with tokio")?;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus metrics recorder")?;
    PROM_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Prometheus recorder already initialized"))?;

    describe();

    tracing::info!(%addr, "metrics listener started");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router().into_make_service()).await {
            tracing::error!(error = %e, "metrics server error");
        }
    });

    Ok(())
}

fn describe() {
    metrics::describe_counter!("dashboard_render_requests_total", "Dashboard renders by period");
    metrics::describe_histogram!(
        "dashboard_render_duration_seconds",
        "Time spent in one render pass"
    );
    metrics::describe_counter!(
        "kpi_zero_production_records_total",
        "Records whose quality fell back to 0% because production was zero"
    );
    metrics::describe_counter!(
        "dashboard_request_rejected_total",
        "Requests rejected with a client error"
    );
}

fn router() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

async fn metrics_handler() -> Result<String, StatusCode> {
    PROM_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}
