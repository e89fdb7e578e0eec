//! pushmetrics adapter
//!
//! - Push endpoint: POST/GET `adapter.push_path` (default `/custom-metrics`)
//! - Custom metrics read API backed by the in-memory store
//! - Graceful shutdown on Ctrl-C (readiness flips to draining first)

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use pushmetrics_adapter::{app_state, config, router};
use pushmetrics_core::error::{MetricsError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .adapter
        .listen
        .parse()
        .map_err(|e| MetricsError::BadRequest(format!("adapter.listen: {e}")))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "pushmetrics-adapter starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricsError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| MetricsError::Internal(format!("server failed: {e}")))?;

    tracing::info!("pushmetrics-adapter stopped");
    Ok(())
}

async fn shutdown_signal(state: app_state::AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    state.set_draining();
    tracing::info!(metrics = state.store().len(), "shutdown requested, draining");
}
