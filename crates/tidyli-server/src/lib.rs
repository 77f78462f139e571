//! Decision-log server
//!
//! Serves the export CSVs and keeps the append-only `keep.csv` / `remove.csv` logs.

use axum::routing::get;
use axum::Router;
use std::path::{Path, PathBuf};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod log;

pub use log::{DecisionLog, LogError, LogKind};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub log: DecisionLog,
    /// Directory served under `/data`
    pub data_dir: PathBuf,
}

impl AppState {
    /// State whose logs live alongside the export files in `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            log: DecisionLog::new(&data_dir),
            data_dir,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to prepare decision logs: {0}")]
    Startup(#[from] LogError),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let data = ServeDir::new(&state.data_dir);

    Router::new()
        .route(
            "/api/decisions",
            get(api::get_decisions).post(api::post_decision),
        )
        .route("/health", get(api::health_check))
        .nest_service("/data", data)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Ensure both logs exist, then serve until the process is stopped.
///
/// Failing to create the logs is fatal: the error is returned before binding.
pub async fn serve(state: AppState, addr: &str) -> Result<(), ServerError> {
    if let Err(e) = state.log.ensure_all().await {
        tracing::error!("Error creating decision files: {}", e);
        return Err(e.into());
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("tidyli server listening on http://{}", listener.local_addr()?);
    tracing::info!("Decision logs in {}", state.log.dir().display());

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
