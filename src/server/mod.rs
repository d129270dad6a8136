//! Local web endpoint serving the interactive loss ratio dashboard
//!
//! - `GET  /`              dashboard page
//! - `GET  /api/options`   business lines, regions and period bounds
//! - `POST /api/dashboard` chart data for a `FilterSelection` body
//! - `GET  /api/health`    liveness and row count

mod handlers;
mod page;

pub use handlers::{AppError, AppState, HealthResponse, OptionsResponse};

use crate::config::ServerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

/// Build the dashboard router over a loaded dataset
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/api/options", get(handlers::options_handler))
        .route("/api/dashboard", post(handlers::dashboard_handler))
        .route("/api/health", get(handlers::health_handler))
        .with_state(state)
}

/// Serve an already-bound listener until the process is stopped
pub async fn serve_on(listener: TcpListener, dataset: Dataset) -> Result<()> {
    let app = router(AppState::new(dataset));
    axum::serve(listener, app).await?;
    Ok(())
}

/// Bind `config.host:config.port` and serve the dashboard
pub async fn serve(config: &ServerConfig, dataset: Dataset) -> Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    log::info!("Dashboard serving {} rows on http://{}", dataset.len(), address);
    serve_on(listener, dataset).await
}
