//! HTTP handlers for the dashboard endpoint

use super::page::INDEX_HTML;
use crate::analysis::{build_dashboard, DashboardView, FilterSelection};
use crate::dataset::Dataset;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Shared, read-only server state
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    started: Instant,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            started: Instant::now(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// Filter choices offered by the page controls
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub business_lines: Vec<String>,
    pub regions: Vec<String>,
    pub min_period: Option<NaiveDate>,
    pub max_period: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rows: usize,
    pub uptime_secs: f64,
}

pub enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(e) => (StatusCode::BAD_REQUEST, e),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn options_handler(State(state): State<AppState>) -> Json<OptionsResponse> {
    let dataset = state.dataset();
    let bounds = dataset.period_bounds();

    let mut business_lines = dataset.business_lines();
    business_lines.sort();
    let mut regions = dataset.regions();
    regions.sort();

    Json(OptionsResponse {
        business_lines,
        regions,
        min_period: bounds.map(|(min, _)| min),
        max_period: bounds.map(|(_, max)| max),
    })
}

/// Recompute every chart for the posted selection
pub async fn dashboard_handler(
    State(state): State<AppState>,
    payload: Result<Json<FilterSelection>, JsonRejection>,
) -> Result<Json<DashboardView>, AppError> {
    let start = Instant::now();
    let Json(filter) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let view = build_dashboard(state.dataset(), &filter);
    log::debug!(
        "Recomputed dashboard: {} rows, {} series points in {:?} for {:?}",
        view.totals.rows,
        view.series.len(),
        start.elapsed(),
        filter
    );
    Ok(Json(view))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        rows: state.dataset().len(),
        uptime_secs: state.started.elapsed().as_secs_f64(),
    })
}
