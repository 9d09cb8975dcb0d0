//! HTTP surface: operator page, scan and delete endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use tune_duper_core::{delete_files, DeleteReport, ScanEngine, ScanResult, SilentReporter};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScanEngine>,
}

impl AppState {
    pub fn new(engine: ScanEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scan(#[from] tune_duper_core::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Scan(tune_duper_core::Error::Grouping(_)) => {
                "Error processing filenames".to_string()
            }
            other => other.to_string(),
        };
        error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub directory: PathBuf,
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_use_cache() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub files: Vec<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/scan", post(scan_directory))
        .route("/delete", post(delete))
        .with_state(state)
}

pub async fn serve(state: AppState, bind_address: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Listening on http://{}", bind_address);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    info!("Index page accessed");
    Html(include_str!("../static/index.html"))
}

async fn scan_directory(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResult>, ApiError> {
    let engine = Arc::clone(&state.engine);
    let result = tokio::task::spawn_blocking(move || {
        engine.scan(&request.directory, request.use_cache, &SilentReporter)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Scan task failed: {}", e)))??;

    Ok(Json(result))
}

async fn delete(Json(request): Json<DeleteRequest>) -> Result<Json<DeleteReport>, ApiError> {
    let report = tokio::task::spawn_blocking(move || delete_files(&request.files))
        .await
        .map_err(|e| ApiError::Internal(format!("Delete task failed: {}", e)))?;
    Ok(Json(report))
}
