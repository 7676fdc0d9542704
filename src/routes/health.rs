//! Health endpoint
//!
//! Reports the service version and whether the upload and keywords folders
//! are in place.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub folders_ready: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = &state.config().storage;
    let folders_ready = storage.upload_dir.is_dir() && storage.keywords_dir.is_dir();
    if !folders_ready {
        tracing::warn!("Upload or keywords folder missing");
    }

    Json(HealthResponse {
        status: if folders_ready { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        folders_ready,
    })
}
