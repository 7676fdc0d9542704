//! Progress polling

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::state::AppState;

/// Create the status router
pub fn router() -> Router<AppState> {
    Router::new().route("/:document_id", get(get_status))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Completion percent of one document
///
/// GET /api/v1/status/:document_id
async fn get_status(State(state): State<AppState>, Path(document_id): Path<String>) -> Response {
    match state.progress().get(&document_id) {
        Some(progress) => Json(StatusResponse {
            progress,
            message: None,
        })
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(StatusResponse {
                progress: 0,
                message: Some("File not found"),
            }),
        )
            .into_response(),
    }
}
