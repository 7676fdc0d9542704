//! Uploaded document listing

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_documents))
}

#[derive(Debug, Serialize)]
pub struct DocumentEntry {
    pub name: String,
    /// Last known progress, absent if never processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub count: usize,
    pub documents: Vec<DocumentEntry>,
}

/// List uploaded PDFs
///
/// GET /api/v1/documents
async fn list_documents(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let lister = state.clone();
    let names = tokio::task::spawn_blocking(move || lister.uploaded_documents()).await??;

    let documents: Vec<DocumentEntry> = names
        .into_iter()
        .map(|name| DocumentEntry {
            progress: state.progress().get(&name),
            name,
        })
        .collect();

    Ok(Json(DocumentListResponse {
        count: documents.len(),
        documents,
    }))
}
