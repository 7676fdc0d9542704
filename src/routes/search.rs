//! Search API routes
//!
//! Batch highlighting with the standard or a hand-picked keyword set, and a
//! quick single-keyword lookup.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::batch::BatchResult;
use crate::error::{AppError, Result};
use crate::search::QuickSearchHit;
use crate::state::AppState;

/// Create the search router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(search_standard))
        .route("/specific", post(search_specific))
        .route("/quick", post(quick_search))
        .route("/stop", post(stop_search))
}

/// Request body for standard search
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Uploaded file names to process (default: all uploads)
    #[serde(default)]
    pub documents: Option<Vec<String>>,
}

/// Request body for search with selected keyword files
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificSearchRequest {
    pub keyword_files: Vec<String>,
    #[serde(default)]
    pub documents: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub message: String,
    pub results: Vec<BatchResult>,
}

/// Highlight uploads with the standard keywords folder
///
/// POST /api/v1/search
async fn search_standard(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<BatchResponse>> {
    let loader = state.clone();
    let (catalog, uploaded) = tokio::task::spawn_blocking(move || {
        Ok::<_, std::io::Error>((loader.standard_catalog(), loader.uploaded_documents()?))
    })
    .await??;

    run(&state, request.documents.unwrap_or(uploaded), catalog).await
}

/// Highlight uploads with selected keyword files
///
/// POST /api/v1/search/specific
async fn search_specific(
    State(state): State<AppState>,
    Json(request): Json<SpecificSearchRequest>,
) -> Result<Json<BatchResponse>> {
    if request.keyword_files.is_empty() {
        return Err(AppError::BadRequest("No keyword files selected".to_string()));
    }

    let loader = state.clone();
    let (catalog, uploaded) = tokio::task::spawn_blocking(move || {
        let paths = loader.resolve_keyword_files(&request.keyword_files);
        if paths.is_empty() {
            return Err(AppError::BadRequest(
                "None of the selected keyword files exist".to_string(),
            ));
        }
        Ok((loader.selected_catalog(&paths), loader.uploaded_documents()?))
    })
    .await??;

    run(&state, request.documents.unwrap_or(uploaded), catalog).await
}

async fn run(
    state: &AppState,
    documents: Vec<String>,
    catalog: crate::vocabulary::Catalog,
) -> Result<Json<BatchResponse>> {
    if documents.is_empty() {
        return Ok(Json(BatchResponse {
            message: "No files to process".to_string(),
            results: Vec::new(),
        }));
    }

    let results = state.run_batch(documents, Arc::new(catalog)).await;
    Ok(Json(BatchResponse {
        message: "Files processed".to_string(),
        results,
    }))
}

#[derive(Debug, Serialize)]
pub struct StopResponse {
    pub message: String,
}

/// Stop the running batch before its next document
///
/// POST /api/v1/search/stop
async fn stop_search(State(state): State<AppState>) -> Json<StopResponse> {
    state.stop_batch();
    Json(StopResponse {
        message: "Stop requested".to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct QuickSearchRequest {
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct QuickSearchResponse {
    pub message: String,
    pub results: Vec<QuickSearchHit>,
}

/// Find pages mentioning one keyword
///
/// POST /api/v1/search/quick
async fn quick_search(
    State(state): State<AppState>,
    Json(request): Json<QuickSearchRequest>,
) -> Result<Json<QuickSearchResponse>> {
    let keyword = request.keyword.trim().to_string();
    if keyword.is_empty() {
        return Ok(Json(QuickSearchResponse {
            message: "Keyword is empty".to_string(),
            results: Vec::new(),
        }));
    }

    let searcher_state = state.clone();
    let results = tokio::task::spawn_blocking(move || {
        let upload_dir = &searcher_state.config().storage.upload_dir;
        searcher_state.searcher().search(upload_dir, &keyword)
    })
    .await??;

    let message = if results.is_empty() {
        "No matches found"
    } else {
        "Search completed"
    };
    Ok(Json(QuickSearchResponse {
        message: message.to_string(),
        results,
    }))
}
