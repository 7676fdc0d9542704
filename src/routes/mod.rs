//! Route modules for the keyword highlighter

pub mod documents;
pub mod health;
pub mod search;
pub mod status;

use axum::Router;

use crate::state::AppState;

/// All API routes, without middleware
pub fn api(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .nest("/api/v1/health", health::router())
        .nest("/api/v1/search", search::router())
        .nest("/api/v1/status", status::router())
        .nest("/api/v1/documents", documents::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, StorageConfig};
    use crate::document::{MemoryAccess, MemoryDocument};

    fn test_app(dir: &tempfile::TempDir) -> (Router, AppState) {
        let config = Config {
            storage: StorageConfig::rooted_at(dir.path()),
            ..Config::default()
        };
        let state = AppState::new(config, Arc::new(MemoryAccess)).unwrap();
        (api(state.clone()), state)
    }

    fn upload(state: &AppState, name: &str, texts: &[&str]) {
        MemoryDocument::from_texts(texts.iter().copied())
            .write_to(&state.config().storage.upload_dir.join(name))
            .unwrap();
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = test_app(&dir);

        let (status, body) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["foldersReady"], true);
    }

    #[tokio::test]
    async fn test_health_degraded_without_upload_folder() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = test_app(&dir);
        std::fs::remove_dir_all(&state.config().storage.upload_dir).unwrap();

        let (status, body) = send(app, get("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["foldersReady"], false);
    }

    #[tokio::test]
    async fn test_unknown_status_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = test_app(&dir);

        let (status, body) = send(app, get("/api/v1/status/nope.pdf")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"progress": 0, "message": "File not found"}));
    }

    #[tokio::test]
    async fn test_standard_search_then_status() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = test_app(&dir);
        std::fs::write(
            state.config().storage.keywords_dir.join("drugs.csv"),
            "aspirin\n",
        )
        .unwrap();
        upload(&state, "a.pdf", &["took aspirin"]);

        let (status, body) = send(app.clone(), post("/api/v1/search", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Files processed");
        assert_eq!(body["results"][0]["documentId"], "a.pdf");
        assert_eq!(body["results"][0]["status"], "success");
        assert_eq!(body["results"][0]["regions"], 1);

        let (status, body) = send(app, get("/api/v1/status/a.pdf")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"progress": 100}));
    }

    #[tokio::test]
    async fn test_stop_does_not_block_next_batch() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = test_app(&dir);
        std::fs::write(
            state.config().storage.keywords_dir.join("drugs.csv"),
            "aspirin\n",
        )
        .unwrap();
        upload(&state, "a.pdf", &["aspirin"]);

        let (status, body) = send(app.clone(), post("/api/v1/search/stop", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Stop requested");

        let (_, body) = send(app, post("/api/v1/search", json!({}))).await;
        assert_eq!(body["results"][0]["status"], "success");
    }

    #[tokio::test]
    async fn test_search_without_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = test_app(&dir);

        let (status, body) = send(app, post("/api/v1/search", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "No files to process");
    }

    #[tokio::test]
    async fn test_specific_search_requires_known_files() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = test_app(&dir);

        let (status, body) = send(
            app.clone(),
            post("/api/v1/search/specific", json!({"keywordFiles": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        let (status, _) = send(
            app,
            post("/api/v1/search/specific", json!({"keywordFiles": ["missing.csv"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_specific_search_uses_uploaded_keywords() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = test_app(&dir);
        std::fs::write(
            state.config().storage.uploaded_keywords_dir.join("mine.csv"),
            "rash",
        )
        .unwrap();
        upload(&state, "a.pdf", &["mild rash"]);
        upload(&state, "b.pdf", &["no findings"]);

        let (status, body) = send(
            app,
            post(
                "/api/v1/search/specific",
                json!({"keywordFiles": ["mine.csv"], "documents": ["a.pdf"]}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["regions"], 1);
    }

    #[tokio::test]
    async fn test_quick_search() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = test_app(&dir);
        upload(&state, "a.pdf", &["intro", "Patient reported headache"]);

        let (status, body) = send(
            app.clone(),
            post("/api/v1/search/quick", json!({"keyword": "HEADACHE"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Search completed");
        assert_eq!(
            body["results"],
            json!([{"file": "a.pdf", "page": 2, "context": "Patient reported headache"}])
        );

        let (_, body) = send(app, post("/api/v1/search/quick", json!({"keyword": " "}))).await;
        assert_eq!(body["message"], "Keyword is empty");
    }

    #[tokio::test]
    async fn test_list_documents() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = test_app(&dir);
        upload(&state, "b.pdf", &["x"]);
        upload(&state, "a.pdf", &["x"]);

        let (status, body) = send(app, get("/api/v1/documents")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"count": 2, "documents": [{"name": "a.pdf"}, {"name": "b.pdf"}]})
        );
    }
}
