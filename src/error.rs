//! Error types for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors a request handler can return
#[derive(Error, Debug)]
pub enum AppError {
    /// Rejected request, message shown to the client
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upload or keywords folder unreadable
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking worker panicked or was cancelled
    #[error("Worker error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_) | AppError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Io(_) => "storage_error",
            AppError::Join(_) => "worker_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::BadRequest(msg) => msg.clone(),
            other => {
                tracing::error!(error = %other, "Request failed");
                "An internal error occurred".to_string()
            }
        };

        let body = ErrorBody {
            error: self.kind(),
            message,
            details: cfg!(debug_assertions).then(|| self.to_string()),
        };

        (self.status(), Json(body)).into_response()
    }
}
