//! Highlighting error types

use thiserror::Error;

use crate::document::AccessError;

/// One page could not be scanned or annotated
#[derive(Debug, Error)]
#[error("Page {page} could not be processed: {source}")]
pub struct PageProcessingError {
    /// 1-indexed page number
    pub page: usize,
    #[source]
    pub source: AccessError,
}

/// Document-level failure
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Input missing, corrupt or not a supported document
    #[error("Cannot open {document_id}: it may be corrupted or invalid ({reason})")]
    DocumentOpen { document_id: String, reason: String },

    /// Every page failed
    #[error("No page of {document_id} could be processed ({failed} of {pages} failed)")]
    NoPagesProcessed {
        document_id: String,
        pages: usize,
        failed: usize,
    },

    /// Annotated copy could not be written
    #[error("Could not save highlighted copy of {document_id}: {reason}")]
    DocumentSave { document_id: String, reason: String },
}

impl ProcessError {
    pub fn document_id(&self) -> &str {
        match self {
            ProcessError::DocumentOpen { document_id, .. }
            | ProcessError::NoPagesProcessed { document_id, .. }
            | ProcessError::DocumentSave { document_id, .. } => document_id,
        }
    }
}

/// Result type alias for document processing
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;
