//! Document access error types

use thiserror::Error;

/// Errors raised by the document-access facility
#[derive(Debug, Error)]
pub enum AccessError {
    /// Document could not be opened (missing, corrupt, unsupported)
    #[error("Failed to open document: {0}")]
    Open(String),

    /// Page index outside the document
    #[error("Page {index} not found (document has {count} pages)")]
    PageNotFound { index: usize, count: usize },

    /// Text extraction failed on a page
    #[error("Text extraction error: {0}")]
    TextExtraction(String),

    /// Verbatim text search failed on a page
    #[error("Search error: {0}")]
    Search(String),

    /// Highlight annotation could not be created
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// Annotated document could not be written
    #[error("Failed to save document: {0}")]
    Save(String),

    /// MuPDF error outside the categories above
    #[error("MuPDF error: {0}")]
    MuPdf(String),
}

/// Result type alias for document access
pub type AccessResult<T> = std::result::Result<T, AccessError>;

impl From<mupdf::Error> for AccessError {
    fn from(err: mupdf::Error) -> Self {
        AccessError::MuPdf(err.to_string())
    }
}
