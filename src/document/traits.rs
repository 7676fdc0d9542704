//! Document access traits
//!
//! The highlighting pipeline never parses documents itself. It talks to a
//! facility that can open a document, read page text, search a page for a
//! verbatim string and attach highlight annotations.

use std::path::Path;

use super::error::AccessResult;
use super::types::{ColorTag, Rect, SaveOptions};

/// Opens documents for annotation
///
/// Implementations are shared across batch workers, so they must be
/// `Send + Sync`. The handles they return stay on the worker that opened
/// them.
pub trait DocumentAccess: Send + Sync {
    /// Open the document at `path`
    fn open(&self, path: &Path) -> AccessResult<Box<dyn DocumentHandle>>;
}

/// An open document
///
/// Dropping the handle closes the document.
pub trait DocumentHandle {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Extract plain text from a page (0-indexed)
    fn extract_text(&mut self, page: usize) -> AccessResult<String>;

    /// Find every rectangle on a page where `needle` is rendered
    fn search_text(&mut self, page: usize, needle: &str) -> AccessResult<Vec<Rect>>;

    /// Attach a highlight annotation over `rect`
    fn add_highlight(&mut self, page: usize, rect: Rect, color: ColorTag) -> AccessResult<()>;

    /// Write the annotated document to `path`
    fn save(&mut self, path: &Path, options: SaveOptions) -> AccessResult<()>;
}
