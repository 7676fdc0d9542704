//! Quick search
//!
//! Looks up a single keyword in every uploaded document without touching the
//! catalog or writing highlights. Each hit carries a short context window
//! around the first occurrence on the page.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::batch::list_uploaded;
use crate::document::{AccessResult, DocumentAccess};
use crate::matcher::fold_char;

/// Characters of context kept on each side of a hit
pub const DEFAULT_CONTEXT_LEN: usize = 50;

/// A page containing the keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickSearchHit {
    pub file: String,
    /// 1-indexed page
    pub page: usize,
    pub context: String,
}

/// Single-keyword search over the upload folder
pub struct QuickSearcher {
    access: Arc<dyn DocumentAccess>,
    context_len: usize,
}

impl QuickSearcher {
    pub fn new(access: Arc<dyn DocumentAccess>) -> Self {
        Self {
            access,
            context_len: DEFAULT_CONTEXT_LEN,
        }
    }

    pub fn with_context_len(mut self, context_len: usize) -> Self {
        self.context_len = context_len;
        self
    }

    /// Every page of every uploaded PDF containing `keyword`, ignoring case
    ///
    /// Documents that cannot be read are skipped with a warning.
    pub fn search(&self, upload_dir: &Path, keyword: &str) -> std::io::Result<Vec<QuickSearchHit>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits = Vec::new();
        for file in list_uploaded(upload_dir)? {
            match self.search_document(&upload_dir.join(&file), &file, keyword) {
                Ok(found) => hits.extend(found),
                Err(e) => {
                    tracing::warn!(file = %file, error = %e, "Skipping document in quick search")
                }
            }
        }

        tracing::debug!(keyword = %keyword, hits = hits.len(), "Quick search complete");
        Ok(hits)
    }

    fn search_document(
        &self,
        path: &Path,
        file: &str,
        keyword: &str,
    ) -> AccessResult<Vec<QuickSearchHit>> {
        let mut doc = self.access.open(path)?;
        let mut hits = Vec::new();
        for page in 0..doc.page_count() {
            let text = doc.extract_text(page)?;
            if let Some(context) = keyword_context(&text, keyword, self.context_len) {
                hits.push(QuickSearchHit {
                    file: file.to_string(),
                    page: page + 1,
                    context,
                });
            }
        }
        Ok(hits)
    }
}

/// Text around the first case-insensitive occurrence of `keyword`
///
/// Takes up to `context_len` characters on each side, flattens line breaks
/// and trims. `None` when the keyword does not occur.
pub fn keyword_context(text: &str, keyword: &str, context_len: usize) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let folded: Vec<char> = chars.iter().copied().map(fold_char).collect();
    let needle: Vec<char> = keyword.chars().map(fold_char).collect();
    if needle.is_empty() || needle.len() > folded.len() {
        return None;
    }

    let index = folded.windows(needle.len()).position(|w| w == needle.as_slice())?;
    let start = index.saturating_sub(context_len);
    let end = (index + needle.len() + context_len).min(chars.len());

    let window: String = chars[start..end]
        .iter()
        .map(|&c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    Some(window.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryAccess, MemoryDocument};

    #[test]
    fn test_context_window() {
        let text = "0123456789 aspirin 0123456789";
        assert_eq!(
            keyword_context(text, "ASPIRIN", 3).as_deref(),
            Some("89 aspirin 01")
        );
        assert_eq!(keyword_context(text, "ibuprofen", 3), None);
        assert_eq!(keyword_context(text, "", 3), None);
    }

    #[test]
    fn test_context_flattens_lines_and_clamps() {
        assert_eq!(
            keyword_context("took\naspirin\ntoday", "aspirin", 50).as_deref(),
            Some("took aspirin today")
        );
    }

    #[test]
    fn test_context_counts_characters() {
        assert_eq!(
            keyword_context("副作用: aspirin", "aspirin", 2).as_deref(),
            Some(": aspirin")
        );
    }

    #[test]
    fn test_search_reports_pages() {
        let dir = tempfile::tempdir().unwrap();
        MemoryDocument::from_texts(["nothing", "Aspirin given"])
            .write_to(&dir.path().join("a.pdf"))
            .unwrap();
        MemoryDocument::from_texts(["aspirin"])
            .write_to(&dir.path().join("b.pdf"))
            .unwrap();
        std::fs::write(dir.path().join("broken.pdf"), b"junk").unwrap();

        let hits = QuickSearcher::new(Arc::new(MemoryAccess))
            .search(dir.path(), " aspirin ")
            .unwrap();

        assert_eq!(
            hits,
            vec![
                QuickSearchHit {
                    file: "a.pdf".into(),
                    page: 2,
                    context: "Aspirin given".into(),
                },
                QuickSearchHit {
                    file: "b.pdf".into(),
                    page: 1,
                    context: "aspirin".into(),
                },
            ]
        );
    }

    #[test]
    fn test_blank_keyword_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        MemoryDocument::from_texts(["aspirin"])
            .write_to(&dir.path().join("a.pdf"))
            .unwrap();

        let searcher = QuickSearcher::new(Arc::new(MemoryAccess));
        assert!(searcher.search(dir.path(), "  ").unwrap().is_empty());
    }
}
