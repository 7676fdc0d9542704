//! Per-document progress
//!
//! A concurrent map from document id to completion percent. Workers write
//! single keys; pollers read at any time without waiting on a batch.

use std::sync::Arc;

use dashmap::DashMap;

/// Shared progress map handle
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    entries: Arc<DashMap<String, u8>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run for `document_id`, overwriting any previous entry with 0
    pub fn begin(&self, document_id: &str) {
        self.entries.insert(document_id.to_string(), 0);
    }

    /// Raise the entry to `percent` (clamped to 100); never lowers it
    pub fn advance(&self, document_id: &str, percent: u8) {
        let percent = percent.min(100);
        self.entries
            .entry(document_id.to_string())
            .and_modify(|current| *current = (*current).max(percent))
            .or_insert(percent);
    }

    /// Mark `document_id` as fully processed
    pub fn complete(&self, document_id: &str) {
        self.entries.insert(document_id.to_string(), 100);
    }

    /// Current percent, `None` if the document was never started
    pub fn get(&self, document_id: &str) -> Option<u8> {
        self.entries.get(document_id).map(|v| *v)
    }
}

/// Percent after `completed` of `total` pages, kept below 100 until the
/// document is persisted
pub fn page_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = completed.min(total) * 100 / total;
    percent.min(99) as u8
}
