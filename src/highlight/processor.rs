//! Document processor
//!
//! Runs the page scanner over every page of one document, reports progress
//! after each page and writes the annotated copy to the output folder.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::error::{ProcessError, ProcessResult};
use super::scanner::PageScanner;
use super::script::ScriptHint;
use crate::document::{DocumentAccess, SaveOptions};
use crate::error_log::ErrorLog;
use crate::progress::{page_percent, ProgressTracker};
use crate::vocabulary::Catalog;

/// Summary of one processed document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
    pub document_id: String,
    pub output_path: PathBuf,
    pub page_count: usize,
    /// Highlights applied across all pages
    pub regions: usize,
    /// 1-indexed pages skipped after an error
    pub skipped_pages: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_hint: Option<ScriptHint>,
}

/// Highlights single documents
pub struct DocumentProcessor {
    access: Arc<dyn DocumentAccess>,
    output_dir: PathBuf,
    progress: ProgressTracker,
    error_log: ErrorLog,
    save_options: SaveOptions,
}

impl DocumentProcessor {
    pub fn new(
        access: Arc<dyn DocumentAccess>,
        output_dir: impl Into<PathBuf>,
        progress: ProgressTracker,
        error_log: ErrorLog,
    ) -> Self {
        Self {
            access,
            output_dir: output_dir.into(),
            progress,
            error_log,
            save_options: SaveOptions::default(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Where the annotated copy of `input_path` is written
    pub fn output_path_for(&self, document_id: &str, input_path: &Path) -> PathBuf {
        let file_name = input_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| document_id.into());
        self.output_dir.join(file_name)
    }

    /// Highlight `input_path` and return where the copy was written
    ///
    /// The document handle is dropped (closed) on every return path. The
    /// input file is never written.
    pub fn process(
        &self,
        document_id: &str,
        input_path: &Path,
        catalog: &Catalog,
    ) -> ProcessResult<ProcessedDocument> {
        self.progress.begin(document_id);
        tracing::info!(document_id = %document_id, input = %input_path.display(), "Processing document");

        let mut doc = self.access.open(input_path).map_err(|e| {
            self.fail(ProcessError::DocumentOpen {
                document_id: document_id.to_string(),
                reason: e.to_string(),
            })
        })?;

        let page_count = doc.page_count();
        let scanner = PageScanner::new(catalog);
        let mut regions = 0;
        let mut skipped_pages = Vec::new();
        let mut script_hint = None;

        for page in 0..page_count {
            match scanner.scan(doc.as_mut(), page) {
                Ok(scan) => {
                    regions += scan.regions;
                    if scan.script_hint.is_some() {
                        script_hint = scan.script_hint;
                    }
                }
                Err(e) => {
                    self.error_log
                        .record(format!("Error processing {}: {}", document_id, e));
                    skipped_pages.push(e.page);
                }
            }

            let percent = page_percent(page + 1, page_count);
            self.progress.advance(document_id, percent);
            tracing::debug!(
                document_id = %document_id,
                page = page + 1,
                pages = page_count,
                percent,
                "Page complete"
            );
        }

        if page_count > 0 && skipped_pages.len() == page_count {
            return Err(self.fail(ProcessError::NoPagesProcessed {
                document_id: document_id.to_string(),
                pages: page_count,
                failed: skipped_pages.len(),
            }));
        }

        let output_path = self.output_path_for(document_id, input_path);
        self.save(doc.as_mut(), document_id, input_path, &output_path)?;
        drop(doc);

        self.progress.complete(document_id);
        tracing::info!(
            document_id = %document_id,
            output = %output_path.display(),
            pages = page_count,
            regions,
            skipped = skipped_pages.len(),
            "Saved highlighted document"
        );

        Ok(ProcessedDocument {
            document_id: document_id.to_string(),
            output_path,
            page_count,
            regions,
            skipped_pages,
            script_hint,
        })
    }

    fn save(
        &self,
        doc: &mut dyn crate::document::DocumentHandle,
        document_id: &str,
        input_path: &Path,
        output_path: &Path,
    ) -> ProcessResult<()> {
        let save_error = |reason: String| ProcessError::DocumentSave {
            document_id: document_id.to_string(),
            reason,
        };

        if same_file(input_path, output_path) {
            return Err(self.fail(save_error(format!(
                "output {} would overwrite the input",
                output_path.display()
            ))));
        }

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| self.fail(save_error(format!("{}: {}", self.output_dir.display(), e))))?;

        doc.save(output_path, self.save_options)
            .map_err(|e| self.fail(save_error(e.to_string())))
    }

    fn fail(&self, error: ProcessError) -> ProcessError {
        self.error_log.record(&error);
        error
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
