//! Batch orchestrator
//!
//! Runs the document processor over a list of uploaded documents on the
//! blocking pool and reports one outcome per document, in input order.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use super::archive::Archiver;
use super::uploads::is_plain_file_name;
use crate::error_log::ErrorLog;
use crate::highlight::{DocumentProcessor, ScriptHint};
use crate::progress::ProgressTracker;
use crate::vocabulary::Catalog;

/// Reason given to documents skipped after a stop request
pub const STOPPED_REASON: &str = "batch stopped before document started";

/// Outcome of one document in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    #[serde(rename_all = "camelCase")]
    Success {
        output_path: PathBuf,
        regions: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        script_hint: Option<ScriptHint>,
    },
    Failure { reason: String },
}

/// One row of a batch report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub document_id: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl BatchResult {
    fn failure(document_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            outcome: Outcome::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

/// Requests a running batch to stop before its next document
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Runs batches of uploaded documents
pub struct BatchOrchestrator {
    processor: Arc<DocumentProcessor>,
    upload_dir: PathBuf,
    archiver: Archiver,
    error_log: ErrorLog,
    workers: usize,
    stop: StopHandle,
}

impl BatchOrchestrator {
    pub fn new(
        processor: DocumentProcessor,
        upload_dir: impl Into<PathBuf>,
        archive_dir: impl Into<PathBuf>,
        error_log: ErrorLog,
    ) -> Self {
        let archiver = Archiver::new(processor.output_dir().to_path_buf(), archive_dir);
        Self {
            processor: Arc::new(processor),
            upload_dir: upload_dir.into(),
            archiver,
            error_log,
            workers: 1,
            stop: StopHandle::default(),
        }
    }

    /// Documents processed at once; 1 (the default) runs them in sequence
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn progress(&self) -> &ProgressTracker {
        self.processor.progress()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Process `document_ids` against `catalog`
    ///
    /// Previous outputs are archived first. A failing document never aborts
    /// the batch; results come back in the order of `document_ids`, with
    /// repeated ids collapsed to their first occurrence.
    pub async fn run_batch(
        &self,
        mut document_ids: Vec<String>,
        catalog: Arc<Catalog>,
    ) -> Vec<BatchResult> {
        self.stop.reset();
        // Two workers on one id would share an output file and a progress key
        let mut seen = HashSet::new();
        document_ids.retain(|id| seen.insert(id.clone()));

        tracing::info!(
            documents = document_ids.len(),
            keywords = catalog.len(),
            workers = self.workers,
            "Starting batch"
        );

        let archiver = self.archiver.clone();
        let archived = tokio::task::spawn_blocking(move || archiver.archive_outputs()).await;
        let archive_failure = match archived {
            Ok(Ok(_)) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(e) = archive_failure {
            let reason = format!("Could not archive previous outputs: {}", e);
            self.error_log.record(&reason);
            return document_ids
                .into_iter()
                .map(|id| BatchResult::failure(id, reason.clone()))
                .collect();
        }

        let results: Vec<BatchResult> = stream::iter(document_ids)
            .map(|document_id| self.run_one(document_id, Arc::clone(&catalog)))
            .buffered(self.workers)
            .collect()
            .await;

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        tracing::info!(
            succeeded,
            failed = results.len() - succeeded,
            "Batch complete"
        );
        results
    }

    async fn run_one(&self, document_id: String, catalog: Arc<Catalog>) -> BatchResult {
        if self.stop.is_stopped() {
            tracing::info!(document_id = %document_id, "Skipping document after stop request");
            return BatchResult::failure(document_id, STOPPED_REASON);
        }

        if !is_plain_file_name(&document_id) {
            let reason = format!("Invalid document id: {}", document_id);
            self.error_log.record(&reason);
            return BatchResult::failure(document_id, reason);
        }

        let input_path = self.upload_dir.join(&document_id);
        let processor = Arc::clone(&self.processor);
        let id = document_id.clone();
        let joined = tokio::task::spawn_blocking(move || {
            processor.process(&id, &input_path, &catalog)
        })
        .await;

        match joined {
            Ok(Ok(done)) => BatchResult {
                document_id,
                outcome: Outcome::Success {
                    output_path: done.output_path,
                    regions: done.regions,
                    script_hint: done.script_hint,
                },
            },
            // Already recorded by the processor
            Ok(Err(e)) => BatchResult::failure(document_id, e.to_string()),
            Err(e) => {
                let reason = format!("Worker for {} failed: {}", document_id, e);
                self.error_log.record(&reason);
                BatchResult::failure(document_id, reason)
            }
        }
    }
}
