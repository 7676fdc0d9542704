//! Application state management

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::batch::{is_plain_file_name, list_uploaded, BatchOrchestrator, BatchResult};
use crate::config::Config;
use crate::document::DocumentAccess;
use crate::error_log::ErrorLog;
use crate::highlight::DocumentProcessor;
use crate::progress::ProgressTracker;
use crate::search::QuickSearcher;
use crate::vocabulary::Catalog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    orchestrator: BatchOrchestrator,
    searcher: QuickSearcher,
    error_log: ErrorLog,
    /// One batch at a time; batches share the output folder
    batch_lock: Mutex<()>,
}

impl AppState {
    /// Create the application state, creating the working folders
    pub fn new(config: Config, access: Arc<dyn DocumentAccess>) -> std::io::Result<Self> {
        let storage = &config.storage;
        for dir in [
            &storage.upload_dir,
            &storage.keywords_dir,
            &storage.uploaded_keywords_dir,
            &storage.highlighted_dir,
        ] {
            std::fs::create_dir_all(dir)?;
        }

        let error_log = ErrorLog::open(&storage.error_log_dir)?;
        let processor = DocumentProcessor::new(
            Arc::clone(&access),
            storage.highlighted_dir.clone(),
            ProgressTracker::new(),
            error_log.clone(),
        );
        let orchestrator = BatchOrchestrator::new(
            processor,
            storage.upload_dir.clone(),
            storage.archive_dir.clone(),
            error_log.clone(),
        )
        .with_workers(config.processing.batch_workers);
        let searcher =
            QuickSearcher::new(access).with_context_len(config.processing.quick_search_context);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                orchestrator,
                searcher,
                error_log,
                batch_lock: Mutex::new(()),
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn progress(&self) -> &ProgressTracker {
        self.inner.orchestrator.progress()
    }

    pub fn searcher(&self) -> &QuickSearcher {
        &self.inner.searcher
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.inner.error_log
    }

    /// Uploaded PDF file names
    pub fn uploaded_documents(&self) -> std::io::Result<Vec<String>> {
        list_uploaded(&self.inner.config.storage.upload_dir)
    }

    /// Catalog over the standard keywords folder
    pub fn standard_catalog(&self) -> Catalog {
        let catalog = Catalog::load_standard(&self.inner.config.storage.keywords_dir);
        self.record_skipped(&catalog);
        catalog
    }

    /// Catalog over user-selected keyword files
    pub fn selected_catalog(&self, paths: &[PathBuf]) -> Catalog {
        let catalog = Catalog::load_from_paths(paths);
        self.record_skipped(&catalog);
        catalog
    }

    /// Resolve selected keyword file names
    ///
    /// Each name is looked up in the keywords folder first, then in the
    /// uploaded keywords folder. Names found in neither are dropped.
    pub fn resolve_keyword_files(&self, names: &[String]) -> Vec<PathBuf> {
        let storage = &self.inner.config.storage;
        names
            .iter()
            .filter(|name| is_plain_file_name(name))
            .filter_map(|name| {
                let found = [&storage.keywords_dir, &storage.uploaded_keywords_dir]
                    .into_iter()
                    .map(|dir| dir.join(name))
                    .find(|path| path.is_file());
                if found.is_none() {
                    tracing::debug!(file = %name, "Selected keyword file not found");
                }
                found
            })
            .collect()
    }

    /// Run a batch, waiting for any running batch to finish first
    pub async fn run_batch(&self, document_ids: Vec<String>, catalog: Arc<Catalog>) -> Vec<BatchResult> {
        let _guard = self.inner.batch_lock.lock().await;
        self.inner.orchestrator.run_batch(document_ids, catalog).await
    }

    /// Ask the running batch to stop before its next document
    pub fn stop_batch(&self) {
        tracing::info!("Stop requested for running batch");
        self.inner.orchestrator.stop_handle().stop();
    }

    fn record_skipped(&self, catalog: &Catalog) {
        for skipped in catalog.skipped_sources() {
            self.inner
                .error_log
                .record(format!("Error loading keywords: {}", skipped));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::document::MemoryAccess;

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let config = Config {
            storage: StorageConfig::rooted_at(dir.path()),
            ..Config::default()
        };
        AppState::new(config, Arc::new(MemoryAccess)).unwrap()
    }

    #[test]
    fn test_new_creates_folders() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        assert!(state.config().storage.upload_dir.is_dir());
        assert!(state.config().storage.error_log_dir.is_dir());
    }

    #[test]
    fn test_keyword_files_resolve_keywords_folder_first() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let storage = &state.config().storage;
        std::fs::write(storage.keywords_dir.join("drugs.csv"), "aspirin").unwrap();
        std::fs::write(storage.uploaded_keywords_dir.join("drugs.csv"), "other").unwrap();
        std::fs::write(storage.uploaded_keywords_dir.join("mine.csv"), "rash").unwrap();

        let names: Vec<String> = ["drugs.csv", "mine.csv", "missing.csv", "../drugs.csv"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let paths = state.resolve_keyword_files(&names);

        assert_eq!(
            paths,
            vec![
                storage.keywords_dir.join("drugs.csv"),
                storage.uploaded_keywords_dir.join("mine.csv"),
            ]
        );
    }

    #[test]
    fn test_unreadable_keyword_file_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let missing = dir.path().join("gone.csv");

        let catalog = state.selected_catalog(&[missing]);

        assert!(catalog.is_empty());
        assert_eq!(state.error_log().entries().unwrap().len(), 1);
    }
}
