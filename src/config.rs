//! Configuration management for the keyword highlighter

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Folders the service reads from and writes to
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Uploaded PDFs
    pub upload_dir: PathBuf,
    /// Standard keyword files
    pub keywords_dir: PathBuf,
    /// Keyword files uploaded by users
    pub uploaded_keywords_dir: PathBuf,
    /// Highlighted copies of the last batch
    pub highlighted_dir: PathBuf,
    /// Highlighted copies of earlier batches
    pub archive_dir: PathBuf,
    pub error_log_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    /// Documents processed at once
    pub batch_workers: usize,
    /// Characters of context on each side of a quick search hit
    pub quick_search_context: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            storage: StorageConfig::default(),
            processing: ProcessingConfig {
                batch_workers: 1,
                quick_search_context: 50,
            },
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            upload_dir: PathBuf::from("uploaded_pdfs"),
            keywords_dir: PathBuf::from("keywords"),
            uploaded_keywords_dir: PathBuf::from("uploaded_keywords"),
            highlighted_dir: PathBuf::from("highlighted_pdfs"),
            archive_dir: PathBuf::from("previous_highlighted_pdfs"),
            error_log_dir: PathBuf::from("error_log"),
        }
    }
}

impl StorageConfig {
    /// All folders rooted under `root`
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let defaults = StorageConfig::default();
        StorageConfig {
            upload_dir: root.join(defaults.upload_dir),
            keywords_dir: root.join(defaults.keywords_dir),
            uploaded_keywords_dir: root.join(defaults.uploaded_keywords_dir),
            highlighted_dir: root.join(defaults.highlighted_dir),
            archive_dir: root.join(defaults.archive_dir),
            error_log_dir: root.join(defaults.error_log_dir),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let defaults = Config::default();
        let dir = |key: &str, default: PathBuf| env::var(key).map(PathBuf::from).unwrap_or(default);

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .unwrap_or(defaults.server.port),
            },
            storage: StorageConfig {
                upload_dir: dir("UPLOAD_DIR", defaults.storage.upload_dir),
                keywords_dir: dir("KEYWORDS_DIR", defaults.storage.keywords_dir),
                uploaded_keywords_dir: dir(
                    "UPLOADED_KEYWORDS_DIR",
                    defaults.storage.uploaded_keywords_dir,
                ),
                highlighted_dir: dir("HIGHLIGHTED_DIR", defaults.storage.highlighted_dir),
                archive_dir: dir("ARCHIVE_DIR", defaults.storage.archive_dir),
                error_log_dir: dir("ERROR_LOG_DIR", defaults.storage.error_log_dir),
            },
            processing: ProcessingConfig {
                batch_workers: env::var("BATCH_WORKERS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|&n: &usize| n > 0)
                    .unwrap_or(defaults.processing.batch_workers),
                quick_search_context: env::var("QUICK_SEARCH_CONTEXT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.processing.quick_search_context),
            },
        })
    }
}
