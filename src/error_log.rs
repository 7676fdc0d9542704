//! Durable error record
//!
//! Appends one timestamped line per error to `error_log.txt` for operator
//! review:
//!
//! ```text
//! 2026-10-16 09:14:03.512 - Error opening document broken.pdf: ...
//! ```

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;

/// File name inside the error log directory
pub const ERROR_LOG_FILE: &str = "error_log.txt";

/// Append-only error record
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl ErrorLog {
    /// Open (creating the directory if needed) the record in `dir`
    pub fn open(dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(ERROR_LOG_FILE),
            lock: Arc::new(Mutex::new(())),
        })
    }

    /// Append `message`
    ///
    /// A failure to write is reported through tracing and otherwise
    /// ignored; recording an error must not fail the caller.
    pub fn record(&self, message: impl Display) {
        let line = format!(
            "{} - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            message
        );
        tracing::error!("{}", line.trim_end());

        let _guard = self.lock.lock();
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to append to error log");
        }
    }

    /// Recorded lines, oldest first
    pub fn entries(&self) -> std::io::Result<Vec<String>> {
        let _guard = self.lock.lock();
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
