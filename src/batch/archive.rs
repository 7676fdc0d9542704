//! Archival of previous outputs
//!
//! Before a batch writes new highlighted copies, everything left in the
//! output folder by the last batch moves into its own timestamped folder
//! under the archive directory. Nothing is deleted.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

/// Archival failure
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot read output directory {path}: {source}")]
    ReadOutputs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create archive directory {path}: {source}")]
    CreateArchive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for archival
pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;

/// Moves previous outputs out of the way
#[derive(Debug, Clone)]
pub struct Archiver {
    output_dir: PathBuf,
    archive_dir: PathBuf,
}

impl Archiver {
    pub fn new(output_dir: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            archive_dir: archive_dir.into(),
        }
    }

    /// Move every entry of the output folder into a new archive folder
    ///
    /// Returns the folder the entries went to, or `None` when there was
    /// nothing to archive.
    pub fn archive_outputs(&self) -> ArchiveResult<Option<PathBuf>> {
        let entries = match std::fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ArchiveError::ReadOutputs {
                    path: self.output_dir.clone(),
                    source,
                })
            }
        };

        let sources = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|source| ArchiveError::ReadOutputs {
                path: self.output_dir.clone(),
                source,
            })?;

        if sources.is_empty() {
            return Ok(None);
        }

        let run_dir = self.create_run_dir()?;
        for from in &sources {
            let Some(name) = from.file_name() else {
                continue;
            };
            let to = run_dir.join(name);
            move_entry(from, &to).map_err(|source| ArchiveError::Move {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
        }

        tracing::info!(
            archived = sources.len(),
            destination = %run_dir.display(),
            "Archived previous outputs"
        );
        Ok(Some(run_dir))
    }

    fn create_run_dir(&self) -> ArchiveResult<PathBuf> {
        let create_error = |path: &Path, source| ArchiveError::CreateArchive {
            path: path.to_path_buf(),
            source,
        };

        std::fs::create_dir_all(&self.archive_dir)
            .map_err(|e| create_error(&self.archive_dir, e))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut suffix = 0u32;
        loop {
            let name = if suffix == 0 {
                stamp.clone()
            } else {
                format!("{}-{}", stamp, suffix)
            };
            let candidate = self.archive_dir.join(name);
            match std::fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
                Err(e) => return Err(create_error(&candidate, e)),
            }
        }
    }
}

/// Rename, falling back to copy + remove across filesystems
fn move_entry(from: &Path, to: &Path) -> io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) if from.is_file() => {
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archiver(dir: &tempfile::TempDir) -> Archiver {
        Archiver::new(dir.path().join("highlighted"), dir.path().join("previous"))
    }

    #[test]
    fn test_nothing_to_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archiver = archiver(&dir);

        assert_eq!(archiver.archive_outputs().unwrap(), None);
        std::fs::create_dir_all(dir.path().join("highlighted")).unwrap();
        assert_eq!(archiver.archive_outputs().unwrap(), None);
        assert!(!dir.path().join("previous").exists());
    }

    #[test]
    fn test_outputs_move_to_timestamped_folder() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("highlighted");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("a.pdf"), b"a").unwrap();
        std::fs::write(out.join("b.pdf"), b"b").unwrap();

        let run_dir = archiver(&dir).archive_outputs().unwrap().unwrap();

        assert!(run_dir.starts_with(dir.path().join("previous")));
        assert_eq!(std::fs::read(run_dir.join("a.pdf")).unwrap(), b"a");
        assert_eq!(std::fs::read(run_dir.join("b.pdf")).unwrap(), b"b");
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_same_second_runs_get_distinct_folders() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("highlighted");
        let archiver = archiver(&dir);

        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("a.pdf"), b"first").unwrap();
        let first = archiver.archive_outputs().unwrap().unwrap();

        std::fs::write(out.join("a.pdf"), b"second").unwrap();
        let second = archiver.archive_outputs().unwrap().unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(first.join("a.pdf")).unwrap(), b"first");
        assert_eq!(std::fs::read(second.join("a.pdf")).unwrap(), b"second");
    }
}
