//! Keyword sources
//!
//! A source is one keyword list: an identifier, where its lines come from
//! and the category its keywords belong to.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::category::Category;

/// A declared keyword source could not be read
#[derive(Debug, Clone, Error)]
#[error("Invalid keyword source {source_id}: {reason}")]
pub struct InvalidSourceError {
    pub source_id: String,
    pub reason: String,
}

/// Where a source's raw lines come from
#[derive(Debug, Clone)]
pub enum KeywordOrigin {
    /// Lines already in memory
    Lines(Vec<String>),
    /// UTF-8 text file, one keyword per line
    File(PathBuf),
}

/// One keyword list with its category
#[derive(Debug, Clone)]
pub struct VocabularySource {
    pub id: String,
    pub origin: KeywordOrigin,
    pub category: Category,
}

impl VocabularySource {
    /// Source from in-memory lines
    pub fn from_lines<I, S>(id: impl Into<String>, lines: I, category: Category) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            origin: KeywordOrigin::Lines(lines.into_iter().map(Into::into).collect()),
            category,
        }
    }

    /// Source backed by a file; the id is the file name
    pub fn from_file<P: AsRef<Path>>(path: P, category: Category) -> Self {
        let path = path.as_ref().to_path_buf();
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            id,
            origin: KeywordOrigin::File(path),
            category,
        }
    }

    /// Trimmed, non-empty keyword lines
    pub fn keywords(&self) -> Result<Vec<String>, InvalidSourceError> {
        let raw = match &self.origin {
            KeywordOrigin::Lines(lines) => lines.clone(),
            KeywordOrigin::File(path) => std::fs::read_to_string(path)
                .map_err(|e| InvalidSourceError {
                    source_id: self.id.clone(),
                    reason: format!("{}: {}", path.display(), e),
                })?
                .lines()
                .map(str::to_string)
                .collect(),
        };

        Ok(raw
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
