//! Standard keyword folder layout
//!
//! The keywords folder holds one file per category:
//!
//! | file                          | category        |
//! |-------------------------------|-----------------|
//! | `drugs.csv`                   | drug            |
//! | `patients.csv`                | patient         |
//! | `SS_general AE terms.csv`     | adverse-event   |
//! | `Disease_Symptoms1..9.csv`    | symptom 1..9    |
//! | `<base>_jp.csv`               | localized base  |
//!
//! Localized files are discovered by scanning the folder. A localized file
//! whose base is not in the table keeps the default marker color.

use std::path::Path;

use super::catalog::Catalog;
use super::category::{Category, SYMPTOM_PARTS};
use super::source::VocabularySource;

/// Suffix of localized keyword files
pub const LOCALIZED_FILE_SUFFIX: &str = "_jp.csv";

/// Declared files in registration order
pub fn standard_files() -> Vec<(String, Category)> {
    let mut files = vec![
        ("drugs.csv".to_string(), Category::Drug),
        ("patients.csv".to_string(), Category::Patient),
        ("SS_general AE terms.csv".to_string(), Category::AdverseEvent),
    ];
    for part in 1..=SYMPTOM_PARTS {
        files.push((format!("Disease_Symptoms{}.csv", part), Category::Symptom(part)));
    }
    files
}

/// Category for a file name in the standard layout
pub fn category_for_file(file_name: &str) -> Option<Category> {
    if let Some(stem) = file_name.strip_suffix(LOCALIZED_FILE_SUFFIX) {
        let base_name = format!("{}.csv", stem);
        let base = category_for_file(&base_name).unwrap_or(Category::Custom(stem.to_string()));
        return Some(base.localized());
    }

    standard_files()
        .into_iter()
        .find(|(name, _)| name == file_name)
        .map(|(_, category)| category)
}

/// Sources for a keywords folder: declared files first, then every
/// localized file found in the folder (sorted by name)
pub fn standard_sources(dir: &Path) -> Vec<VocabularySource> {
    let mut sources = Vec::new();

    for (name, category) in standard_files() {
        let path = dir.join(&name);
        if path.is_file() {
            sources.push(VocabularySource::from_file(path, category));
        } else {
            tracing::debug!(file = %name, "Keyword file not found");
        }
    }

    let mut localized: Vec<String> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(LOCALIZED_FILE_SUFFIX))
            .collect(),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Cannot scan keywords folder");
            Vec::new()
        }
    };
    localized.sort();

    for name in localized {
        if let Some(category) = category_for_file(&name) {
            tracing::debug!(file = %name, category = %category, "Found localized keyword file");
            sources.push(VocabularySource::from_file(dir.join(&name), category));
        }
    }

    sources
}

impl Catalog {
    /// Load the standard keywords folder
    pub fn load_standard(dir: &Path) -> Self {
        Catalog::load(standard_sources(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ColorTag;

    #[test]
    fn test_category_for_file() {
        assert_eq!(category_for_file("drugs.csv"), Some(Category::Drug));
        assert_eq!(
            category_for_file("Disease_Symptoms4.csv"),
            Some(Category::Symptom(4))
        );
        assert_eq!(
            category_for_file("patients_jp.csv"),
            Some(Category::Patient.localized())
        );
        assert_eq!(
            category_for_file("devices_jp.csv"),
            Some(Category::Custom("devices".into()).localized())
        );
        assert_eq!(category_for_file("notes.txt"), None);
    }

    #[test]
    fn test_load_standard_folder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("drugs.csv"), "aspirin\nshock\n").unwrap();
        std::fs::write(dir.path().join("SS_general AE terms.csv"), "shock\nrash\n").unwrap();
        std::fs::write(dir.path().join("Disease_Symptoms2.csv"), "fever\n").unwrap();
        std::fs::write(dir.path().join("drugs_jp.csv"), "アスピリン\n").unwrap();
        std::fs::write(dir.path().join("devices_jp.csv"), "カテーテル\n").unwrap();
        std::fs::write(dir.path().join("ignored.csv"), "nothing\n").unwrap();

        let catalog = Catalog::load_standard(dir.path());

        assert_eq!(catalog.color_of("aspirin"), Some(ColorTag::GREEN));
        // drugs.csv registers before the AE terms file
        assert_eq!(catalog.color_of("shock"), Some(ColorTag::GREEN));
        assert_eq!(catalog.color_of("rash"), Some(ColorTag::RED));
        assert_eq!(catalog.color_of("fever"), Some(ColorTag::YELLOW));
        assert_eq!(catalog.color_of("アスピリン"), Some(ColorTag::GREEN));
        assert_eq!(catalog.color_of("カテーテル"), Some(ColorTag::MARKER));
        assert!(catalog.lookup("nothing").is_none());
        assert!(catalog.skipped_sources().is_empty());
    }

    #[test]
    fn test_missing_folder_yields_empty_catalog() {
        let catalog = Catalog::load_standard(Path::new("/nonexistent/keywords"));
        assert!(catalog.is_empty());
    }
}
