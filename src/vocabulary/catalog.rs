//! Keyword catalog
//!
//! The catalog owns every keyword of one search request, its highlight
//! color and the trie used to scan page text. It is built once and never
//! mutated afterwards; a new request builds a new catalog.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use super::category::Category;
use super::source::{InvalidSourceError, VocabularySource};
use crate::document::ColorTag;
use crate::matcher::KeywordTrie;

/// One registered keyword
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordEntry {
    /// Keyword as first registered (trimmed, original case)
    pub keyword: String,
    /// Category of the registering source
    pub category: Category,
    pub color: ColorTag,
}

/// Per-source load summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub source_id: String,
    pub category: Category,
    /// Keywords added by this source
    pub added: usize,
    /// Keywords already registered by an earlier source
    pub duplicates: usize,
}

/// Built, read-only keyword catalog
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<KeywordEntry>,
    trie: KeywordTrie,
    sources: Vec<SourceSummary>,
    skipped: Vec<InvalidSourceError>,
}

impl Catalog {
    /// Load sources in order
    ///
    /// The first source to register a keyword decides its color. Sources
    /// that cannot be read are logged and skipped; they are listed in
    /// [`Catalog::skipped_sources`].
    pub fn load<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = VocabularySource>,
    {
        let mut builder = CatalogBuilder::default();
        for source in sources {
            let color = source.category.color();
            builder.add_source(&source, color);
        }
        builder.build()
    }

    /// Load hand-picked keyword files, ignoring categories
    ///
    /// Every keyword gets the default marker color.
    pub fn load_from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut builder = CatalogBuilder::default();
        for path in paths {
            let name = path
                .as_ref()
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let source = VocabularySource::from_file(path, Category::Custom(name));
            builder.add_source(&source, ColorTag::MARKER);
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by id
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this catalog.
    pub fn entry(&self, id: u32) -> &KeywordEntry {
        &self.entries[id as usize]
    }

    /// Entry for a keyword, compared case-insensitively
    pub fn lookup(&self, keyword: &str) -> Option<&KeywordEntry> {
        self.trie.get(keyword.trim()).map(|id| self.entry(id))
    }

    /// Color of a keyword, compared case-insensitively
    pub fn color_of(&self, keyword: &str) -> Option<ColorTag> {
        self.lookup(keyword).map(|e| e.color)
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn sources(&self) -> &[SourceSummary] {
        &self.sources
    }

    /// Sources that could not be read
    pub fn skipped_sources(&self) -> &[InvalidSourceError] {
        &self.skipped
    }

    pub(crate) fn trie(&self) -> &KeywordTrie {
        &self.trie
    }
}

#[derive(Default)]
struct CatalogBuilder {
    entries: Vec<KeywordEntry>,
    trie: KeywordTrie,
    sources: Vec<SourceSummary>,
    skipped: Vec<InvalidSourceError>,
}

impl CatalogBuilder {
    fn add_source(&mut self, source: &VocabularySource, color: ColorTag) {
        let keywords = match source.keywords() {
            Ok(keywords) => keywords,
            Err(e) => {
                tracing::warn!(source_id = %source.id, error = %e, "Skipping keyword source");
                self.skipped.push(e);
                return;
            }
        };

        let mut summary = SourceSummary {
            source_id: source.id.clone(),
            category: source.category.clone(),
            added: 0,
            duplicates: 0,
        };

        for keyword in keywords {
            let id = self.entries.len() as u32;
            if self.trie.insert(&keyword, id) {
                self.entries.push(KeywordEntry {
                    keyword,
                    category: source.category.clone(),
                    color,
                });
                summary.added += 1;
            } else {
                summary.duplicates += 1;
            }
        }

        tracing::debug!(
            source_id = %summary.source_id,
            category = %summary.category,
            added = summary.added,
            duplicates = summary.duplicates,
            "Loaded keyword source"
        );
        self.sources.push(summary);
    }

    fn build(self) -> Catalog {
        let per_category = self.entries.iter().fold(HashMap::new(), |mut acc, e| {
            *acc.entry(e.category.base_category().to_string()).or_insert(0usize) += 1;
            acc
        });
        tracing::info!(
            keywords = self.entries.len(),
            sources = self.sources.len(),
            skipped = self.skipped.len(),
            categories = per_category.len(),
            "Keyword catalog built"
        );

        Catalog {
            entries: self.entries,
            trie: self.trie,
            sources: self.sources,
            skipped: self.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_wins() {
        let catalog = Catalog::load(vec![
            VocabularySource::from_lines("a", ["shock"], Category::AdverseEvent),
            VocabularySource::from_lines("b", ["Shock"], Category::Drug),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.color_of("shock"), Some(ColorTag::RED));
        assert_eq!(catalog.lookup("SHOCK").unwrap().keyword, "shock");
        assert_eq!(catalog.sources()[1].duplicates, 1);
    }

    #[test]
    fn test_duplicates_within_source_collapse() {
        let catalog = Catalog::load(vec![VocabularySource::from_lines(
            "a",
            ["aspirin", " Aspirin ", "ASPIRIN"],
            Category::Drug,
        )]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.sources()[0].added, 1);
        assert_eq!(catalog.sources()[0].duplicates, 2);
    }

    #[test]
    fn test_missing_source_is_skipped_not_fatal() {
        let catalog = Catalog::load(vec![
            VocabularySource::from_file("/nonexistent/drugs.csv", Category::Drug),
            VocabularySource::from_lines("patients", ["elderly"], Category::Patient),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.skipped_sources().len(), 1);
        assert_eq!(catalog.skipped_sources()[0].source_id, "drugs.csv");
        assert_eq!(catalog.color_of("elderly"), Some(ColorTag::LIGHT_BLUE));
    }

    #[test]
    fn test_localized_source_uses_base_color() {
        let catalog = Catalog::load(vec![VocabularySource::from_lines(
            "drugs_jp.csv",
            ["アスピリン"],
            Category::Drug.localized(),
        )]);
        assert_eq!(catalog.color_of("アスピリン"), Some(ColorTag::GREEN));
    }

    #[test]
    fn test_load_from_paths_uses_uniform_color() {
        let dir = tempfile::tempdir().unwrap();
        let drugs = dir.path().join("drugs.csv");
        let custom = dir.path().join("my terms.txt");
        std::fs::write(&drugs, "aspirin\n").unwrap();
        std::fs::write(&custom, "fatigue\nnausea\n").unwrap();

        let catalog = Catalog::load_from_paths([&drugs, &custom]);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.entries().iter().all(|e| e.color == ColorTag::MARKER));
    }

    #[test]
    fn test_load_from_paths_skips_missing_file() {
        let catalog = Catalog::load_from_paths(["/nonexistent/terms.txt"]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.skipped_sources().len(), 1);
    }
}
