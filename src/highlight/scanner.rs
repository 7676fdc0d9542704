//! Page scanner
//!
//! Scans one page: extract text, find keyword matches, then search the page
//! for each matched keyword verbatim and highlight every rectangle found.
//!
//! The text offsets of a match only tell which keyword matched. Placement
//! comes from a separate geometric search for the keyword string, because
//! extracted-text offsets do not line up with glyph geometry across line
//! wraps and ligatures. A keyword therefore gets one search per page and
//! every verbatim occurrence on the page is highlighted.

use std::collections::HashSet;

use serde::Serialize;

use super::error::PageProcessingError;
use super::script::ScriptHint;
use crate::document::{ColorTag, DocumentHandle};
use crate::matcher::find_all;
use crate::vocabulary::Catalog;

/// Result of scanning one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageScan {
    /// 0-indexed page
    pub page: usize,
    /// Textual matches found
    pub matches: usize,
    /// Distinct keywords searched on the page
    pub keywords: usize,
    /// Highlights applied
    pub regions: usize,
    /// Only computed on the first page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_hint: Option<ScriptHint>,
}

/// Scans pages against one catalog
pub struct PageScanner<'c> {
    catalog: &'c Catalog,
}

impl<'c> PageScanner<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Scan and annotate page `page` (0-indexed) of `doc`
    pub fn scan(
        &self,
        doc: &mut dyn DocumentHandle,
        page: usize,
    ) -> Result<PageScan, PageProcessingError> {
        let fail = |source| PageProcessingError {
            page: page + 1,
            source,
        };

        let text = doc.extract_text(page).map_err(fail)?;
        let script_hint = (page == 0).then(|| ScriptHint::detect(&text));

        // Distinct keywords in first-match order
        let mut seen = HashSet::new();
        let mut keywords: Vec<(&str, ColorTag)> = Vec::new();
        let mut matches = 0;
        for span in find_all(&text, self.catalog) {
            matches += 1;
            if seen.insert(span.entry) {
                keywords.push((span.keyword, span.color));
            }
        }

        // Locate every keyword before annotating; a failed search leaves the
        // page untouched
        let mut placements = Vec::new();
        for (keyword, color) in &keywords {
            let rects = doc.search_text(page, keyword).map_err(fail)?;
            if rects.is_empty() {
                tracing::debug!(page = page + 1, keyword = %keyword, "Match not locatable on page");
            }
            placements.extend(rects.into_iter().map(|rect| (rect, *color)));
        }

        for (rect, color) in &placements {
            doc.add_highlight(page, *rect, *color).map_err(fail)?;
        }
        let regions = placements.len();

        tracing::debug!(
            page = page + 1,
            matches,
            keywords = keywords.len(),
            regions,
            "Scanned page"
        );

        Ok(PageScan {
            page,
            matches,
            keywords: keywords.len(),
            regions,
            script_hint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::document::{
        AccessError, AccessResult, DocumentAccess, MemoryAccess, MemoryDocument, MemoryPage, Rect,
        SaveOptions,
    };
    use crate::vocabulary::{Category, VocabularySource};

    fn catalog() -> Catalog {
        Catalog::load(vec![
            VocabularySource::from_lines("drugs", ["aspirin"], Category::Drug),
            VocabularySource::from_lines("ae", ["heart failure", "rash"], Category::AdverseEvent),
        ])
    }

    /// One-page handle whose search fails for `broken`
    struct BrokenSearch {
        text: &'static str,
        broken: &'static str,
        highlights: usize,
    }

    impl DocumentHandle for BrokenSearch {
        fn page_count(&self) -> usize {
            1
        }

        fn extract_text(&mut self, _page: usize) -> AccessResult<String> {
            Ok(self.text.to_string())
        }

        fn search_text(&mut self, _page: usize, needle: &str) -> AccessResult<Vec<Rect>> {
            if needle == self.broken {
                return Err(AccessError::Search(format!("cannot search for {}", needle)));
            }
            Ok(vec![Rect::new(0.0, 0.0, 10.0, 10.0)])
        }

        fn add_highlight(&mut self, _page: usize, _rect: Rect, _color: ColorTag) -> AccessResult<()> {
            self.highlights += 1;
            Ok(())
        }

        fn save(&mut self, _path: &Path, _options: SaveOptions) -> AccessResult<()> {
            Ok(())
        }
    }

    fn open(dir: &tempfile::TempDir, doc: MemoryDocument) -> Box<dyn DocumentHandle> {
        let path = dir.path().join("doc.pdf");
        doc.write_to(&path).unwrap();
        MemoryAccess.open(&path).unwrap()
    }

    #[test]
    fn test_highlights_keyword_with_catalog_color() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = open(&dir, MemoryDocument::from_texts(["Patient took aspirin daily."]));
        let catalog = catalog();

        let scan = PageScanner::new(&catalog).scan(doc.as_mut(), 0).unwrap();
        assert_eq!(scan.matches, 1);
        assert_eq!(scan.regions, 1);

        let out = dir.path().join("out.pdf");
        doc.save(&out, Default::default()).unwrap();
        let saved = MemoryDocument::read_from(&out).unwrap();
        let (page, highlight) = saved.highlights().next().unwrap();
        assert_eq!(page, 0);
        assert_eq!(highlight.color, ColorTag::GREEN);
    }

    #[test]
    fn test_repeated_keyword_searched_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = open(
            &dir,
            MemoryDocument::from_texts(["aspirin\nmore aspirin\nASPIRIN"]),
        );
        let catalog = catalog();

        let scan = PageScanner::new(&catalog).scan(doc.as_mut(), 0).unwrap();
        assert_eq!(scan.matches, 3);
        assert_eq!(scan.keywords, 1);
        assert_eq!(scan.regions, 3);
    }

    #[test]
    fn test_wrapped_match_yields_no_region() {
        let dir = tempfile::tempdir().unwrap();
        // Extracted text joins the wrap, the rendered lines do not
        let mut doc = open(&dir, MemoryDocument::from_texts(["acute heart\nfailure"]));
        let catalog = catalog();

        let scan = PageScanner::new(&catalog).scan(doc.as_mut(), 0).unwrap();
        assert_eq!(scan.matches, 1);
        assert_eq!(scan.regions, 0);
    }

    #[test]
    fn test_script_hint_only_on_first_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = open(&dir, MemoryDocument::from_texts(["頭痛", "頭痛"]));
        let catalog = catalog();
        let scanner = PageScanner::new(&catalog);

        assert_eq!(scanner.scan(doc.as_mut(), 0).unwrap().script_hint, Some(ScriptHint::Cjk));
        assert_eq!(scanner.scan(doc.as_mut(), 1).unwrap().script_hint, None);
    }

    #[test]
    fn test_unreadable_page_is_page_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = open(
            &dir,
            MemoryDocument {
                pages: vec![MemoryPage::new("rash"), MemoryPage::unreadable()],
                compacted: false,
            },
        );
        let catalog = catalog();

        let err = PageScanner::new(&catalog).scan(doc.as_mut(), 1).unwrap_err();
        assert_eq!(err.page, 2);
    }

    #[test]
    fn test_failed_search_leaves_page_unannotated() {
        let catalog = catalog();
        let mut doc = BrokenSearch {
            text: "aspirin then rash",
            broken: "rash",
            highlights: 0,
        };

        let err = PageScanner::new(&catalog).scan(&mut doc, 0).unwrap_err();

        assert_eq!(err.page, 1);
        assert_eq!(doc.highlights, 0);
    }
}
