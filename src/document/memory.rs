//! In-memory document facility
//!
//! Documents are lists of text pages held in memory and persisted as JSON.
//! Geometry is synthetic: every character occupies a fixed-size cell, one
//! line per row. Used for dry runs and tests where no PDF engine is wanted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{AccessError, AccessResult};
use super::traits::{DocumentAccess, DocumentHandle};
use super::types::{ColorTag, Rect, SaveOptions};

/// Width of one character cell
pub const CELL_WIDTH: f32 = 6.0;
/// Height of one line
pub const LINE_HEIGHT: f32 = 12.0;

/// A highlight applied to an in-memory page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHighlight {
    pub rect: Rect,
    pub color: ColorTag,
}

/// One page of an in-memory document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryPage {
    pub text: String,
    #[serde(default)]
    pub highlights: Vec<MemoryHighlight>,
    /// Simulates a page whose text layer cannot be read
    #[serde(default)]
    pub unreadable: bool,
}

impl MemoryPage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn unreadable() -> Self {
        Self {
            unreadable: true,
            ..Default::default()
        }
    }
}

/// In-memory document, serialized as JSON on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub pages: Vec<MemoryPage>,
    /// Options used by the last save
    #[serde(default)]
    pub compacted: bool,
}

impl MemoryDocument {
    /// Build a document from page texts
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: texts.into_iter().map(MemoryPage::new).collect(),
            compacted: false,
        }
    }

    pub fn read_from(path: &Path) -> AccessResult<Self> {
        let data = std::fs::read(path)
            .map_err(|e| AccessError::Open(format!("{}: {}", path.display(), e)))?;
        serde_json::from_slice(&data)
            .map_err(|e| AccessError::Open(format!("{}: {}", path.display(), e)))
    }

    pub fn write_to(&self, path: &Path) -> AccessResult<()> {
        let data =
            serde_json::to_vec(self).map_err(|e| AccessError::Save(e.to_string()))?;
        std::fs::write(path, data)
            .map_err(|e| AccessError::Save(format!("{}: {}", path.display(), e)))
    }

    /// All highlights across pages, with their page index
    pub fn highlights(&self) -> impl Iterator<Item = (usize, &MemoryHighlight)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.highlights.iter().map(move |h| (i, h)))
    }
}

/// Document facility over [`MemoryDocument`] files
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryAccess;

impl DocumentAccess for MemoryAccess {
    fn open(&self, path: &Path) -> AccessResult<Box<dyn DocumentHandle>> {
        let document = MemoryDocument::read_from(path)?;
        Ok(Box::new(MemoryHandle { document }))
    }
}

struct MemoryHandle {
    document: MemoryDocument,
}

impl MemoryHandle {
    fn page(&mut self, index: usize) -> AccessResult<&mut MemoryPage> {
        let count = self.document.pages.len();
        self.document
            .pages
            .get_mut(index)
            .ok_or(AccessError::PageNotFound { index, count })
    }
}

impl DocumentHandle for MemoryHandle {
    fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    fn extract_text(&mut self, page: usize) -> AccessResult<String> {
        let page = self.page(page)?;
        if page.unreadable {
            return Err(AccessError::TextExtraction("page has no readable text layer".into()));
        }
        Ok(page.text.clone())
    }

    fn search_text(&mut self, page: usize, needle: &str) -> AccessResult<Vec<Rect>> {
        let page = self.page(page)?;
        if page.unreadable {
            return Err(AccessError::Search("page has no readable text layer".into()));
        }
        Ok(line_search(&page.text, needle))
    }

    fn add_highlight(&mut self, page: usize, rect: Rect, color: ColorTag) -> AccessResult<()> {
        self.page(page)?.highlights.push(MemoryHighlight { rect, color });
        Ok(())
    }

    fn save(&mut self, path: &Path, options: SaveOptions) -> AccessResult<()> {
        self.document.compacted = options.compact && options.compress;
        self.document.write_to(path)
    }
}

/// Case-insensitive search line by line; a needle split across lines is
/// not found, like a rendered page.
fn line_search(text: &str, needle: &str) -> Vec<Rect> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut rects = Vec::new();
    for (row, line) in text.lines().enumerate() {
        let line: Vec<char> = line.chars().flat_map(char::to_lowercase).collect();
        let mut col = 0;
        while col + needle.len() <= line.len() {
            if line[col..col + needle.len()] == needle[..] {
                rects.push(Rect::new(
                    col as f32 * CELL_WIDTH,
                    row as f32 * LINE_HEIGHT,
                    needle.len() as f32 * CELL_WIDTH,
                    LINE_HEIGHT,
                ));
                col += needle.len();
            } else {
                col += 1;
            }
        }
    }
    rects
}
