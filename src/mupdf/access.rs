//! MuPDF document facility
//!
//! Each `open` creates a fresh `PdfDocument`. MuPDF documents are not
//! thread-safe, so the returned handle is neither `Send` nor `Sync` and
//! stays on the blocking worker that opened it.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use mupdf::pdf::{AnnotationColor, PdfDocument, PdfPage, PdfWriteOptions};
use mupdf::{Page, TextPageOptions};

use super::annotation;
use super::geometry::{quad_bounds, PageTransform};
use crate::document::{
    AccessError, AccessResult, ColorTag, DocumentAccess, DocumentHandle, Rect, SaveOptions,
};

/// Garbage collection level used when compacting (MuPDF `-gggg`)
const GARBAGE_LEVEL: i32 = 4;

/// Upper bound on search hits per needle per page
const MAX_SEARCH_HITS: u32 = 512;

/// Opens PDFs through MuPDF
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfAccess;

impl MupdfAccess {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentAccess for MupdfAccess {
    fn open(&self, path: &Path) -> AccessResult<Box<dyn DocumentHandle>> {
        let open_error = |e: mupdf::Error| AccessError::Open(format!("{}: {}", path.display(), e));
        let doc = PdfDocument::open(&path.to_string_lossy()).map_err(open_error)?;
        let page_count = doc.page_count().map_err(open_error)?;

        Ok(Box::new(MupdfHandle {
            doc,
            page_count: page_count.max(0) as usize,
            transforms: HashMap::new(),
            added: BTreeMap::new(),
        }))
    }
}

struct MupdfHandle {
    doc: PdfDocument,
    page_count: usize,
    /// Page-space to user-space maps, loaded on first highlight
    transforms: HashMap<i32, PageTransform>,
    /// Colors of the highlights appended per page, in `/Annots` order
    added: BTreeMap<i32, Vec<ColorTag>>,
}

impl MupdfHandle {
    fn load(&self, page: usize) -> AccessResult<Page> {
        if page >= self.page_count {
            return Err(AccessError::PageNotFound {
                index: page,
                count: self.page_count,
            });
        }
        Ok(self.doc.load_page(page as i32)?)
    }

    fn transform(&mut self, page: usize) -> AccessResult<PageTransform> {
        let index = page as i32;
        if let Some(transform) = self.transforms.get(&index) {
            return Ok(*transform);
        }

        let ctm = PdfPage::try_from(self.load(page)?)?.ctm()?;
        let transform = PageTransform::inverse_of([ctm.a, ctm.b, ctm.c, ctm.d, ctm.e, ctm.f])
            .ok_or_else(|| {
                AccessError::Annotation(format!("page {} has a degenerate transform", page + 1))
            })?;
        self.transforms.insert(index, transform);
        Ok(transform)
    }

    /// Have MuPDF write appearance streams for the highlights added here
    ///
    /// Re-applying the color marks each annotation dirty, so the page update
    /// stores its synthesized `/AP` in the document.
    fn write_appearances(&mut self) -> AccessResult<()> {
        let annotation_error = |e: mupdf::Error| AccessError::Annotation(e.to_string());

        for (&index, colors) in &self.added {
            let mut page = PdfPage::try_from(self.doc.load_page(index)?)?;
            let annots: Vec<_> = page.annotations().collect();
            let ours = annots.len().saturating_sub(colors.len());

            for (mut annot, color) in annots.into_iter().skip(ours).zip(colors) {
                annot
                    .set_color(AnnotationColor::Rgb {
                        red: color.r,
                        green: color.g,
                        blue: color.b,
                    })
                    .map_err(annotation_error)?;
            }
            page.update().map_err(annotation_error)?;
        }
        Ok(())
    }
}

impl DocumentHandle for MupdfHandle {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn extract_text(&mut self, page: usize) -> AccessResult<String> {
        let text_page = self
            .load(page)?
            .to_text_page(TextPageOptions::empty())
            .map_err(|e| AccessError::TextExtraction(e.to_string()))?;

        let mut text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                text.extend(line.chars().filter_map(|ch| ch.char()));
                text.push('\n');
            }
        }
        Ok(text)
    }

    fn search_text(&mut self, page: usize, needle: &str) -> AccessResult<Vec<Rect>> {
        let hits = self
            .load(page)?
            .search(needle, MAX_SEARCH_HITS)
            .map_err(|e| AccessError::Search(e.to_string()))?;

        Ok(hits
            .iter()
            .map(quad_bounds)
            .filter(|rect| !rect.is_empty())
            .collect())
    }

    fn add_highlight(&mut self, page: usize, rect: Rect, color: ColorTag) -> AccessResult<()> {
        let quad = self.transform(page)?.to_user(rect);
        let index = page as i32;

        let mut page_obj = self
            .doc
            .find_page(index)
            .map_err(|e| AccessError::Annotation(e.to_string()))?;
        annotation::append_highlight(&mut self.doc, &mut page_obj, &quad, color)
            .map_err(|e| AccessError::Annotation(e.to_string()))?;

        self.added.entry(index).or_default().push(color);
        Ok(())
    }

    fn save(&mut self, path: &Path, options: SaveOptions) -> AccessResult<()> {
        self.write_appearances()?;

        let mut write_options = PdfWriteOptions::default();
        if options.compact {
            write_options.set_garbage_level(GARBAGE_LEVEL);
        }
        write_options.set_compress(options.compress);

        self.doc
            .save_with_options(&path.to_string_lossy(), write_options)
            .map_err(|e| AccessError::Save(format!("{}: {}", path.display(), e)))
    }
}
