//! Document-access facility
//!
//! The pipeline consumes documents through [`DocumentAccess`] and never
//! reimplements parsing. Two backends ship with the crate:
//!
//! - [`crate::mupdf::MupdfAccess`]: real PDFs via MuPDF
//! - [`MemoryAccess`]: JSON-backed text pages with synthetic geometry
//!
//! # Usage
//!
//! ```rust,ignore
//! use keyword_highlighter::document::{DocumentAccess, SaveOptions};
//! use keyword_highlighter::mupdf::MupdfAccess;
//!
//! let mut doc = MupdfAccess::new().open(Path::new("report.pdf"))?;
//! for page in 0..doc.page_count() {
//!     for rect in doc.search_text(page, "aspirin")? {
//!         doc.add_highlight(page, rect, ColorTag::GREEN)?;
//!     }
//! }
//! doc.save(Path::new("report.highlighted.pdf"), SaveOptions::default())?;
//! ```

mod error;
pub mod memory;
mod traits;
mod types;

pub use error::{AccessError, AccessResult};
pub use memory::{MemoryAccess, MemoryDocument, MemoryPage};
pub use traits::{DocumentAccess, DocumentHandle};
pub use types::{ColorTag, Rect, SaveOptions};
