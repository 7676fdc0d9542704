//! Low-level MuPDF Wrapper
//!
//! Implements the document-access facility on top of the MuPDF library.
//! Search hits come back in page space and are mapped into PDF user space
//! through the inverse page transform before highlights are written.
//!
//! # Thread Safety
//!
//! MuPDF's `fz_context` is **NOT thread-safe**. [`MupdfAccess`] itself holds
//! no MuPDF state and can be shared freely; every `open` creates a fresh
//! document whose handle never leaves the calling thread.
//!
//! # Usage
//!
//! ```rust,ignore
//! use keyword_highlighter::mupdf::MupdfAccess;
//!
//! let access = MupdfAccess::new();
//! let mut doc = access.open(Path::new("in.pdf"))?;
//! let text = doc.extract_text(0)?;
//! ```

mod access;
mod annotation;
mod geometry;

pub use access::MupdfAccess;
