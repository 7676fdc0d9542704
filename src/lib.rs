//! Keyword Highlighter Library
//!
//! Finds categorized keywords in uploaded PDFs and writes copies with every
//! occurrence highlighted in its category color.
//!
//! # Modules
//!
//! - `vocabulary`: Keyword sources, categories and the catalog
//! - `matcher`: Whole-word, case-insensitive multi-keyword matching
//! - `highlight`: Page scanning and per-document processing
//! - `batch`: Batches over the upload folder, archival of old outputs
//! - `document`: Document-access facility (traits, in-memory implementation)
//! - `mupdf`: Document-access facility backed by MuPDF

pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod error_log;
pub mod highlight;
pub mod matcher;
pub mod mupdf;
pub mod progress;
pub mod routes;
pub mod search;
pub mod state;
pub mod vocabulary;
