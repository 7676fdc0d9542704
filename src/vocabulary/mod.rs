//! Keyword vocabularies
//!
//! Loads categorized keyword lists into a [`Catalog`]:
//!
//! - [`Catalog::load`]: ordered sources, colors from each source's category
//! - [`Catalog::load_from_paths`]: hand-picked files, one uniform color
//! - [`Catalog::load_standard`]: the standard keywords folder layout
//!
//! Keywords compare case-insensitively. When two sources register the same
//! keyword the first one keeps it, color included.

mod catalog;
mod category;
mod source;
mod standard;

pub use catalog::{Catalog, KeywordEntry, SourceSummary};
pub use category::{Category, SYMPTOM_PARTS};
pub use source::{InvalidSourceError, KeywordOrigin, VocabularySource};
pub use standard::{category_for_file, standard_files, standard_sources, LOCALIZED_FILE_SUFFIX};
