//! Highlighting pipeline
//!
//! [`PageScanner`] annotates one page; [`DocumentProcessor`] drives it over a
//! whole document and saves the annotated copy.

mod error;
mod processor;
mod scanner;
mod script;

pub use error::{PageProcessingError, ProcessError, ProcessResult};
pub use processor::{DocumentProcessor, ProcessedDocument};
pub use scanner::{PageScan, PageScanner};
pub use script::ScriptHint;
