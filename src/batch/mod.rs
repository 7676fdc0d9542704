//! Batch processing of uploaded documents

mod archive;
mod orchestrator;
mod uploads;

pub use archive::{ArchiveError, ArchiveResult, Archiver};
pub use orchestrator::{BatchOrchestrator, BatchResult, Outcome, StopHandle, STOPPED_REASON};
pub use uploads::{is_plain_file_name, list_uploaded};
