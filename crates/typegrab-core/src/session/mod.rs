//! Session module: Long-lived engine session
//!
//! Owns the engine instance for the active project root together with the
//! file table the engine reads through its host adapter. Text that has not
//! changed keeps its version, so the engine never re-parses untouched files.

mod analysis;
mod files;
mod host;

pub use analysis::AnalysisSession;
pub use files::{FileRecord, FileTable};
pub use host::SessionHost;
