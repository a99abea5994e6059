//! Host adapter interface the engine uses to see the world

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::types::CompilerOptions;

/// Queries an engine makes against its host.
///
/// The file list, versions and snapshots come from the session's file table;
/// the remaining queries pass through to the filesystem.
pub trait EngineHost: Send + Sync {
    /// Every path the engine should treat as part of the program
    fn file_names(&self) -> Vec<PathBuf>;

    /// Version token for `path`; `0` for files never observed by the session
    fn version(&self, path: &Path) -> u64;

    /// Current text of `path`, from the cache or else from disk
    fn snapshot(&self, path: &Path) -> Option<Arc<str>>;

    /// Directory holding the default type-definition library
    fn default_lib_location(&self, options: &CompilerOptions) -> Option<PathBuf>;

    fn file_exists(&self, path: &Path) -> bool;

    fn read_file(&self, path: &Path) -> Option<String>;

    fn read_directory(&self, path: &Path) -> Vec<PathBuf>;
}
