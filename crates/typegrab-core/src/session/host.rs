//! Engine host adapter backed by the session's file table

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use super::FileTable;
use crate::engine::{CompilerOptions, EngineHost};

/// Answers engine queries from the file table, falling through to the
/// filesystem for anything the session has not observed
#[derive(Debug)]
pub struct SessionHost {
    table: Arc<RwLock<FileTable>>,
    root: PathBuf,
}

impl SessionHost {
    #[must_use]
    pub fn new(table: Arc<RwLock<FileTable>>, root: impl Into<PathBuf>) -> Self {
        Self {
            table,
            root: root.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl EngineHost for SessionHost {
    fn file_names(&self) -> Vec<PathBuf> {
        self.table.read().file_names()
    }

    fn version(&self, path: &Path) -> u64 {
        self.table.read().version(path)
    }

    fn snapshot(&self, path: &Path) -> Option<Arc<str>> {
        if let Some(record) = self.table.read().get(path) {
            return Some(Arc::clone(&record.text));
        }
        self.read_file(path).map(Arc::from)
    }

    /// `lib` directory of the `typescript` package nearest the project root
    fn default_lib_location(&self, _options: &CompilerOptions) -> Option<PathBuf> {
        self.root
            .ancestors()
            .map(|dir| dir.join("node_modules/typescript/lib"))
            .find(|lib| lib.join("lib.d.ts").is_file())
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }

    fn read_directory(&self, path: &Path) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(path) else {
            return Vec::new();
        };
        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
        paths.sort();
        paths
    }
}
