//! Versioned file text cache

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Text of one file as last observed by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub text: Arc<str>,
    /// Bumped by one each time the observed text changes
    pub version: u64,
}

/// File records for the active project
#[derive(Debug, Default)]
pub struct FileTable {
    records: HashMap<PathBuf, FileRecord>,
    roots: Vec<PathBuf>,
}

impl FileTable {
    /// A table whose program starts out as `roots`
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            records: HashMap::new(),
            roots,
        }
    }

    /// Return the record for `path`, replacing it only if `text` differs.
    ///
    /// The first observation of a path gets version 1.
    pub fn get_or_update(&mut self, path: &Path, text: &str) -> FileRecord {
        if let Some(record) = self.records.get_mut(path) {
            if &*record.text != text {
                record.text = Arc::from(text);
                record.version += 1;
                tracing::debug!("{} changed, now version {}", path.display(), record.version);
            }
            return record.clone();
        }

        let record = FileRecord {
            path: path.to_path_buf(),
            text: Arc::from(text),
            version: 1,
        };
        self.records.insert(path.to_path_buf(), record.clone());
        if !self.roots.iter().any(|root| root == path) {
            self.roots.push(path.to_path_buf());
        }
        record
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&FileRecord> {
        self.records.get(path)
    }

    /// Version of `path`, `0` when it has never been observed
    #[must_use]
    pub fn version(&self, path: &Path) -> u64 {
        self.records.get(path).map_or(0, |r| r.version)
    }

    /// Discovered files plus any file observed since
    #[must_use]
    pub fn file_names(&self) -> Vec<PathBuf> {
        self.roots.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
