//! Last-hover cache for the "hover then copy" workflow

use std::path::{Path, PathBuf};

use super::RenderedType;
use crate::line_index::Position;

/// Default same-line distance, in characters, within which a cached result
/// is reused
pub const DEFAULT_TOLERANCE: u32 = 10;

#[derive(Debug, Clone)]
struct Entry {
    path: PathBuf,
    position: Position,
    rendered: RenderedType,
}

/// Holds the most recent resolution only.
///
/// A lookup on the same file and line within `tolerance` characters returns
/// the cached result, accepting that an edit in between may make it stale.
#[derive(Debug, Clone)]
pub struct HoverCache {
    tolerance: u32,
    last: Option<Entry>,
}

impl Default for HoverCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl HoverCache {
    #[must_use]
    pub fn new(tolerance: u32) -> Self {
        Self {
            tolerance,
            last: None,
        }
    }

    #[must_use]
    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    #[must_use]
    pub fn lookup(&self, path: &Path, position: Position) -> Option<&RenderedType> {
        let entry = self.last.as_ref()?;
        let near = entry.path == path
            && entry.position.line == position.line
            && entry.position.character.abs_diff(position.character) <= self.tolerance;
        near.then_some(&entry.rendered)
    }

    pub fn store(&mut self, path: &Path, position: Position, rendered: RenderedType) {
        self.last = Some(Entry {
            path: path.to_path_buf(),
            position,
            rendered,
        });
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
