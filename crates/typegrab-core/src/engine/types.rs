//! Value types shared between the core and engine backends

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Resolved compiler options: option name to JSON value
pub type CompilerOptions = BTreeMap<String, serde_json::Value>;

/// Handle to a node inside an engine-owned syntax tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Half-open byte range `[start, end)` into a file's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `offset` falls inside the range (end exclusive)
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether `self` is at least as specific as `other`.
    ///
    /// A later start always wins; with the same start the shorter range wins,
    /// and equal ranges count as tighter so the innermost node is kept.
    #[must_use]
    pub const fn is_tighter_than(&self, other: &Self) -> bool {
        self.start > other.start || (self.start == other.start && self.end <= other.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
