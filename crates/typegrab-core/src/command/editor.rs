//! Editor, clipboard and notification collaborators

use std::ops::Range;
use std::path::PathBuf;

use async_trait::async_trait;

use super::CopyTypeError;
use crate::line_index::{LineIndex, Position};

/// Read-only view of the active editor at command time
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    /// `None` for untitled buffers
    pub path: Option<PathBuf>,
    pub text: String,
    pub cursor: Position,
    /// Selection anchor and active end, if any
    pub selection: Option<(Position, Position)>,
}

impl EditorSnapshot {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>, cursor: Position) -> Self {
        Self {
            path: Some(path.into()),
            text: text.into(),
            cursor,
            selection: None,
        }
    }

    #[must_use]
    pub fn with_selection(mut self, start: Position, end: Position) -> Self {
        self.selection = Some((start, end));
        self
    }
}

/// Destination for copied text. Failures are the sink's own business.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write(&self, text: &str);
}

/// Transient user-facing messages
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// What a command resolves: an offset, the symbol text shown in messages,
/// and the position used as the cache key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub offset: usize,
    pub symbol: String,
    pub position: Position,
}

impl Target {
    /// Derive the target from a non-empty selection, else the word under the
    /// cursor
    ///
    /// # Errors
    /// Returns [`CopyTypeError::NoSelection`] when neither is available.
    pub fn from_editor(editor: &EditorSnapshot) -> Result<Self, CopyTypeError> {
        let index = LineIndex::new(editor.text.as_str());

        if let Some((anchor, active)) = editor.selection {
            let (start, end) = if anchor <= active {
                (anchor, active)
            } else {
                (active, anchor)
            };
            if let (Some(from), Some(to)) = (index.offset(start), index.offset(end)) {
                let symbol = editor.text[from..to].trim();
                if !symbol.is_empty() {
                    let leading = editor.text[from..to].len()
                        - editor.text[from..to].trim_start().len();
                    return Ok(Self {
                        offset: from + leading,
                        symbol: symbol.to_string(),
                        position: start,
                    });
                }
            }
        }

        let cursor = index
            .offset(editor.cursor)
            .ok_or(CopyTypeError::NoSelection)?;
        let word = word_at(&editor.text, cursor).ok_or(CopyTypeError::NoSelection)?;
        Ok(Self {
            offset: word.start,
            symbol: editor.text[word].to_string(),
            position: editor.cursor,
        })
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Byte range of the identifier-like word touching `offset`.
///
/// A cursor just after the last character of a word still counts as on it.
#[must_use]
pub fn word_at(text: &str, offset: usize) -> Option<Range<usize>> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }
    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| is_word_char(*ch))
        .last()
        .map_or(offset, |(i, _)| i);
    let end = text[offset..]
        .char_indices()
        .find(|(_, ch)| !is_word_char(*ch))
        .map_or(text.len(), |(i, _)| offset + i);
    (start < end).then_some(start..end)
}
