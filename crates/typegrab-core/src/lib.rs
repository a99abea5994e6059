//! typegrab-core: Resolve the inferred type at a source position
//!
//! This library sits on top of an existing static-analysis engine. Given a
//! file and a byte offset it finds the most specific syntax node there, asks
//! the engine for the node's type, and renders it as a self-contained string
//! suitable for pasting back into source.
//!
//! # Components
//!
//! - [`project`] - locate the project root, its compiler options and sources
//! - [`session`] - long-lived engine session with a versioned file cache
//! - [`resolve`] - node lookup, type rendering and the parent fallback
//! - [`command`] - the copy commands and their editor/clipboard collaborators
//! - [`lsp`] - an engine backend driving a TypeScript language server

pub mod command;
pub mod engine;
pub mod line_index;
pub mod lsp;
pub mod project;
pub mod resolve;
pub mod session;

// Re-export commonly used types
pub use command::{
    Clipboard, CommandKind, CommandOutcome, CopierConfig, CopyTypeError, EditorSnapshot,
    Notifier, TypeCopier,
};
pub use engine::{AnalysisEngine, EngineBackend, EngineHost, NodeId, SyntaxTree, TextRange};
pub use line_index::{LineIndex, Position};
pub use lsp::{LspBackend, LspServerConfig};
pub use project::{ProjectResolver, ProjectRoot, SourceFileSet, WalkConfig};
pub use resolve::{RenderFlags, RenderPreset, RenderedType};
pub use session::{AnalysisSession, FileRecord};
