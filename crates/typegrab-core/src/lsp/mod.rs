//! LSP module: Engine backend driving a TypeScript language server
//!
//! The server does the actual analysis. Selection ranges around the queried
//! offset stand in for the syntax-node chain, and hover text supplies each
//! node's type.

mod backend;
mod client;
mod config;
mod hover;
mod state;
mod tree;

pub use backend::{LspBackend, LspEngine};
pub use client::LspClient;
pub use config::{DEFAULT_READY_TIMEOUT, LspServerConfig, MAX_HOVER_LENGTH};
pub use hover::{is_truncated, render_hover_type, strip_import_qualifiers, type_from_hover};
pub use tree::ChainTree;

#[cfg(test)]
mod tests;
