//! Engine module: Capability interface to the static-analysis engine
//!
//! The resolver only ever sees an engine through these traits: a read-only
//! syntax tree, a type query, and a type renderer. Backends adapt a concrete
//! engine (see [`crate::lsp`]) to them.

mod host;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use host::EngineHost;
pub use traits::{AnalysisEngine, EngineBackend, SyntaxTree};
pub use types::{CompilerOptions, NodeId, TextRange};
