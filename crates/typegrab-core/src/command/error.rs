//! Command error taxonomy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CopyTypeError {
    /// No editor is focused, or the file has no resolvable project
    #[error("no active editor context: {0}")]
    NoActiveContext(String),

    /// Nothing selected and no word under the cursor
    #[error("no selection or word at cursor")]
    NoSelection,

    /// The engine had no useful type for the symbol
    #[error("no type information available for `{symbol}`")]
    TypeUnavailable { symbol: String },

    #[error("failed to resolve type: {0:#}")]
    EngineFailure(#[from] anyhow::Error),
}
