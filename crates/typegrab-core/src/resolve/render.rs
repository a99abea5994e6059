//! Type rendering with the single-level parent fallback

use anyhow::Result;

use super::find_node_at;
use crate::engine::{AnalysisEngine, NodeId, SyntaxTree, TextRange};

/// The top type; carries no information worth copying
pub const UNINFORMATIVE_TYPE: &str = "any";

/// Engine formatting switches
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderFlags {
    /// Expand type aliases in place instead of naming them
    pub expand_aliases: bool,
    /// Never elide long types with `...`
    pub no_truncation: bool,
    /// `Array<T>` rather than `T[]`
    pub generic_array_syntax: bool,
    /// Expand structurally when no named form exists
    pub structural_fallback: bool,
    /// Include type arguments of signatures
    pub signature_type_arguments: bool,
    /// Allow aliases declared outside the node's scope to be named
    pub out_of_scope_aliases: bool,
}

/// Named flag combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPreset {
    /// Self-contained output: no `import(...)` qualifiers, nothing elided
    #[default]
    Portable,
    /// Alias expansion and no truncation only
    Compact,
}

impl RenderPreset {
    #[must_use]
    pub const fn flags(self) -> RenderFlags {
        match self {
            Self::Portable => RenderFlags {
                expand_aliases: true,
                no_truncation: true,
                generic_array_syntax: true,
                structural_fallback: true,
                signature_type_arguments: true,
                out_of_scope_aliases: true,
            },
            Self::Compact => RenderFlags {
                expand_aliases: true,
                no_truncation: true,
                generic_array_syntax: false,
                structural_fallback: false,
                signature_type_arguments: false,
                out_of_scope_aliases: false,
            },
        }
    }
}

impl std::str::FromStr for RenderPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portable" => Ok(Self::Portable),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown render preset: {other}")),
        }
    }
}

/// A type string produced for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedType {
    pub text: String,
    /// Range of the node whose type was rendered
    pub node_range: TextRange,
    /// Whether the parent fallback supplied the text
    pub from_parent: bool,
}

impl RenderedType {
    #[must_use]
    pub fn is_informative(&self) -> bool {
        is_informative(&self.text)
    }
}

/// Whether a rendered type is worth handing to the user
#[must_use]
pub fn is_informative(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text != UNINFORMATIVE_TYPE
}

/// Render the type of `node`, or `None` when the engine has no type for it
///
/// # Errors
/// Returns an error if the engine query fails.
pub async fn render_node<E: AnalysisEngine>(
    engine: &E,
    tree: &E::Tree,
    node: NodeId,
    flags: RenderFlags,
) -> Result<Option<String>> {
    let rendered = engine
        .type_at_node(tree, node)
        .await?
        .map(|ty| engine.render_type(&ty, tree, node, flags));
    Ok(rendered)
}

/// Resolve the node at `offset` and render its type.
///
/// When the node renders as `any` its parent is tried once; the parent's text
/// wins only if it differs from the child's and is not `any` itself.
///
/// # Errors
/// Returns an error if an engine query fails.
pub async fn resolve_type<E: AnalysisEngine>(
    engine: &E,
    tree: &E::Tree,
    offset: usize,
    flags: RenderFlags,
) -> Result<Option<RenderedType>> {
    let Some(node) = find_node_at(tree, offset) else {
        tracing::debug!("No node at offset {}", offset);
        return Ok(None);
    };
    let Some(text) = render_node(engine, tree, node, flags).await? else {
        tracing::debug!("Engine has no type for node at {}", tree.range(node));
        return Ok(None);
    };

    if text == UNINFORMATIVE_TYPE {
        if let Some(parent) = tree.parent(node) {
            if let Some(parent_text) = render_node(engine, tree, parent, flags).await? {
                if parent_text != text && parent_text != UNINFORMATIVE_TYPE {
                    tracing::debug!("Using parent type for node at {}", tree.range(node));
                    return Ok(Some(RenderedType {
                        text: parent_text,
                        node_range: tree.range(parent),
                        from_parent: true,
                    }));
                }
            }
        }
    }

    Ok(Some(RenderedType {
        text,
        node_range: tree.range(node),
        from_parent: false,
    }))
}
