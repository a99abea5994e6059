//! Syntax-node chain built from LSP selection ranges

use async_lsp::lsp_types::{Position as LspPosition, SelectionRange, Url};

use crate::engine::{NodeId, SyntaxTree, TextRange};
use crate::line_index::{LineIndex, Position};

#[derive(Debug, Clone)]
struct ChainNode {
    range: TextRange,
    start: Position,
}

/// The nodes enclosing one offset, outermost first.
///
/// Node 0 spans the whole file; each later node is the only child of the one
/// before it. This is all of the tree a type query at that offset can reach.
#[derive(Debug, Clone)]
pub struct ChainTree {
    uri: Url,
    nodes: Vec<ChainNode>,
}

impl ChainTree {
    /// Build from a selection range, innermost first as servers send it
    #[must_use]
    pub fn from_selection(
        uri: Url,
        index: &LineIndex,
        selection: Option<&SelectionRange>,
    ) -> Self {
        let mut ranges = Vec::new();
        let mut current = selection;
        while let Some(range) = current {
            let start = index.offset(from_lsp(range.range.start));
            let end = index.offset(from_lsp(range.range.end));
            if let (Some(start), Some(end)) = (start, end) {
                ranges.push(TextRange::new(start, end));
            }
            current = range.parent.as_deref();
        }
        ranges.reverse();
        Self::from_ranges(uri, index, ranges)
    }

    /// Build from byte ranges, outermost first.
    ///
    /// Empty ranges, ranges equal to their predecessor and ranges that do not
    /// nest inside it are dropped.
    #[must_use]
    pub fn from_ranges(
        uri: Url,
        index: &LineIndex,
        ranges: impl IntoIterator<Item = TextRange>,
    ) -> Self {
        let whole = TextRange::new(0, index.text().len());
        let mut nodes = vec![ChainNode {
            range: whole,
            start: Position::new(0, 0),
        }];

        for range in ranges {
            let last = nodes[nodes.len() - 1].range;
            let nested = range.start >= last.start && range.end <= last.end;
            if range.is_empty() || range == last || !nested {
                continue;
            }
            nodes.push(ChainNode {
                range,
                start: index.position(range.start),
            });
        }

        Self { uri, nodes }
    }

    #[must_use]
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Position of the first character of `node`, where hovers are requested
    #[must_use]
    pub fn start(&self, node: NodeId) -> Position {
        self.nodes[node.index()].start
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn from_lsp(position: LspPosition) -> Position {
    Position::new(position.line, position.character)
}

impl SyntaxTree for ChainTree {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn range(&self, node: NodeId) -> TextRange {
        self.nodes[node.index()].range
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        node.0.checked_sub(1).map(NodeId)
    }

    fn for_each_child(&self, node: NodeId, f: &mut dyn FnMut(NodeId)) {
        let child = node.index() + 1;
        if child < self.nodes.len() {
            f(NodeId(child as u32));
        }
    }
}
