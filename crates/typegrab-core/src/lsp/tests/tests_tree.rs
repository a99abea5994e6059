//! Tests for the selection-range chain tree

#![allow(clippy::expect_used)]

use async_lsp::lsp_types::{Position as LspPosition, Range, SelectionRange, Url};

use crate::engine::{NodeId, SyntaxTree, TextRange};
use crate::line_index::{LineIndex, Position};
use crate::lsp::ChainTree;
use crate::resolve::find_node_at;

const SOURCE: &str = "const r = load(x);\nr.then();";

fn uri() -> Url {
    Url::parse("file:///project/main.ts").expect("valid url")
}

fn selection(ranges: &[((u32, u32), (u32, u32))]) -> Option<SelectionRange> {
    ranges.iter().rev().fold(None, |parent, &(start, end)| {
        Some(SelectionRange {
            range: Range::new(
                LspPosition::new(start.0, start.1),
                LspPosition::new(end.0, end.1),
            ),
            parent: parent.map(Box::new),
        })
    })
}

#[test]
fn test_chain_from_selection_is_outermost_first() {
    let index = LineIndex::new(SOURCE);
    // Innermost first: `x`, `load(x)`, the declaration, the whole file
    let chain = selection(&[
        ((0, 15), (0, 16)),
        ((0, 10), (0, 17)),
        ((0, 0), (0, 18)),
        ((0, 0), (1, 9)),
    ]);

    let tree = ChainTree::from_selection(uri(), &index, chain.as_ref());

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.range(tree.root()), TextRange::new(0, SOURCE.len()));
    assert_eq!(tree.range(NodeId(1)), TextRange::new(0, 18));
    assert_eq!(tree.range(NodeId(2)), TextRange::new(10, 17));
    assert_eq!(tree.range(NodeId(3)), TextRange::new(15, 16));
    assert_eq!(tree.start(NodeId(3)), Position::new(0, 15));
}

#[test]
fn test_parent_links_follow_the_chain() {
    let index = LineIndex::new(SOURCE);
    let tree = ChainTree::from_ranges(
        uri(),
        &index,
        [TextRange::new(0, 18), TextRange::new(10, 17)],
    );

    assert_eq!(tree.parent(NodeId(2)), Some(NodeId(1)));
    assert_eq!(tree.parent(NodeId(1)), Some(NodeId(0)));
    assert_eq!(tree.parent(tree.root()), None);

    let mut children = Vec::new();
    tree.for_each_child(NodeId(2), &mut |child| children.push(child));
    assert!(children.is_empty());
}

#[test]
fn test_duplicate_empty_and_stray_ranges_are_dropped() {
    let index = LineIndex::new(SOURCE);
    let tree = ChainTree::from_ranges(
        uri(),
        &index,
        [
            TextRange::new(0, SOURCE.len()),
            TextRange::new(0, 18),
            TextRange::new(0, 18),
            TextRange::new(20, 25),
            TextRange::new(12, 12),
            TextRange::new(10, 17),
        ],
    );

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.range(NodeId(2)), TextRange::new(10, 17));
}

#[test]
fn test_innermost_node_is_found() {
    let index = LineIndex::new(SOURCE);
    let tree = ChainTree::from_ranges(
        uri(),
        &index,
        [TextRange::new(0, 18), TextRange::new(10, 17), TextRange::new(15, 16)],
    );

    assert_eq!(find_node_at(&tree, 15), Some(NodeId(3)));
    assert_eq!(tree.start(NodeId(2)), Position::new(0, 10));
}

#[test]
fn test_no_selection_leaves_only_the_root() {
    let index = LineIndex::new(SOURCE);

    let tree = ChainTree::from_selection(uri(), &index, None);

    assert_eq!(tree.len(), 1);
    assert_eq!(find_node_at(&tree, 3), Some(tree.root()));
    assert_eq!(tree.uri().path(), "/project/main.ts");
}
