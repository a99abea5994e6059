//! Innermost node lookup

use crate::engine::{NodeId, SyntaxTree};

/// Find the most specific node whose range contains `offset`.
///
/// Descends depth-first from the root, entering only children that still
/// contain the offset. Returns `None` when even the root does not (for
/// example an offset at or past the end of the file).
pub fn find_node_at<T: SyntaxTree + ?Sized>(tree: &T, offset: usize) -> Option<NodeId> {
    let root = tree.root();
    if !tree.range(root).contains(offset) {
        return None;
    }
    let mut best = root;
    descend(tree, root, offset, &mut best);
    Some(best)
}

fn descend<T: SyntaxTree + ?Sized>(tree: &T, node: NodeId, offset: usize, best: &mut NodeId) {
    tree.for_each_child(node, &mut |child| {
        let range = tree.range(child);
        if !range.contains(offset) {
            return;
        }
        if range.is_tighter_than(&tree.range(*best)) {
            *best = child;
        }
        descend(tree, child, offset, best);
    });
}
