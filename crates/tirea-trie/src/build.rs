// Tree construction DSL
//
// Rule generators describe an entry as a sequence of tokens, each of which
// may list alternatives separated by `|`:
//
//     build_tree(&["$np", "tì-", "fm", "<us>", "etok", "=392:n."])
//     build_tree(&["fì-|tsa-|pe+", "$np2"])

use crate::TrieError;
use crate::node::{Edge, Node};

/// An empty `Root`.
pub fn empty_tree() -> Node {
    Node::new(Edge::Root)
}

/// Build a chain of edges under a new `Root`.
///
/// Each token is split on `|` and every alternative is appended to every
/// current leaf, so alternatives multiply into parallel branches. Empty
/// tokens are skipped. `/hook` markers are left in place for a later
/// [`Node::and_then`].
pub fn build_tree(tokens: &[&str]) -> Node {
    let mut root = empty_tree();
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        let alternatives: Vec<Node> = token.split('|').map(Node::parse).collect();
        root.push_at_leaves(&alternatives);
    }
    root
}

/// Merge trees into a fresh `Root`, returning the first rejection.
pub fn try_combine_trees(trees: impl IntoIterator<Item = Node>) -> Result<Node, TrieError> {
    let mut combined = empty_tree();
    for tree in trees {
        if let Err(rejected) = combined.try_merge(tree) {
            return Err(TrieError::MergeRejected {
                target: combined.edge.to_string(),
                other: rejected.edge.to_string(),
            });
        }
    }
    Ok(combined)
}

/// Merge trees into a fresh `Root`.
///
/// # Panics
///
/// If any tree is rejected. The inputs are expected to be `Root` trees from
/// [`build_tree`] contributing to one paradigm.
pub fn combine_trees(trees: impl IntoIterator<Item = Node>) -> Node {
    match try_combine_trees(trees) {
        Ok(tree) => tree,
        Err(err) => panic!("combine_trees: {err}"),
    }
}
