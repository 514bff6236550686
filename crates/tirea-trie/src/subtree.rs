// Named sub-automata

use hashbrown::HashMap;

use crate::TrieError;
use crate::node::{Edge, Node};

/// Sub-automata by name, referenced from the trie by `$name` edges.
pub type SubtreeMap = HashMap<String, Node>;

/// Check that every `$name` reachable from `root` or from any registered
/// subtree is registered.
pub fn validate_references(root: &Node, subtrees: &SubtreeMap) -> Result<(), TrieError> {
    let mut missing = None;
    let mut check = |node: &Node| {
        if let Edge::SubTree(name) = &node.edge {
            if missing.is_none() && !subtrees.contains_key(name) {
                missing = Some(name.clone());
            }
        }
    };

    root.visit(&mut check);
    for tree in subtrees.values() {
        tree.visit(&mut check);
    }

    match missing {
        Some(name) => Err(TrieError::UnknownSubtree(name)),
        None => Ok(()),
    }
}
