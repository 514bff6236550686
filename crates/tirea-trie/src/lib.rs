//! Morphology trie for the tirea Na'vi analyzer.
//!
//! Dictionary entries are compiled into small rule-trees with a token DSL,
//! merged into one shared-prefix trie, and walked by a backtracking matcher
//! that returns every valid analysis of a word.
//!
//! # Architecture
//!
//! - [`node`] -- Edge kinds, the owned tree, merge and compaction
//! - [`build`] -- Tree construction DSL (`build_tree`, `combine_trees`)
//! - [`infix`] -- Infix candidate rules and slot groups
//! - [`subtree`] -- Named sub-automata shared between entries
//! - [`runner`] -- Single-word matching and running-text extraction

pub mod build;
pub mod infix;
pub mod node;
pub mod runner;
pub mod subtree;

pub use build::{build_tree, combine_trees, empty_tree, try_combine_trees};
pub use infix::{InfixRule, InfixTable};
pub use node::{Edge, Node, NodeKind};
pub use runner::{LenitionState, PhraseMap, Runner};
pub use subtree::SubtreeMap;

/// Error type for trie construction and validation.
#[derive(Debug, thiserror::Error)]
pub enum TrieError {
    #[error("unknown subtree: ${0}")]
    UnknownSubtree(String),
    #[error("cannot merge {other} into {target}")]
    MergeRejected {
        target: String,
        other: String,
    },
}
