//! Na'vi language module for the tirea morphology analyzer.
//!
//! # Architecture
//!
//! - [`tables`] -- Infix groups and the shared case-ending sub-automata
//! - [`dictionary`] -- The dictionary trie, phrases and lookup entry points

pub mod dictionary;
pub mod tables;

pub use dictionary::Dictionary;
pub use tirea_core::Analysis;

use tirea_trie::TrieError;

/// Error type for dictionary construction.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("phrase {id} has no words")]
    EmptyPhrase { id: String },
    #[error("phrase {id} does not parse word by word: {text:?}")]
    UnparseablePhrase {
        id: String,
        text: String,
    },
    #[error(transparent)]
    Trie(#[from] TrieError),
}

/// Trait for morphological analyzers.
pub trait Analyzer {
    /// All valid analyses of one word. An unknown word gives an empty list.
    fn analyze(&self, word: &str) -> Vec<Analysis>;
}
