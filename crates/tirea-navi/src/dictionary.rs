// Dictionary: the merged trie plus the tables it runs against
//
// Entries arrive as compiled rule-trees (see `tirea_trie::build_tree`) and
// are merged into one shared-prefix trie. Phrases are stored as templates
// derived by analysing their text with the dictionary itself, so a phrase
// can only be added once all of its words are present.

use log::{debug, warn};
use tirea_core::analysis::{Analysis, simplest_result_set};
use tirea_core::character::trim_punctuation;
use tirea_trie::subtree::validate_references;
use tirea_trie::{InfixTable, Node, PhraseMap, Runner, SubtreeMap, TrieError, empty_tree};

use crate::tables::{ADPOSITION_SUBTREE, default_infix_table, default_subtree_map};
use crate::{Analyzer, DictionaryError};

/// A Na'vi dictionary.
///
/// Lookups borrow the dictionary immutably and allocate their own
/// [`Runner`], so a built dictionary can be shared between threads.
#[derive(Debug, Clone)]
pub struct Dictionary {
    root: Node,
    subtrees: SubtreeMap,
    infixes: InfixTable,
    phrases: PhraseMap,
    sorted: bool,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    /// An empty dictionary with the default infix groups and sub-automata.
    pub fn new() -> Self {
        Self::with_tables(default_subtree_map(), default_infix_table())
    }

    /// An empty dictionary over custom tables.
    pub fn with_tables(subtrees: SubtreeMap, infixes: InfixTable) -> Self {
        Self {
            root: empty_tree(),
            subtrees,
            infixes,
            phrases: PhraseMap::new(),
            sorted: false,
        }
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Merge one rule-tree into the trie.
    pub fn insert(&mut self, tree: Node) {
        absorb(&mut self.root, tree);
        self.sorted = false;
    }

    /// Register a sub-automaton, or merge into the one already registered
    /// under `name`.
    pub fn insert_subtree(&mut self, name: &str, tree: Node) {
        match self.subtrees.get_mut(name) {
            Some(existing) => absorb(existing, tree),
            None => {
                debug!("new subtree ${name}");
                self.subtrees.insert(name.to_string(), tree);
            }
        }
    }

    /// Merge a suffix rule derived from an adposition into the shared
    /// adposition family.
    pub fn insert_adposition(&mut self, tree: Node) {
        self.insert_subtree(ADPOSITION_SUBTREE, tree);
    }

    /// Register a multi-word phrase.
    ///
    /// `text` is analysed strictly, word by word, without phrase folding,
    /// and the simplest analysis of each word becomes the template slot.
    pub fn add_phrase(&mut self, id: &str, text: &str) -> Result<(), DictionaryError> {
        if trim_punctuation(text).is_empty() {
            return Err(DictionaryError::EmptyPhrase { id: id.to_string() });
        }
        let parsed = Runner::new(&self.root, &self.subtrees, &self.infixes).extract_strict(text);
        let Some(results) = parsed else {
            warn!("phrase {id} ({text:?}) does not parse");
            return Err(DictionaryError::UnparseablePhrase {
                id: id.to_string(),
                text: text.to_string(),
            });
        };

        let template = simplest_result_set(&results);
        if template.is_empty() {
            return Err(DictionaryError::EmptyPhrase { id: id.to_string() });
        }
        debug!("phrase {id}: {} words", template.len());
        self.phrases.insert(id.to_string(), template);
        Ok(())
    }

    /// Join single-child raw chains and sort the trie.
    pub fn optimize(&mut self) {
        let before = self.root.size();
        self.root.compact();
        self.root.sort_children();
        self.sorted = true;
        debug!("optimized trie: {before} -> {} nodes", self.root.size());
    }

    /// Check that every `$name` reference resolves.
    pub fn validate(&self) -> Result<(), TrieError> {
        validate_references(&self.root, &self.subtrees)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// A runner over this dictionary, with phrase folding enabled.
    pub fn runner(&self) -> Runner<'_> {
        Runner::new(&self.root, &self.subtrees, &self.infixes).with_phrases(&self.phrases)
    }

    /// All analyses of one word.
    pub fn lookup(&self, word: &str) -> Vec<Analysis> {
        self.runner().run(word)
    }

    /// Analyse running text, skipping unknown words and folding phrases.
    pub fn extract(&self, text: &str) -> Vec<Analysis> {
        self.runner().extract(text)
    }

    /// Analyse running text that must match word for word.
    pub fn extract_strict(&self, text: &str) -> Option<Vec<Analysis>> {
        self.runner().extract_strict(text)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Number of nodes in the main trie.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// True after [`Dictionary::optimize`] until the next insertion.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn phrases(&self) -> &PhraseMap {
        &self.phrases
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn subtrees(&self) -> &SubtreeMap {
        &self.subtrees
    }

    pub fn infixes(&self) -> &InfixTable {
        &self.infixes
    }
}

impl Analyzer for Dictionary {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        self.lookup(word)
    }
}

/// Merge `tree` into `target`, or attach it below when the edges differ.
fn absorb(target: &mut Node, tree: Node) {
    if let Err(tree) = target.try_merge(tree) {
        target.adopt(tree);
    }
}
