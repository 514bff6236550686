// Backtracking matcher
//
// `run` walks the trie depth first against one word and collects every
// analysis that reaches a result edge. `extract` segments running text one
// word at a time, keeping the longest matches, and can fold registered
// phrases into single analyses.

use std::collections::BTreeMap;

use bitflags::bitflags;
use log::trace;
use tirea_core::analysis::Analysis;
use tirea_core::character::{at_word_boundary, last_char, next_boundary, trim_punctuation};
use tirea_core::lenition::apply_lenition;

use crate::infix::InfixTable;
use crate::node::{Edge, Node, NodeKind};
use crate::subtree::SubtreeMap;

/// Phrase templates by phrase id, one template slot per word.
pub type PhraseMap = BTreeMap<String, Vec<Analysis>>;

bitflags! {
    /// Whether the next literal may, or must, be read lenited.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LenitionState: u8 {
        const ALLOWED   = 1 << 0;
        const MANDATORY = 1 << 1;
    }
}

// ---------------------------------------------------------------------------
// Walk state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct State<'a, 's> {
    remainder: &'s str,
    lenition: LenitionState,
    /// Last letter of the previous edge. A literal starting with it may also
    /// match with that letter dropped ("me" + "eylan" read as "meylan").
    skippable: &'s str,
    /// The `SubTree` node a `/return` continues from. Only the outermost
    /// entered subtree is recorded.
    return_to: Option<&'a Node>,
}

impl<'s> State<'_, 's> {
    fn start(text: &'s str) -> Self {
        State {
            remainder: text,
            lenition: LenitionState::ALLOWED,
            skippable: "",
            return_to: None,
        }
    }
}

/// The literal itself, then the literal without a leading skippable letter.
fn readings<'t>(text: &'t str, skippable: &str) -> impl Iterator<Item = &'t str> + use<'t> {
    let elided = match skippable {
        "" => None,
        letter => text.strip_prefix(letter),
    };
    std::iter::once(text).chain(elided)
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Matches words and text against a trie.
///
/// A runner borrows its trie and tables and owns only a scratch result
/// buffer and two counters, so any number of runners can share one
/// dictionary.
#[derive(Debug)]
pub struct Runner<'a> {
    root: &'a Node,
    subtrees: &'a SubtreeMap,
    infixes: &'a InfixTable,
    phrases: Option<&'a PhraseMap>,
    results: Vec<Analysis>,
    step_count: u64,
    comparison_count: u64,
}

impl<'a> Runner<'a> {
    pub fn new(root: &'a Node, subtrees: &'a SubtreeMap, infixes: &'a InfixTable) -> Self {
        Self {
            root,
            subtrees,
            infixes,
            phrases: None,
            results: Vec::new(),
            step_count: 0,
            comparison_count: 0,
        }
    }

    /// Enable phrase folding in [`Runner::extract`].
    pub fn with_phrases(mut self, phrases: &'a PhraseMap) -> Self {
        self.phrases = Some(phrases);
        self
    }

    /// Nodes visited since creation.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Literal comparisons made since creation.
    pub fn comparison_count(&self) -> u64 {
        self.comparison_count
    }

    /// All analyses of one word, in trie order.
    ///
    /// # Panics
    ///
    /// If the walk reaches an unregistered subtree or a `/return` outside
    /// of any subtree.
    pub fn run(&mut self, word: &str) -> Vec<Analysis> {
        self.results.clear();
        let lowered = word.to_lowercase();
        let root = self.root;
        self.step(root, State::start(&lowered));

        trace!(
            "run {word:?}: {} results, {} steps, {} comparisons",
            self.results.len(),
            self.step_count,
            self.comparison_count
        );
        self.results.drain(..).collect()
    }

    /// Analyse running text, skipping words that do not match.
    pub fn extract(&mut self, text: &str) -> Vec<Analysis> {
        self.segment(text, false).unwrap_or_default()
    }

    /// Analyse running text that must match word for word. Returns `None`
    /// as soon as a word does not match.
    pub fn extract_strict(&mut self, text: &str) -> Option<Vec<Analysis>> {
        self.segment(text, true)
    }

    fn segment(&mut self, text: &str, strict: bool) -> Option<Vec<Analysis>> {
        self.results.clear();
        let lowered = text.to_lowercase();
        let root = self.root;
        let mut rest = trim_punctuation(&lowered);
        let mut position = 0;

        while !rest.is_empty() {
            let offset = self.results.len();
            self.step(root, State::start(rest));
            position += 1;

            if self.results.len() == offset {
                if strict {
                    trace!("extract {text:?}: no match at word {position}");
                    self.results.clear();
                    return None;
                }
                rest = next_boundary(rest).map_or("", |i| &rest[i..]);
            } else {
                let shortest = self.results[offset..]
                    .iter()
                    .map(|r| r.remainder.len())
                    .min()
                    .unwrap_or(0);
                let mut longest_matches = self.results.split_off(offset);
                longest_matches.retain(|r| r.remainder.len() <= shortest);
                for result in &mut longest_matches {
                    result.position = position;
                }
                self.results.append(&mut longest_matches);
                // Every remainder is a suffix of `rest`.
                rest = &rest[rest.len() - shortest..];
            }
            rest = trim_punctuation(rest);
        }

        for result in &mut self.results {
            result.remainder.clear();
        }
        if position > 1 {
            if let Some(phrases) = self.phrases {
                self.fold_phrases(phrases);
            }
        }

        trace!(
            "extract {text:?}: {} results over {position} words, {} steps",
            self.results.len(),
            self.step_count
        );
        Some(self.results.drain(..).collect())
    }

    // -----------------------------------------------------------------------
    // Phrase folding
    // -----------------------------------------------------------------------

    /// Replace the first block of words matching a phrase template with one
    /// phrase analysis. At most one phrase is folded per call.
    fn fold_phrases(&mut self, phrases: &PhraseMap) {
        for (id, template) in phrases {
            if template.is_empty() || self.results.len() < template.len() {
                continue;
            }
            let Some(start) = self.phrase_start(template) else {
                continue;
            };
            let span = start..start + template.len();

            let mut phrase = Analysis::new(id.clone());
            phrase.position = start;
            for result in &self.results {
                if span.contains(&result.position) {
                    let slot = &template[result.position - start];
                    if result.covered_by(slot) {
                        phrase.add_affixes_from(result, slot);
                    }
                }
            }

            let first = self
                .results
                .iter()
                .position(|r| r.position == start)
                .unwrap_or(0);
            self.results.retain(|r| !span.contains(&r.position));
            self.results.insert(first, phrase);
            trace!("folded phrase {id} at word {start}");
            return;
        }
    }

    /// First word position where every template slot is covered by some
    /// analysis of the corresponding word.
    fn phrase_start(&self, template: &[Analysis]) -> Option<usize> {
        let last = self.results.last()?.position;
        let latest_start = last.checked_sub(template.len() - 1)?;
        (1..=latest_start).find(|&start| {
            template.iter().enumerate().all(|(k, slot)| {
                self.results
                    .iter()
                    .any(|r| r.position == start + k && r.covered_by(slot))
            })
        })
    }

    // -----------------------------------------------------------------------
    // Walk
    // -----------------------------------------------------------------------

    fn step(&mut self, node: &'a Node, state: State<'a, '_>) -> bool {
        self.step_count += 1;

        match &node.edge {
            Edge::Root => {
                self.descend(node, state);
                true
            }
            Edge::Result { id, pos } => {
                self.comparison_count += 1;
                if !at_word_boundary(state.remainder) {
                    return false;
                }
                self.results.push(Analysis {
                    id: id.clone(),
                    pos: pos.clone(),
                    remainder: state.remainder.to_string(),
                    ..Analysis::default()
                });
                true
            }
            Edge::Raw(text) => self.step_raw(node, text, state),
            Edge::Prefix { text, lenites } => self.step_prefix(node, text, *lenites, state),
            Edge::Infix(slot) => self.step_infix(node, slot, state),
            Edge::Suffix { text, alias } => {
                self.step_suffix(node, text, alias.as_deref().unwrap_or(text), state)
            }
            Edge::SubTree(name) => {
                let subtrees = self.subtrees;
                let Some(tree) = subtrees.get(name) else {
                    panic!("unknown subtree ${name}");
                };
                let return_to = state.return_to.or(Some(node));
                self.step(tree, State { return_to, ..state })
            }
            Edge::Return => {
                let Some(target) = state.return_to else {
                    panic!("/return reached outside of a subtree");
                };
                self.descend(
                    target,
                    State {
                        return_to: None,
                        ..state
                    },
                )
            }
            Edge::Particle { text, alias } => {
                self.comparison_count += 1;
                let Some(rest) = state.remainder.strip_prefix(text.as_str()) else {
                    return false;
                };
                if rest.len() == state.remainder.len() {
                    return false;
                }
                let offset = self.results.len();
                self.descend(
                    node,
                    State {
                        remainder: rest,
                        lenition: LenitionState::empty(),
                        skippable: "",
                        ..state
                    },
                );
                let name = alias.as_deref().unwrap_or(text);
                self.prepend_since(offset, |r| &mut r.particles, name);
                true
            }
            Edge::LeafHook => false,
        }
    }

    /// Step into every child; true if any proceeded.
    fn descend(&mut self, node: &'a Node, state: State<'a, '_>) -> bool {
        let mut proceeded = false;
        for child in &node.children {
            proceeded |= self.step(child, state);
        }
        proceeded
    }

    fn prepend_since(
        &mut self,
        offset: usize,
        list: impl Fn(&mut Analysis) -> &mut Vec<String>,
        label: &str,
    ) {
        for result in &mut self.results[offset..] {
            list(result).insert(0, label.to_string());
        }
    }

    fn step_raw(&mut self, node: &'a Node, text: &'a str, state: State<'a, '_>) -> bool {
        let next_skippable = match last_char(text) {
            "s" => "",
            letter => letter,
        };
        let mut proceeded = false;
        let mut lenitable = false;

        if state.lenition.contains(LenitionState::ALLOWED) {
            if text == "'" {
                lenitable = true;
                if !state.remainder.starts_with('\'') {
                    self.step_elided_glottal(node, state);
                    proceeded = true;
                }
            } else {
                let (label, lenited) = apply_lenition(text);
                lenitable = !label.is_empty();
                if lenitable {
                    for reading in readings(&lenited, state.skippable) {
                        self.comparison_count += 1;
                        let Some(rest) = state.remainder.strip_prefix(reading) else {
                            continue;
                        };
                        let offset = self.results.len();
                        self.step_raw_children(node, rest, next_skippable, state);
                        for result in &mut self.results[offset..] {
                            result.lenitions = vec![label.to_string()];
                        }
                        proceeded = true;
                    }
                }
            }
        }

        if !lenitable || !state.lenition.contains(LenitionState::MANDATORY) {
            for reading in readings(text, state.skippable) {
                self.comparison_count += 1;
                if let Some(rest) = state.remainder.strip_prefix(reading) {
                    self.step_raw_children(node, rest, next_skippable, state);
                    proceeded = true;
                }
            }
        }
        proceeded
    }

    fn step_raw_children(
        &mut self,
        node: &'a Node,
        remainder: &str,
        next_skippable: &str,
        state: State<'a, '_>,
    ) {
        for child in &node.children {
            let skippable = match child.kind() {
                NodeKind::Raw => "",
                _ => next_skippable,
            };
            self.step(
                child,
                State {
                    remainder,
                    lenition: LenitionState::empty(),
                    skippable,
                    return_to: state.return_to,
                },
            );
        }
    }

    /// A lenited bare glottal stop disappears: the children match the
    /// remainder directly and the analysis records the lost stop before the
    /// following vowel. It cannot disappear before `rr` or `ll`.
    fn step_elided_glottal(&mut self, node: &'a Node, state: State<'a, '_>) {
        let remainder = state.remainder;
        if remainder.starts_with("rr") || remainder.starts_with("ll") {
            return;
        }
        let label = remainder.chars().next().map(|c| format!("'{c}→{c}"));

        for child in &node.children {
            let offset = self.results.len();
            self.step(
                child,
                State {
                    lenition: LenitionState::empty(),
                    ..state
                },
            );
            if let Some(label) = &label {
                for result in &mut self.results[offset..] {
                    result.lenitions.push(label.clone());
                }
            }
        }
    }

    fn step_prefix(
        &mut self,
        node: &'a Node,
        text: &'a str,
        lenites: bool,
        state: State<'a, '_>,
    ) -> bool {
        let next = State {
            lenition: if lenites {
                LenitionState::ALLOWED | LenitionState::MANDATORY
            } else {
                LenitionState::empty()
            },
            skippable: last_char(text),
            ..state
        };
        let (label, lenited) = apply_lenition(text);
        let offset = self.results.len();
        let mut proceeded = false;

        if !label.is_empty() && state.lenition.contains(LenitionState::ALLOWED) {
            for reading in readings(&lenited, state.skippable) {
                self.comparison_count += 1;
                let Some(rest) = state.remainder.strip_prefix(reading) else {
                    continue;
                };
                let start = self.results.len();
                self.descend(
                    node,
                    State {
                        remainder: rest,
                        ..next
                    },
                );
                self.prepend_since(start, |r| &mut r.lenitions, &label);
                proceeded = true;
            }
        }

        if label.is_empty() || !state.lenition.contains(LenitionState::MANDATORY) {
            for reading in readings(text, state.skippable) {
                self.comparison_count += 1;
                if let Some(rest) = state.remainder.strip_prefix(reading) {
                    self.descend(
                        node,
                        State {
                            remainder: rest,
                            ..next
                        },
                    );
                    proceeded = true;
                }
            }
        }

        self.prepend_since(offset, |r| &mut r.prefixes, text);
        proceeded
    }

    fn step_infix(&mut self, node: &'a Node, slot: &str, state: State<'a, '_>) -> bool {
        let infixes = self.infixes;
        let candidates = infixes.resolve(slot);
        let mut fitted = false;
        let mut proceeded = false;

        for rule in candidates.rules.iter() {
            self.comparison_count += 1;
            let Some(rest) = state.remainder.strip_prefix(rule.text.as_str()) else {
                // Sorted groups: nothing after a failed candidate can fit
                // once a longer one has.
                if candidates.sorted && fitted {
                    break;
                }
                continue;
            };
            if !rule.allows(rest) {
                continue;
            }
            fitted |= !rule.text.is_empty();

            let offset = self.results.len();
            self.descend(
                node,
                State {
                    remainder: rest,
                    lenition: LenitionState::empty(),
                    skippable: "",
                    ..state
                },
            );
            if !rule.name.is_empty() {
                self.prepend_since(offset, |r| &mut r.infixes, &rule.name);
            }
            proceeded = true;
        }
        proceeded
    }

    fn step_suffix(
        &mut self,
        node: &'a Node,
        text: &'a str,
        name: &str,
        state: State<'a, '_>,
    ) -> bool {
        let remainder = state.remainder.strip_prefix('-').unwrap_or(state.remainder);
        let next_skippable = match text.chars().count() {
            1 => "",
            _ => last_char(text),
        };
        self.comparison_count += 1;

        for reading in readings(text, state.skippable) {
            if reading.is_empty() {
                continue;
            }
            let Some(rest) = remainder.strip_prefix(reading) else {
                continue;
            };
            let offset = self.results.len();
            self.descend(
                node,
                State {
                    remainder: rest,
                    lenition: LenitionState::empty(),
                    skippable: next_skippable,
                    ..state
                },
            );
            self.prepend_since(offset, |r| &mut r.suffixes, name);
            return true;
        }
        false
    }
}
