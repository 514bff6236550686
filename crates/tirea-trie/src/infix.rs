// Infix candidates and slot groups

use std::borrow::Cow;

use hashbrown::HashMap;

/// One infix candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfixRule {
    /// Text that must appear at the slot.
    pub text: String,
    /// Name reported in analyses.
    pub name: String,
    /// Rejected if the following text starts with any of these.
    pub not_before: Vec<String>,
    /// If non-empty, the following text must start with one of these.
    pub only_before: Vec<String>,
}

impl InfixRule {
    /// Parse a candidate spec.
    ///
    /// The first space-separated token is the match text, which is also the
    /// name unless written `text=name`. Further tokens: `=name` renames,
    /// `-text` forbids a following text, `>text` requires one of the listed
    /// following texts. An empty spec is the empty infix.
    pub fn parse(spec: &str) -> InfixRule {
        let mut tokens = spec.split(' ').filter(|t| !t.is_empty());
        let Some(first) = tokens.next() else {
            return InfixRule::default();
        };

        let (text, name) = first.split_once('=').unwrap_or((first, first));
        let mut rule = InfixRule {
            text: text.to_string(),
            name: name.to_string(),
            ..InfixRule::default()
        };
        for token in tokens {
            if let Some(name) = token.strip_prefix('=') {
                rule.name = name.to_string();
            } else if let Some(text) = token.strip_prefix('-') {
                rule.not_before.push(text.to_string());
            } else if let Some(text) = token.strip_prefix('>') {
                rule.only_before.push(text.to_string());
            }
        }
        rule
    }

    /// Check the context constraints against the text after the infix.
    pub fn allows(&self, following: &str) -> bool {
        if self.not_before.iter().any(|t| following.starts_with(t.as_str())) {
            return false;
        }
        self.only_before.is_empty()
            || self.only_before.iter().any(|t| following.starts_with(t.as_str()))
    }
}

/// Candidates for one infix slot.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    pub rules: Cow<'a, [InfixRule]>,
    /// True when `rules` is a registered group, sorted by match text.
    pub sorted: bool,
}

/// Named groups of infix candidates.
///
/// Groups are kept sorted ascending by match text. The matcher relies on
/// this: a longer candidate must come after any shorter one it starts with.
#[derive(Debug, Clone, Default)]
pub struct InfixTable {
    groups: HashMap<String, Vec<InfixRule>>,
}

impl InfixTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group from candidate specs, replacing any previous one.
    pub fn insert_group(&mut self, name: &str, specs: &[&str]) {
        let mut rules: Vec<InfixRule> = specs.iter().map(|s| InfixRule::parse(s)).collect();
        rules.sort_by(|a, b| a.text.cmp(&b.text));
        self.groups.insert(name.to_string(), rules);
    }

    pub fn group(&self, name: &str) -> Option<&[InfixRule]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Resolve the slot text of an `Infix` edge.
    ///
    /// The slot is a comma-separated list. Its first element may name a
    /// group; every other element is an ad hoc candidate spec, so
    /// `eyk,` offers `eyk` and the empty infix.
    pub fn resolve(&self, slot: &str) -> Candidates<'_> {
        if let Some(group) = self.groups.get(slot) {
            return Candidates {
                rules: Cow::Borrowed(group),
                sorted: true,
            };
        }

        let mut parts = slot.split(',');
        let mut rules = Vec::new();
        if let Some(first) = parts.next() {
            match self.groups.get(first) {
                Some(group) => rules.extend_from_slice(group),
                None => rules.push(InfixRule::parse(first)),
            }
        }
        rules.extend(parts.map(InfixRule::parse));
        Candidates {
            rules: Cow::Owned(rules),
            sorted: false,
        }
    }
}
