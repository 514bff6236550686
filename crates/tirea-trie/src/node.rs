// Trie edges and the owned rule tree
//
// A dictionary is one big `Node` tree. Entries are compiled into small
// trees and merged in; merging shares literal prefixes between siblings by
// splitting `Raw` edges, except where the split would hide a consonant
// cluster from lenition.

use std::borrow::Cow;
use std::fmt;

use tirea_core::lenition::breaks_cluster;

// ---------------------------------------------------------------------------
// Edge kinds
// ---------------------------------------------------------------------------

/// Kind of an edge, declared in child sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Root,
    Result,
    Raw,
    Prefix,
    Infix,
    Suffix,
    SubTree,
    Return,
    LeafHook,
    Particle,
}

/// A trie edge. Each kind carries only what matching it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Container of alternative continuations, all of which are explored.
    Root,
    /// Terminal match of a dictionary entry.
    Result {
        id: String,
        pos: Option<String>,
    },
    /// Literal text, which may be read lenited.
    Raw(String),
    /// Prefix morpheme. Lenition-triggering prefixes are written `text+`.
    Prefix {
        text: String,
        lenites: bool,
    },
    /// Infix slot: a group name, optionally followed by ad hoc candidates.
    Infix(String),
    /// Suffix morpheme, optionally reported under another name (`e=ä`).
    Suffix {
        text: String,
        alias: Option<String>,
    },
    /// Reference to a named sub-automaton.
    SubTree(String),
    /// Continue with the children of the `SubTree` node that was entered.
    Return,
    /// Construction marker: makes its parent count as a leaf.
    LeafHook,
    /// Free-standing particle, optionally reported under another name.
    Particle {
        text: String,
        alias: Option<String>,
    },
}

impl Edge {
    pub fn kind(&self) -> NodeKind {
        match self {
            Edge::Root => NodeKind::Root,
            Edge::Result { .. } => NodeKind::Result,
            Edge::Raw(_) => NodeKind::Raw,
            Edge::Prefix { .. } => NodeKind::Prefix,
            Edge::Infix(_) => NodeKind::Infix,
            Edge::Suffix { .. } => NodeKind::Suffix,
            Edge::SubTree(_) => NodeKind::SubTree,
            Edge::Return => NodeKind::Return,
            Edge::LeafHook => NodeKind::LeafHook,
            Edge::Particle { .. } => NodeKind::Particle,
        }
    }

    /// The edge's payload as written inside its token, without the kind
    /// marker (`1234:n.` for `=1234:n.`, `me+` for a lenting prefix).
    pub fn value(&self) -> Cow<'_, str> {
        match self {
            Edge::Root | Edge::Return | Edge::LeafHook => Cow::Borrowed(""),
            Edge::Result { id, pos } => with_separator(id, ':', pos.as_deref()),
            Edge::Raw(text) | Edge::Infix(text) | Edge::SubTree(text) => Cow::Borrowed(text),
            Edge::Prefix { text, lenites: true } => Cow::Owned(format!("{text}+")),
            Edge::Prefix { text, lenites: false } => Cow::Borrowed(text),
            Edge::Suffix { text, alias } | Edge::Particle { text, alias } => {
                with_separator(text, '=', alias.as_deref())
            }
        }
    }

    /// Parse one DSL token. Forms are tried in this order:
    ///
    /// | Token            | Edge                         |
    /// |------------------|------------------------------|
    /// | `\text`          | `Raw`, whatever `text` is    |
    /// | `=id[:pos]`      | `Result`                     |
    /// | `text+`          | lenition-triggering `Prefix` |
    /// | `text-`          | `Prefix`                     |
    /// | `<slot>`         | `Infix`                      |
    /// | `-text[=alias]`  | `Suffix`                     |
    /// | `$name`          | `SubTree`                    |
    /// | `[text[=alias]]` | `Particle`                   |
    /// | `/return`, `/hook`, `/root` | markers           |
    ///
    /// Anything else is `Raw`.
    pub fn parse(token: &str) -> Edge {
        if let Some(text) = token.strip_prefix('\\') {
            return Edge::Raw(text.to_string());
        }
        if let Some(value) = token.strip_prefix('=') {
            let (id, pos) = split_at_separator(value, ':');
            return Edge::Result { id, pos };
        }
        if let Some(text) = token.strip_suffix('+') {
            return Edge::Prefix {
                text: text.to_string(),
                lenites: true,
            };
        }
        if let Some(text) = token.strip_suffix('-') {
            return Edge::Prefix {
                text: text.to_string(),
                lenites: false,
            };
        }
        if let Some(slot) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return Edge::Infix(slot.to_string());
        }
        if let Some(value) = token.strip_prefix('-') {
            let (text, alias) = split_at_separator(value, '=');
            return Edge::Suffix { text, alias };
        }
        if let Some(name) = token.strip_prefix('$') {
            return Edge::SubTree(name.to_string());
        }
        if token.starts_with('[') && token.ends_with(']') {
            let value = token.trim_end_matches(']').trim_start_matches('[');
            let (text, alias) = split_at_separator(value, '=');
            return Edge::Particle { text, alias };
        }
        match token {
            "/return" => Edge::Return,
            "/hook" => Edge::LeafHook,
            "/root" => Edge::Root,
            _ => Edge::Raw(token.to_string()),
        }
    }
}

fn split_at_separator(value: &str, separator: char) -> (String, Option<String>) {
    match value.split_once(separator) {
        Some((head, tail)) => (head.to_string(), Some(tail.to_string())),
        None => (value.to_string(), None),
    }
}

fn with_separator<'a>(head: &'a str, separator: char, tail: Option<&str>) -> Cow<'a, str> {
    match tail {
        Some(tail) => Cow::Owned(format!("{head}{separator}{tail}")),
        None => Cow::Borrowed(head),
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Root => f.write_str("/root"),
            Edge::Result { .. } => write!(f, "={}", self.value()),
            Edge::Raw(text) => {
                if Edge::parse(text) == *self {
                    f.write_str(text)
                } else {
                    write!(f, "\\{text}")
                }
            }
            Edge::Prefix { text, lenites: true } => write!(f, "{text}+"),
            Edge::Prefix { text, lenites: false } => write!(f, "{text}-"),
            Edge::Infix(slot) => write!(f, "<{slot}>"),
            Edge::Suffix { .. } => write!(f, "-{}", self.value()),
            Edge::SubTree(name) => write!(f, "${name}"),
            Edge::Return => f.write_str("/return"),
            Edge::LeafHook => f.write_str("/hook"),
            Edge::Particle { .. } => write!(f, "[{}]", self.value()),
        }
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// An edge and the subtree below it. Children are owned; merging always
/// moves or copies incoming structure into the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub edge: Edge,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            children: Vec::new(),
        }
    }

    pub fn with_children(edge: Edge, children: Vec<Node>) -> Self {
        Self { edge, children }
    }

    /// A childless node from one DSL token.
    pub fn parse(token: &str) -> Self {
        Self::new(Edge::parse(token))
    }

    pub fn kind(&self) -> NodeKind {
        self.edge.kind()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }

    /// Call `f` on every node of the subtree, parents before children.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    // -----------------------------------------------------------------------
    // Merging
    // -----------------------------------------------------------------------

    /// Fold `other` into this node.
    ///
    /// On failure `other` is handed back and `self` is untouched.
    pub fn try_merge(&mut self, mut other: Node) -> Result<(), Node> {
        if self.edge == other.edge {
            for child in other.children {
                self.adopt(child);
            }
            return Ok(());
        }

        let (Edge::Raw(mine), Edge::Raw(theirs)) = (&self.edge, &other.edge) else {
            return Err(other);
        };
        let common = common_prefix_len(mine, theirs);
        if common == 0 || breaks_cluster(&mine[..common], mine, theirs) {
            return Err(other);
        }
        let (mine_len, theirs_len) = (mine.len(), theirs.len());

        if common == mine_len {
            other.trim_raw(common);
            self.adopt(other);
        } else if common == theirs_len {
            let mut old = std::mem::replace(self, other);
            old.trim_raw(common);
            self.adopt(old);
        } else {
            let mut old = std::mem::replace(self, Node::new(Edge::Raw(String::new())));
            if let Edge::Raw(text) = &old.edge {
                self.edge = Edge::Raw(text[..common].to_string());
            }
            old.trim_raw(common);
            other.trim_raw(common);
            self.children = vec![old, other];
        }
        Ok(())
    }

    /// Borrowed form of [`Node::try_merge`]; returns whether it merged.
    pub fn merge_from(&mut self, other: &Node) -> bool {
        self.try_merge(other.clone()).is_ok()
    }

    /// Merge `other` in and return self.
    ///
    /// # Panics
    ///
    /// If `other` cannot be merged. Trees passed here are parts of the same
    /// paradigm, so a rejection means the rule-tree is malformed.
    pub fn merged_with(mut self, other: Node) -> Node {
        if let Err(rejected) = self.try_merge(other) {
            panic!("cannot merge {} into {}", rejected.edge, self.edge);
        }
        self
    }

    /// Merge `child` into the first child accepting it, or append it.
    pub fn adopt(&mut self, mut child: Node) {
        for existing in &mut self.children {
            match existing.try_merge(child) {
                Ok(()) => return,
                Err(rejected) => child = rejected,
            }
        }
        self.children.push(child);
    }

    fn trim_raw(&mut self, len: usize) {
        if let Edge::Raw(text) = &mut self.edge {
            text.drain(..len);
        }
    }

    // -----------------------------------------------------------------------
    // Appending at leaves
    // -----------------------------------------------------------------------

    /// Merge a copy of `other` onto every leaf (or each child of `other`,
    /// when it is a `Root`).
    ///
    /// A node with a `/hook` child is a leaf even though it has children.
    /// Its other children are still visited, and the hooks are removed
    /// afterwards.
    pub fn append_from(&mut self, other: &Node) {
        let tail = match other.edge {
            Edge::Root => other.children.as_slice(),
            _ => std::slice::from_ref(other),
        };
        self.merge_at_leaves(tail);
    }

    /// Builder form of [`Node::append_from`].
    pub fn and_then(mut self, other: &Node) -> Node {
        self.append_from(other);
        self
    }

    /// Terminate every leaf with a result for `id` (`id` or `id:pos`).
    pub fn and_then_result(self, id: &str) -> Node {
        let (id, pos) = split_at_separator(id, ':');
        self.and_then(&Node::new(Edge::Result { id, pos }))
    }

    fn merge_at_leaves(&mut self, tail: &[Node]) {
        if self.children.is_empty() {
            for node in tail {
                self.adopt(node.clone());
            }
            return;
        }

        let original = self.children.len();
        let mut hooked = false;
        for child in &mut self.children {
            match child.edge {
                Edge::LeafHook => hooked = true,
                _ => child.merge_at_leaves(tail),
            }
        }
        if !hooked {
            return;
        }

        for node in tail {
            self.adopt(node.clone());
        }
        let mut index = 0;
        self.children.retain(|child| {
            let old_hook = index < original && child.edge == Edge::LeafHook;
            index += 1;
            !old_hook
        });
    }

    /// Append copies of `nodes` to every leaf without merging. Hooks stay.
    pub(crate) fn push_at_leaves(&mut self, nodes: &[Node]) {
        if self.children.is_empty() {
            self.children.extend_from_slice(nodes);
            return;
        }

        let mut hooked = false;
        for child in &mut self.children {
            match child.edge {
                Edge::LeafHook => hooked = true,
                _ => child.push_at_leaves(nodes),
            }
        }
        if hooked {
            self.children.extend_from_slice(nodes);
        }
    }

    // -----------------------------------------------------------------------
    // Optimization
    // -----------------------------------------------------------------------

    /// Join every `Raw` edge that has exactly one `Raw` child with that child.
    pub fn compact(&mut self) {
        while self.children.len() == 1 {
            let Edge::Raw(text) = &mut self.edge else {
                break;
            };
            let child = &mut self.children[0];
            let Edge::Raw(tail) = &child.edge else {
                break;
            };
            text.push_str(tail);
            self.children = std::mem::take(&mut child.children);
        }

        for child in &mut self.children {
            child.compact();
        }
    }

    /// Order children recursively: non-raw edges by kind then value, then
    /// raw edges by text.
    pub fn sort_children(&mut self) {
        self.children.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        for child in &mut self.children {
            child.sort_children();
        }
    }

    fn sort_key(&self) -> (bool, NodeKind, Cow<'_, str>) {
        (self.kind() == NodeKind::Raw, self.kind(), self.edge.value())
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.edge, indent = depth * 2)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Prints the tree, one edge token per line, indented by depth.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Byte length of the longest common prefix, on character boundaries.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}
