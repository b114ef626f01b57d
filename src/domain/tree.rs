//! Ternary search tree mapping string keys to values.
//!
//! Each node holds one key character and three child links: `low` for
//! characters that sort before it at the same position, `high` for those that
//! sort after, and `middle` for the continuation with the next character.
//! Nodes live in a generational arena; child links are arena indices.

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::matcher::{KeyMatcher, RegexMatcher};

/// Tree node in the arena.
#[derive(Debug, Clone)]
struct Node<V> {
    /// Key character at this position
    ch: char,
    /// Value of the key ending here, None when no key ends here
    value: Option<V>,
    low: Option<Index>,
    middle: Option<Index>,
    high: Option<Index>,
}

impl<V> Node<V> {
    fn new(ch: char) -> Self {
        Self {
            ch,
            value: None,
            low: None,
            middle: None,
            high: None,
        }
    }
}

/// Child link on a descent path.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Root,
    Low(Index),
    Middle(Index),
    High(Index),
}

/// Deepest level rendered by [`TernaryTree::layout`].
pub const LAYOUT_MAX_DEPTH: usize = 64;

/// Pending work of the in-order walk.
///
/// The `usize` is the byte length of the key accumulated above the node.
enum Step {
    Visit(Index, usize),
    Emit(Index, usize),
}

/// Ordered map from non-empty string keys to values.
///
/// Keys are enumerated in ascending `String` order. There is no removal of
/// single keys and no rebalancing; the shape depends on insertion order.
#[derive(Clone)]
pub struct TernaryTree<V> {
    /// Arena storage for all nodes
    arena: Arena<Node<V>>,
    /// Index of the root node, None for an empty tree
    root: Option<Index>,
    /// Number of keys holding a value
    size: usize,
}

impl<V> Default for TernaryTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TernaryTree<V> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            size: 0,
        }
    }

    /// Inserts `key` with `value`.
    ///
    /// Returns `Ok(false)` and leaves the stored value untouched when `key` is
    /// already present.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidKey`] if `key` is empty; the tree is not modified.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert(&mut self, key: &str, value: V) -> TreeResult<bool> {
        let chars: Vec<char> = key.chars().collect();
        let Some(last) = chars.len().checked_sub(1) else {
            return Err(TreeError::InvalidKey);
        };

        let mut i = 0;
        let mut slot = Slot::Root;
        loop {
            let idx = match self.child(slot) {
                Some(idx) => idx,
                None => {
                    let idx = self.arena.insert(Node::new(chars[i]));
                    self.set_child(slot, idx);
                    idx
                }
            };

            let node = &mut self.arena[idx];
            match chars[i].cmp(&node.ch) {
                Ordering::Less => slot = Slot::Low(idx),
                Ordering::Greater => slot = Slot::High(idx),
                Ordering::Equal if i == last => {
                    if node.value.is_some() {
                        debug!(key, "duplicate key, insert ignored");
                        return Ok(false);
                    }
                    node.value = Some(value);
                    self.size += 1;
                    return Ok(true);
                }
                Ordering::Equal => {
                    i += 1;
                    slot = Slot::Middle(idx);
                }
            }
        }
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// A key that only exists as part of a longer key's path is absent.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidKey`] if `key` is empty.
    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, key: &str) -> TreeResult<Option<&V>> {
        if key.is_empty() {
            return Err(TreeError::InvalidKey);
        }
        Ok(self
            .find(key)
            .and_then(|idx| self.arena[idx].value.as_ref()))
    }

    /// # Errors
    ///
    /// [`TreeError::InvalidKey`] if `key` is empty.
    #[instrument(level = "trace", skip(self))]
    pub fn contains(&self, key: &str) -> TreeResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// All stored keys starting with `prefix`, ascending. The empty prefix
    /// yields every key.
    #[instrument(level = "trace", skip(self))]
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        let mut keys = Vec::new();
        if prefix.is_empty() {
            self.walk(self.root, String::new(), |key, _| keys.push(key.to_string()));
            return keys;
        }

        if let Some(idx) = self.find(prefix) {
            let node = &self.arena[idx];
            if node.value.is_some() {
                keys.push(prefix.to_string());
            }
            self.walk(node.middle, prefix.to_string(), |key, _| {
                keys.push(key.to_string())
            });
        }
        keys
    }

    /// Keys matched as a whole by the regular expression `pattern`, ascending.
    ///
    /// # Errors
    ///
    /// [`TreeError::Pattern`] if `pattern` does not compile. No keys are
    /// returned in that case.
    #[instrument(level = "trace", skip(self))]
    pub fn partial_match(&self, pattern: &str) -> TreeResult<Vec<String>> {
        let matcher = RegexMatcher::new(pattern)?;
        Ok(self.partial_match_with(&matcher))
    }

    /// Keys accepted by `matcher`, ascending.
    pub fn partial_match_with<M>(&self, matcher: &M) -> Vec<String>
    where
        M: KeyMatcher + ?Sized,
    {
        let mut keys = Vec::new();
        self.walk(self.root, String::new(), |key, _| {
            if matcher.is_match(key) {
                keys.push(key.to_string());
            }
        });
        keys
    }

    /// All (key, value) pairs in ascending key order.
    pub fn entries(&self) -> Vec<(String, &V)> {
        let mut entries = Vec::with_capacity(self.size);
        self.walk(self.root, String::new(), |key, value| {
            entries.push((key.to_string(), value))
        });
        entries
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of allocated nodes, including those that only carry a path.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Discards every node.
    #[instrument(level = "debug", skip(self))]
    pub fn make_empty(&mut self) {
        debug!(size = self.size, nodes = self.arena.len(), "discarding tree");
        self.arena.clear();
        self.root = None;
        self.size = 0;
    }

    fn child(&self, slot: Slot) -> Option<Index> {
        match slot {
            Slot::Root => self.root,
            Slot::Low(parent) => self.arena[parent].low,
            Slot::Middle(parent) => self.arena[parent].middle,
            Slot::High(parent) => self.arena[parent].high,
        }
    }

    fn set_child(&mut self, slot: Slot, idx: Index) {
        match slot {
            Slot::Root => self.root = Some(idx),
            Slot::Low(parent) => self.arena[parent].low = Some(idx),
            Slot::Middle(parent) => self.arena[parent].middle = Some(idx),
            Slot::High(parent) => self.arena[parent].high = Some(idx),
        }
    }

    /// Node at which the descent for `key` ends on its last character.
    fn find(&self, key: &str) -> Option<Index> {
        let mut chars = key.chars();
        let mut ch = chars.next()?;
        let mut current = self.root;

        while let Some(idx) = current {
            let node = &self.arena[idx];
            match ch.cmp(&node.ch) {
                Ordering::Less => current = node.low,
                Ordering::Greater => current = node.high,
                Ordering::Equal => match chars.next() {
                    None => return Some(idx),
                    Some(next) => {
                        ch = next;
                        current = node.middle;
                    }
                },
            }
        }
        None
    }

    /// In-order walk from `start`: low subtree, the node itself, middle
    /// subtree, high subtree. Calls `visit` for every node holding a value
    /// with the full key (`prefix` followed by the path below `start`).
    fn walk<'a, F>(&'a self, start: Option<Index>, prefix: String, mut visit: F)
    where
        F: FnMut(&str, &'a V),
    {
        let mut key = prefix;
        let mut stack = Vec::new();
        if let Some(idx) = start {
            stack.push(Step::Visit(idx, key.len()));
        }

        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(idx, depth) => {
                    let node = &self.arena[idx];
                    if let Some(high) = node.high {
                        stack.push(Step::Visit(high, depth));
                    }
                    stack.push(Step::Emit(idx, depth));
                    if let Some(low) = node.low {
                        stack.push(Step::Visit(low, depth));
                    }
                }
                Step::Emit(idx, depth) => {
                    let node = &self.arena[idx];
                    key.truncate(depth);
                    key.push(node.ch);
                    if let Some(value) = node.value.as_ref() {
                        visit(&key, value);
                    }
                    if let Some(middle) = node.middle {
                        stack.push(Step::Visit(middle, key.len()));
                    }
                }
            }
        }
    }
}

impl<V: fmt::Display> TernaryTree<V> {
    /// Writes one `key value` line per entry, in ascending key order.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (key, value) in self.entries() {
            writeln!(out, "{} {}", key, value)?;
        }
        Ok(())
    }

    /// Structural view of the node graph, one tree item per node.
    ///
    /// Levels below [`LAYOUT_MAX_DEPTH`] are collapsed into a single `…` item.
    pub fn layout(&self) -> Tree<String> {
        match self.root {
            Some(root) => self.layout_node(root, "root", 0),
            None => Tree::new("Empty tree".to_string()),
        }
    }

    fn layout_node(&self, idx: Index, edge: &str, depth: usize) -> Tree<String> {
        if depth == LAYOUT_MAX_DEPTH {
            return Tree::new("…".to_string());
        }
        let node = &self.arena[idx];
        let label = match &node.value {
            Some(value) => format!("{} '{}' = {}", edge, node.ch, value),
            None => format!("{} '{}'", edge, node.ch),
        };

        let leaves: Vec<_> = [("low", node.low), ("mid", node.middle), ("high", node.high)]
            .into_iter()
            .filter_map(|(edge, child)| child.map(|c| self.layout_node(c, edge, depth + 1)))
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}

impl<V: fmt::Debug> fmt::Debug for TernaryTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for TernaryTree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let key = key.as_ref();
            match self.insert(key, value) {
                Ok(true) => {}
                Ok(false) => debug!(key, "skipping duplicate key"),
                Err(e) => debug!(key, "skipping entry: {}", e),
            }
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for TernaryTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
