//! Per-call parse state: nesting depth guards and deferred definitions.

use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use crate::parsing::blocks::Block;

/// Default limit for nested block quotes and lists.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Constructs whose recursive expansion is depth limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nesting {
    BlockQuote,
    List,
    Footnote,
}

/// A `[key]: url "title"` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    pub url: String,
    pub title: Option<String>,
}

/// A `[^key]: text` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteDefinition {
    /// Key as written, before normalization. Used for anchors.
    pub label: String,
    pub text: String,
    /// `text` parsed during the block pass.
    pub blocks: Vec<Block>,
}

/// Insertion-ordered definitions keyed by normalized key.
#[derive(Debug, Clone)]
pub struct Definitions<D> {
    order: Vec<String>,
    entries: HashMap<String, D>,
}

impl<D> Definitions<D> {
    /// Adds a definition unless the key is taken. Returns whether it was added.
    pub fn insert(&mut self, key: String, def: D) -> bool {
        if self.entries.contains_key(&key) {
            log::debug!("ignoring duplicate definition for key {key:?}");
            return false;
        }
        self.order.push(key.clone());
        self.entries.insert(key, def);
        true
    }

    pub fn get(&self, key: &str) -> Option<&D> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut D> {
        self.entries.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Definitions in the order they were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &D)> {
        self.order
            .iter()
            .filter_map(|k| self.entries.get(k).map(|d| (k.as_str(), d)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<D> Default for Definitions<D> {
    fn default() -> Self {
        Self {
            order: vec![],
            entries: HashMap::new(),
        }
    }
}

/// Shared mutable context for one top-level parse.
///
/// # Invariants
///
/// - A depth counter never exceeds `max_depth`; constructs nested deeper
///   are kept flat.
/// - The first definition of a key wins.
#[derive(Debug, Clone)]
pub struct ParseState {
    max_depth: usize,
    depths: HashMap<Nesting, usize>,
    pub links: Definitions<LinkDefinition>,
    pub footnotes: Definitions<FootnoteDefinition>,
}

impl ParseState {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            depths: HashMap::new(),
            links: Definitions::default(),
            footnotes: Definitions::default(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn depth(&self, kind: Nesting) -> usize {
        self.depths.get(&kind).copied().unwrap_or(0)
    }

    /// Enters one level of `kind`, or returns `None` when that would exceed
    /// `max_depth`. The level is left when the guard drops.
    pub fn descend(&mut self, kind: Nesting) -> Option<DepthGuard<'_>> {
        let depth = self.depths.entry(kind).or_insert(0);
        if *depth >= self.max_depth {
            return None;
        }
        *depth += 1;
        Some(DepthGuard { state: self, kind })
    }
}

impl Default for ParseState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// Scoped depth increment; derefs to the [`ParseState`] for recursion.
pub struct DepthGuard<'a> {
    state: &'a mut ParseState,
    kind: Nesting,
}

impl Deref for DepthGuard<'_> {
    type Target = ParseState;

    fn deref(&self) -> &ParseState {
        self.state
    }
}

impl DerefMut for DepthGuard<'_> {
    fn deref_mut(&mut self) -> &mut ParseState {
        self.state
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        if let Some(d) = self.state.depths.get_mut(&self.kind) {
            *d = d.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_depth() {
        let mut state = ParseState::new(2);
        {
            let mut g = state.descend(Nesting::List).unwrap();
            assert_eq!(g.depth(Nesting::List), 1);
            let inner = g.descend(Nesting::List).unwrap();
            assert_eq!(inner.depth(Nesting::List), 2);
        }
        assert_eq!(state.depth(Nesting::List), 0);
    }

    #[test]
    fn refuses_to_exceed_limit() {
        let mut state = ParseState::new(1);
        let mut g = state.descend(Nesting::BlockQuote).unwrap();
        assert!(g.descend(Nesting::BlockQuote).is_none());
        assert_eq!(g.depth(Nesting::BlockQuote), 1);
    }

    #[test]
    fn zero_depth_never_descends() {
        let mut state = ParseState::new(0);
        assert!(state.descend(Nesting::List).is_none());
    }

    #[test]
    fn counters_are_independent() {
        let mut state = ParseState::new(1);
        let mut g = state.descend(Nesting::BlockQuote).unwrap();
        assert!(g.descend(Nesting::List).is_some());
    }

    #[test]
    fn first_definition_wins() {
        let mut defs = Definitions::default();
        assert!(defs.insert("id".to_string(), 1));
        assert!(!defs.insert("id".to_string(), 2));
        assert_eq!(defs.get("id"), Some(&1));
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn iterates_in_insertion_order() {
        let mut defs = Definitions::default();
        defs.insert("b".to_string(), ());
        defs.insert("a".to_string(), ());
        let keys: Vec<_> = defs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
