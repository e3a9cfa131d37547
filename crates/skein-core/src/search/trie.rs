//! Character-level prefix trie with a bounded per-node cache.
//!
//! Every node on a key's path caches the id of the entry that was inserted,
//! until the node holds `node_capacity` ids. Later insertions past the bound
//! are not cached at that node (first-inserted-wins), so a query for a very
//! dense prefix can undercount.
//!
//! Children are kept in a `BTreeMap` so traversal order is deterministic.

use std::collections::{BTreeMap, HashSet};

use super::DEFAULT_NODE_CAPACITY;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    entries: Vec<usize>,
}

impl TrieNode {
    fn count(&self) -> usize {
        1 + self.children.values().map(TrieNode::count).sum::<usize>()
    }

    /// Depth-first collection; returns `true` once `limit` ids are gathered.
    fn collect(&self, limit: usize, seen: &mut HashSet<usize>, out: &mut Vec<usize>) -> bool {
        for &id in &self.entries {
            if seen.insert(id) {
                out.push(id);
                if out.len() >= limit {
                    return true;
                }
            }
        }
        self.children
            .values()
            .any(|child| child.collect(limit, seen, out))
    }
}

/// Prefix tree mapping string keys to entry ids.
#[derive(Debug)]
pub struct PrefixTrie {
    root: TrieNode,
    node_capacity: usize,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_CAPACITY)
    }
}

impl PrefixTrie {
    /// Create an empty trie. A capacity of 0 is raised to 1.
    pub fn new(node_capacity: usize) -> Self {
        Self {
            root: TrieNode::default(),
            node_capacity: node_capacity.max(1),
        }
    }

    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    /// Index `id` under `key`. Keys are taken as given; callers normalize case.
    pub fn insert(&mut self, key: &str, id: usize) {
        let cap = self.node_capacity;
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
            if node.entries.len() < cap && !node.entries.contains(&id) {
                node.entries.push(id);
            }
        }
    }

    /// Up to `limit` distinct ids reachable under `prefix`.
    pub fn collect(&self, prefix: &str, limit: usize) -> Vec<usize> {
        let mut out = Vec::new();
        if limit == 0 {
            return out;
        }

        let mut node = &self.root;
        for ch in prefix.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return out,
            }
        }

        let mut seen = HashSet::new();
        node.collect(limit, &mut seen, &mut out);
        out
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::default();
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }
}
