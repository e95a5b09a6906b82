//! Internal node implementation for the trie.
//!
//! Each `TrieNode` consumes one byte symbol on the edge from its parent. A
//! node is terminal when it stores the entry for the key spelled by the
//! symbols on its path; children are kept in a `BTreeMap` so that walking
//! them in map order visits keys lexicographically.

use std::collections::BTreeMap;

/// Internal node type for the trie.
#[derive(Debug, Clone)]
pub struct TrieNode<K, V> {
    /// The entry for the key ending at this node, if that key was inserted
    pub entry: Option<(K, V)>,

    /// Child nodes indexed by the symbol on the edge leading to them
    pub children: BTreeMap<u8, TrieNode<K, V>>,
}

impl<K, V> TrieNode<K, V> {
    /// Creates a new node with no entry and no children
    pub fn new() -> Self {
        TrieNode {
            entry: None,
            children: BTreeMap::new(),
        }
    }

    /// Creates a new terminal node holding the given entry
    #[cfg(test)]
    pub fn with_entry(key: K, value: V) -> Self {
        TrieNode {
            entry: Some((key, value)),
            children: BTreeMap::new(),
        }
    }

    /// Returns whether this node is a leaf node (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns whether a key ends at this node
    pub fn is_terminal(&self) -> bool {
        self.entry.is_some()
    }

    /// A node that is neither terminal nor has children leads nowhere.
    pub fn is_dead(&self) -> bool {
        !self.is_terminal() && self.is_leaf()
    }

    /// Returns the node reached by following `path` from this node.
    pub fn descend(&self, path: &[u8]) -> Option<&TrieNode<K, V>> {
        path.iter()
            .try_fold(self, |node, symbol| node.children.get(symbol))
    }

    /// Returns the number of entries stored in this subtree
    pub fn subtree_size(&self) -> usize {
        let own = if self.is_terminal() { 1 } else { 0 };
        own + self.children.values().map(TrieNode::subtree_size).sum::<usize>()
    }

    /// Returns the number of nodes in this subtree, this node included
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }

    /// Returns the number of non-terminal nodes in this subtree
    pub fn empty_node_count(&self) -> usize {
        let own = if self.is_terminal() { 0 } else { 1 };
        own + self.children.values().map(TrieNode::empty_node_count).sum::<usize>()
    }

    /// Length of the longest symbol path below this node
    pub fn height(&self) -> usize {
        self.children
            .values()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl<K, V> Default for TrieNode<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
