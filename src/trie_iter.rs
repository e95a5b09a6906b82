//! Lazy range traversal over a [`Trie`](crate::Trie).

use std::iter::FusedIterator;

use crate::entry::OrderedEntry;
use crate::node::TrieNode;
use crate::query::{Order, Query};

enum Frame<'a, K, V> {
    // Enter `node`, reached from a path of `parent_len` symbols via `symbol`.
    Visit {
        node: &'a TrieNode<K, V>,
        parent_len: usize,
        symbol: Option<u8>,
    },
    // Yield the entry of `node` after its children (descending order only).
    Emit { node: &'a TrieNode<K, V>, len: usize },
}

/// Iterator over the entries of a trie selected by a query.
///
/// Entries come out in lexicographic order of their key symbols. In
/// ascending order a key precedes every key it is a prefix of; in descending
/// order it follows them. The symbols of the current node are kept in a
/// single shared buffer, and a subtree is skipped as soon as its path shows
/// that no key below it can satisfy the query.
pub struct TrieRange<'a, K, V> {
    stack: Vec<Frame<'a, K, V>>,
    path: Vec<u8>,
    query: Query<Vec<u8>>,
    order: Order,
}

impl<'a, K, V> TrieRange<'a, K, V> {
    pub(crate) fn new(root: &'a TrieNode<K, V>, query: Query<Vec<u8>>, order: Order) -> Self {
        TrieRange {
            stack: vec![Frame::Visit {
                node: root,
                parent_len: 0,
                symbol: None,
            }],
            path: Vec::new(),
            query,
            order,
        }
    }

    fn entry_of(&self, node: &'a TrieNode<K, V>) -> Option<OrderedEntry<'a, K, V>> {
        match &node.entry {
            Some((key, value)) if self.query.matches(&self.path[..]) => {
                Some(OrderedEntry::new(key, value))
            }
            _ => None,
        }
    }
}

impl<'a, K, V> Iterator for TrieRange<'a, K, V> {
    type Item = OrderedEntry<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Emit { node, len } => {
                    self.path.truncate(len);
                    if let Some(entry) = self.entry_of(node) {
                        return Some(entry);
                    }
                }
                Frame::Visit {
                    node,
                    parent_len,
                    symbol,
                } => {
                    self.path.truncate(parent_len);
                    self.path.extend(symbol);
                    if !self.query.admits_prefix(&self.path) {
                        continue;
                    }

                    let len = self.path.len();
                    match self.order {
                        Order::Asc => {
                            // smallest symbol ends up on top
                            for (&symbol, child) in node.children.iter().rev() {
                                self.stack.push(Frame::Visit {
                                    node: child,
                                    parent_len: len,
                                    symbol: Some(symbol),
                                });
                            }
                            if let Some(entry) = self.entry_of(node) {
                                return Some(entry);
                            }
                        }
                        Order::Desc => {
                            self.stack.push(Frame::Emit { node, len });
                            for (&symbol, child) in node.children.iter() {
                                self.stack.push(Frame::Visit {
                                    node: child,
                                    parent_len: len,
                                    symbol: Some(symbol),
                                });
                            }
                        }
                    }
                }
            }
        }
        None
    }
}

impl<K, V> FusedIterator for TrieRange<'_, K, V> {}
