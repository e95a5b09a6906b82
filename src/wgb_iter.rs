//! Lazy range traversal over a [`WhiteGreyBlackTree`].

use std::iter::FusedIterator;

use crate::entry::OrderedEntry;
use crate::query::{Order, Query};
use crate::wgb::{Node, NodeId, WhiteGreyBlackTree};

/// Iterator over the entries of a [`WhiteGreyBlackTree`] selected by a query.
///
/// A node with `n` entries is walked as `2n + 1` slots, children and entries
/// interleaved in key order (reversed for [`Order::Desc`]). The stack holds
/// one frame per node on the current path. A child is entered only when the
/// query admits keys between the two entries around it, and the walk stops
/// as soon as an entry shows that no later key can match. A query that
/// yields `m` entries therefore touches `O(height + m)` nodes.
pub struct WgbRange<'a, K, V> {
    tree: &'a WhiteGreyBlackTree<K, V>,
    // node and the number of its slots already walked
    stack: Vec<(NodeId, usize)>,
    query: Query<K>,
    order: Order,
}

impl<'a, K: Ord, V> WgbRange<'a, K, V> {
    pub(crate) fn new(tree: &'a WhiteGreyBlackTree<K, V>, query: Query<K>, order: Order) -> Self {
        WgbRange {
            tree,
            stack: tree.root.map(|root| (root, 0)).into_iter().collect(),
            query,
            order,
        }
    }

    fn admits_child(&self, node: &Node<K, V>, index: usize) -> bool {
        let after_previous = match index {
            0 => true,
            _ => self.query.admits_above(&node.entries[index - 1].0),
        };
        after_previous
            && node
                .entries
                .get(index)
                .map_or(true, |(next, _)| self.query.admits_below(next))
    }
}

impl<'a, K: Ord, V> Iterator for WgbRange<'a, K, V> {
    type Item = OrderedEntry<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(frame) = self.stack.last_mut() {
            let node = &tree.arena[frame.0];
            let slots = 2 * node.entries.len() + 1;
            if frame.1 == slots {
                self.stack.pop();
                continue;
            }
            let slot = match self.order {
                Order::Asc => frame.1,
                Order::Desc => slots - 1 - frame.1,
            };
            frame.1 += 1;

            if slot % 2 == 0 {
                if let Some(&child) = node.children.get(slot / 2) {
                    if self.admits_child(node, slot / 2) {
                        self.stack.push((child, 0));
                    }
                }
                continue;
            }

            let (key, value) = &node.entries[slot / 2];
            if self.query.matches(key) {
                return Some(OrderedEntry::new(key, value));
            }
            let exhausted = match self.order {
                Order::Asc => !self.query.admits_above(key),
                Order::Desc => !self.query.admits_below(key),
            };
            if exhausted {
                self.stack.clear();
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.stack.is_empty() {
            (0, Some(0))
        } else {
            (0, Some(self.tree.len))
        }
    }
}

impl<K: Ord, V> FusedIterator for WgbRange<'_, K, V> {}
