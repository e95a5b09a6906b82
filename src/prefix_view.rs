//! Prefix view into a trie.
//!
//! This module provides the `PrefixView` type, which borrows the subtrie
//! holding every key that starts with a given prefix.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::entry::OrderedEntry;
use crate::key_converter::KeyToBytes;
use crate::node::TrieNode;
use crate::query::{Order, Query};
use crate::trie_iter::TrieRange;

/// A lightweight view into the subtrie below a key prefix.
///
/// The view borrows the trie it was created from; lookups through the view
/// only see keys that start with the prefix.
///
/// # Examples
///
/// ```
/// use queryable_map::{QueryableMap, StringTrie};
///
/// let mut trie = StringTrie::<String, i32>::new();
/// trie.set("hello".to_string(), 1);
/// trie.set("help".to_string(), 2);
/// trie.set("world".to_string(), 3);
///
/// let view = trie.prefix_view(&"hel".to_string());
///
/// assert!(view.contains_key(&"hello".to_string()));
/// assert!(!view.contains_key(&"world".to_string()));
/// assert_eq!(view.get(&"help".to_string()), Some(&2));
/// ```
pub struct PrefixView<'a, K, V, C> {
    /// The node reached by the prefix symbols, if it exists
    node: Option<&'a TrieNode<K, V>>,

    /// The prefix symbols defining this view
    prefix: Vec<u8>,

    _converter: PhantomData<C>,
}

/// An iterator over the entries of a [`PrefixView`], smallest key first.
pub struct PrefixViewIter<'a, K, V> {
    inner: Option<TrieRange<'a, K, V>>,
}

impl<'a, K, V, C> PrefixView<'a, K, V, C> {
    pub(crate) fn new(node: Option<&'a TrieNode<K, V>>, prefix: Vec<u8>) -> Self {
        PrefixView {
            node,
            prefix,
            _converter: PhantomData,
        }
    }

    /// Returns the prefix symbols of this view.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns `true` if some node of the trie spells the prefix.
    ///
    /// A prefix can exist without any key being exactly equal to it.
    pub fn exists(&self) -> bool {
        self.node.is_some()
    }

    /// Returns the number of entries whose key starts with the prefix.
    pub fn len(&self) -> usize {
        self.node.map_or(0, TrieNode::subtree_size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries of the view in ascending order.
    pub fn iter(&self) -> PrefixViewIter<'a, K, V> {
        PrefixViewIter {
            inner: self
                .node
                .map(|node| TrieRange::new(node, Query::All, Order::Asc)),
        }
    }
}

impl<'a, K, V, C> PrefixView<'a, K, V, C>
where
    K: Ord,
    C: KeyToBytes<K>,
{
    /// Returns the value for `key` if it is stored and starts with the prefix.
    pub fn get(&self, key: &K) -> Option<&'a V> {
        let node = self.node?;
        let symbols = C::convert(key);

        if !symbols.starts_with(&self.prefix) {
            return None;
        }
        node.descend(&symbols[self.prefix.len()..])?
            .entry
            .as_ref()
            .map(|(_, value)| value)
    }

    /// Returns `true` if `key` is stored and starts with the prefix.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

impl<K, V, C> fmt::Debug for PrefixView<'_, K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("len", &self.len())
            .finish()
    }
}

// Two views are equal when they hold the same entries, whatever their prefix.
impl<K, V, C> PartialEq for PrefixView<'_, K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a, K, V, C> IntoIterator for &PrefixView<'a, K, V, C> {
    type Item = OrderedEntry<'a, K, V>;
    type IntoIter = PrefixViewIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> Iterator for PrefixViewIter<'a, K, V> {
    type Item = OrderedEntry<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }
}

impl<K, V> FusedIterator for PrefixViewIter<'_, K, V> {}
