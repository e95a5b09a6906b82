//! The main trie implementation.
//!
//! This module contains the `Trie` type, a mutable prefix tree over the byte
//! symbols of its keys. Removing a key detaches every node that no longer
//! leads to a stored key, so the trie never keeps dangling branches.

use std::fmt;
use std::marker::PhantomData;
use std::mem;

use crate::entry::OrderedEntry;
use crate::key_converter::{BytesKeyConverter, IntKeyConverter, KeyToBytes, StrKeyConverter};
use crate::node::TrieNode;
use crate::prefix_view::PrefixView;
use crate::query::{Order, Query};
use crate::queryable_map::QueryableMap;
use crate::trie_iter::TrieRange;
use crate::Error;

const NAME: &str = "trie";

/// A prefix trie ordered by the byte symbols of its keys.
///
/// The converter `C` turns a key into its symbols; see
/// [`KeyToBytes`](crate::KeyToBytes). Every node consumes one symbol, and the
/// node reached by a key's full symbol path stores its entry.
///
/// # Examples
///
/// ```
/// use queryable_map::{QueryableMap, StringTrie};
///
/// let mut trie = StringTrie::<String, i32>::new();
/// trie.set("junit".to_string(), 1);
/// trie.set("junit2".to_string(), 2);
///
/// assert_eq!(trie.remove(&"junit2".to_string()), Some(2));
/// assert_eq!(trie.len(), 1);
/// assert!(trie.contains_key(&"junit".to_string()));
/// ```
pub struct Trie<K, V, C = StrKeyConverter<K>> {
    /// The root node of the trie, holding the entry for the empty key
    pub(crate) root: TrieNode<K, V>,

    /// The number of entries stored in the trie
    size: usize,

    _converter: PhantomData<C>,
}

/// A trie keyed by anything that implements `AsRef<str>`.
pub type StringTrie<K, V> = Trie<K, V, StrKeyConverter<K>>;

/// A trie keyed by anything that implements `AsRef<[u8]>`.
pub type BytesTrie<K, V> = Trie<K, V, BytesKeyConverter<K>>;

/// A trie keyed by primitive integers, one big-endian byte per level.
pub type IntTrie<K, V> = Trie<K, V, IntKeyConverter<K>>;

impl<K, V, C> Trie<K, V, C> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use queryable_map::{QueryableMap, StringTrie};
    ///
    /// let trie = StringTrie::<String, i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
            size: 0,
            _converter: PhantomData,
        }
    }

    /// Returns the number of nodes that do not store an entry, the root
    /// included.
    pub fn empty_node_count(&self) -> usize {
        self.root.empty_node_count()
    }
}

impl<K, V, C> Trie<K, V, C>
where
    K: Ord,
    C: KeyToBytes<K>,
{
    fn find(&self, key: &K) -> Option<&(K, V)> {
        let symbols = C::convert(key);
        self.root.descend(&symbols)?.entry.as_ref()
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// Missing intermediate nodes are created on the way down. When the key
    /// is already present the stored key is kept and only the value changes.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let symbols = C::convert(&key).into_owned();

        let mut node = &mut self.root;
        for symbol in symbols {
            node = node.children.entry(symbol).or_default();
        }

        if let Some((_, existing)) = node.entry.as_mut() {
            return Some(mem::replace(existing, value));
        }
        node.entry = Some((key, value));
        self.size += 1;
        None
    }

    /// Removes a key from the trie, returning its value.
    ///
    /// Every node left without an entry and without children is detached on
    /// the way back up.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let symbols = C::convert(key);
        let mut detached = 0usize;

        let removed = Self::remove_recursive(&mut self.root, &symbols, &mut detached)?;
        self.size -= 1;

        if detached > 0 {
            trace!(detached, "trie collapse");
        }
        Some(removed)
    }

    // Recursive helper for delete; counts the nodes it detaches
    fn remove_recursive(node: &mut TrieNode<K, V>, symbols: &[u8], detached: &mut usize) -> Option<V> {
        let (symbol, rest) = match symbols.split_first() {
            Some(split) => split,
            None => return node.entry.take().map(|(_, value)| value),
        };

        let child = node.children.get_mut(symbol)?;
        let removed = Self::remove_recursive(child, rest, detached)?;

        if child.is_dead() {
            node.children.remove(symbol);
            *detached += 1;
        }

        Some(removed)
    }

    /// Creates a view of every entry whose key starts with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use queryable_map::{QueryableMap, StringTrie};
    ///
    /// let mut trie = StringTrie::<&str, i32>::new();
    /// trie.set("Miljenko", 1);
    /// trie.set("Miljenka", 2);
    /// trie.set("Mijo", 3);
    ///
    /// let view = trie.prefix_view(&"Milj");
    /// assert_eq!(view.len(), 2);
    /// assert!(view.contains_key(&"Miljenka"));
    /// assert!(!view.contains_key(&"Mijo"));
    /// ```
    pub fn prefix_view(&self, prefix: &K) -> PrefixView<'_, K, V, C> {
        let prefix = C::convert(prefix).into_owned();
        let node = self.root.descend(&prefix);
        PrefixView::new(node, prefix)
    }

    /// Checks every structural invariant of the trie.
    ///
    /// Verifies that no branch is dangling, that every stored key spells the
    /// path of the node holding it, and the entry count.
    pub fn validate(&self) -> Result<(), Error> {
        let mut path = Vec::new();
        let count = self.validate_node(&self.root, &mut path)?;

        if count != self.size {
            return Err(Error::broken(
                NAME,
                format!("{} stored entries but len is {}", count, self.size),
            ));
        }
        Ok(())
    }

    fn validate_node(&self, node: &TrieNode<K, V>, path: &mut Vec<u8>) -> Result<usize, Error> {
        // the root of an empty trie is the only node allowed to be dead
        if !path.is_empty() && node.is_dead() {
            return Err(Error::broken(
                NAME,
                format!("dangling branch at {:?}", String::from_utf8_lossy(path)),
            ));
        }

        let mut count = 0;
        if let Some((key, _)) = &node.entry {
            if C::convert(key).as_ref() != path.as_slice() {
                return Err(Error::broken(
                    NAME,
                    format!("key stored under {:?} has other symbols", String::from_utf8_lossy(path)),
                ));
            }
            count += 1;
        }

        for (&symbol, child) in &node.children {
            path.push(symbol);
            count += self.validate_node(child, path)?;
            path.pop();
        }
        Ok(count)
    }
}

impl<K, V, C> QueryableMap<K, V> for Trie<K, V, C>
where
    K: Ord + Clone,
    C: KeyToBytes<K>,
{
    type Range<'a>
        = TrieRange<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn set(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|(_, value)| value)
    }

    fn get_entry(&self, key: &K) -> Option<OrderedEntry<'_, K, V>> {
        self.find(key).map(|(key, value)| OrderedEntry::new(key, value))
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.delete(key)
    }

    fn clear(&mut self) {
        trace!(entries = self.size, "trie clear");
        self.root = TrieNode::new();
        self.size = 0;
    }

    fn len(&self) -> usize {
        self.size
    }

    fn range(&self, query: Query<K>, order: Order) -> TrieRange<'_, K, V> {
        let query = query.map(|key| C::convert(&key).into_owned());
        TrieRange::new(&self.root, query, order)
    }

    fn depth(&self) -> usize {
        self.root.height()
    }

    fn node_count(&self) -> usize {
        self.root.node_count()
    }

    fn name(&self) -> &'static str {
        NAME
    }
}

impl<K: Clone, V: Clone, C> Clone for Trie<K, V, C> {
    fn clone(&self) -> Self {
        Trie {
            root: self.root.clone(),
            size: self.size,
            _converter: PhantomData,
        }
    }
}

// Default implementation
impl<K, V, C> Default for Trie<K, V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Extend<(K, V)> for Trie<K, V, C>
where
    K: Ord,
    C: KeyToBytes<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for Trie<K, V, C>
where
    K: Ord,
    C: KeyToBytes<K>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<K, V, C> PartialEq for Trie<K, V, C>
where
    K: Ord + Clone,
    V: PartialEq,
    C: KeyToBytes<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .asc()
                .zip(other.asc())
                .all(|(a, b)| a.key() == b.key() && a.value() == b.value())
    }
}

impl<K, V, C> fmt::Debug for Trie<K, V, C>
where
    K: Ord + Clone + fmt::Debug,
    V: fmt::Debug,
    C: KeyToBytes<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.asc().map(OrderedEntry::into_pair)).finish()
    }
}
