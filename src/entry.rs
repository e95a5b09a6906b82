//! Read-only key/value pairs produced by traversals and queries.

use std::fmt;

/// A borrowed key/value pair yielded by a [`QueryableMap`](crate::QueryableMap).
///
/// The entry points into the map's storage and lives as long as the borrow of
/// the map it came from. It never gives access to the structural node that
/// holds the pair.
#[derive(PartialEq, Eq, Hash)]
pub struct OrderedEntry<'a, K, V> {
    key: &'a K,
    value: &'a V,
}

// Manual impls: an entry is two references, copyable whatever K and V are.
impl<K, V> Clone for OrderedEntry<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for OrderedEntry<'_, K, V> {}

impl<'a, K, V> OrderedEntry<'a, K, V> {
    pub(crate) fn new(key: &'a K, value: &'a V) -> Self {
        OrderedEntry { key, value }
    }

    /// Returns the key of this entry.
    pub fn key(&self) -> &'a K {
        self.key
    }

    /// Returns the value of this entry.
    pub fn value(&self) -> &'a V {
        self.value
    }

    /// Splits the entry into its borrowed parts.
    pub fn into_pair(self) -> (&'a K, &'a V) {
        (self.key, self.value)
    }

    /// Clones the key and value out of the map.
    pub fn to_owned_pair(&self) -> (K, V)
    where
        K: Clone,
        V: Clone,
    {
        (self.key.clone(), self.value.clone())
    }
}

impl<'a, K, V> From<(&'a K, &'a V)> for OrderedEntry<'a, K, V> {
    fn from((key, value): (&'a K, &'a V)) -> Self {
        OrderedEntry::new(key, value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedEntry<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}={:?}", self.key, self.value)
    }
}
