//! The contract shared by every map in this crate.

use crate::entry::OrderedEntry;
use crate::query::{Order, Query};

/// An ordered associative container that answers range queries.
///
/// Implementors provide point operations, a lazy [`range`](Self::range)
/// traversal and a few shape observers; every named query below is built on
/// top of `range`. Query results are iterators: entries are located as the
/// caller pulls them, and dropping the iterator abandons the query.
///
/// Query methods take their bound keys by reference and clone them into the
/// iterator, so the results do not borrow the bounds.
///
/// # Examples
///
/// ```
/// use queryable_map::{QueryableMap, WhiteGreyBlackTree};
///
/// let mut tree = WhiteGreyBlackTree::new();
/// for i in 1..=8 {
///     tree.set(i, i);
/// }
///
/// let keys: Vec<_> = tree.bigger_than_equals_desc(&2).map(|e| *e.key()).collect();
/// assert_eq!(keys, vec![8, 7, 6, 5, 4, 3, 2]);
/// ```
pub trait QueryableMap<K: Ord + Clone, V> {
    /// Lazy iterator over the entries selected by a query.
    type Range<'a>: Iterator<Item = OrderedEntry<'a, K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Inserts `value` under `key`, returning the value it replaced.
    fn set(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value stored under `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns the stored entry for `key`.
    fn get_entry(&self, key: &K) -> Option<OrderedEntry<'_, K, V>>;

    /// Removes `key`, returning its value. Removing an absent key is a no-op.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Number of entries.
    fn len(&self) -> usize;

    /// Entries selected by `query`, in `order`.
    fn range(&self, query: Query<K>, order: Order) -> Self::Range<'_>;

    /// Longest root-to-leaf path of the structure, counted in edges.
    fn depth(&self) -> usize;

    /// Number of structural nodes currently allocated.
    fn node_count(&self) -> usize;

    /// Short name of the structure, used in reports.
    fn name(&self) -> &'static str;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Every entry, smallest key first.
    fn asc(&self) -> Self::Range<'_> {
        self.range(Query::All, Order::Asc)
    }

    /// Every entry, largest key first.
    fn desc(&self) -> Self::Range<'_> {
        self.range(Query::All, Order::Desc)
    }

    /// Entry with the smallest key.
    fn first(&self) -> Option<OrderedEntry<'_, K, V>> {
        self.asc().next()
    }

    /// Entry with the largest key.
    fn last(&self) -> Option<OrderedEntry<'_, K, V>> {
        self.desc().next()
    }

    /// The entry equal to `key`, as a range of zero or one entries.
    fn equals(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::Equals(key.clone()), Order::Asc)
    }

    fn not_equals_asc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::NotEquals(key.clone()), Order::Asc)
    }

    fn not_equals_desc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::NotEquals(key.clone()), Order::Desc)
    }

    fn bigger_than_asc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::BiggerThan(key.clone()), Order::Asc)
    }

    fn bigger_than_desc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::BiggerThan(key.clone()), Order::Desc)
    }

    fn bigger_than_equals_asc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::BiggerThanEquals(key.clone()), Order::Asc)
    }

    fn bigger_than_equals_desc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::BiggerThanEquals(key.clone()), Order::Desc)
    }

    fn less_than_asc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::LessThan(key.clone()), Order::Asc)
    }

    fn less_than_desc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::LessThan(key.clone()), Order::Desc)
    }

    fn less_than_equals_asc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::LessThanEquals(key.clone()), Order::Asc)
    }

    fn less_than_equals_desc(&self, key: &K) -> Self::Range<'_> {
        self.range(Query::LessThanEquals(key.clone()), Order::Desc)
    }

    /// Entries with `low <= key <= high`, smallest key first.
    fn between_asc(&self, low: &K, high: &K) -> Self::Range<'_> {
        self.range(Query::Between(low.clone(), high.clone()), Order::Asc)
    }

    /// Entries with `low <= key <= high`, largest key first.
    fn between_desc(&self, low: &K, high: &K) -> Self::Range<'_> {
        self.range(Query::Between(low.clone(), high.clone()), Order::Desc)
    }
}
