//! Query shapes and the bound predicates used to prune traversals.

use std::borrow::Borrow;
use std::cmp::Ordering;

/// Direction in which a traversal yields its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Smallest key first
    Asc,
    /// Largest key first
    Desc,
}

/// The set of keys a range query selects.
///
/// `Between` is inclusive on both ends; a `Between` whose low bound is greater
/// than its high bound selects nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query<K> {
    /// Every key
    All,
    /// The key equal to the bound
    Equals(K),
    /// Every key except the one equal to the bound
    NotEquals(K),
    /// Keys strictly greater than the bound
    BiggerThan(K),
    /// Keys greater than or equal to the bound
    BiggerThanEquals(K),
    /// Keys strictly less than the bound
    LessThan(K),
    /// Keys less than or equal to the bound
    LessThanEquals(K),
    /// Keys in `[low, high]`
    Between(K, K),
}

impl<K> Query<K> {
    /// Converts the bound keys, keeping the query shape.
    pub fn map<T, F>(self, mut f: F) -> Query<T>
    where
        F: FnMut(K) -> T,
    {
        match self {
            Query::All => Query::All,
            Query::Equals(k) => Query::Equals(f(k)),
            Query::NotEquals(k) => Query::NotEquals(f(k)),
            Query::BiggerThan(k) => Query::BiggerThan(f(k)),
            Query::BiggerThanEquals(k) => Query::BiggerThanEquals(f(k)),
            Query::LessThan(k) => Query::LessThan(f(k)),
            Query::LessThanEquals(k) => Query::LessThanEquals(f(k)),
            Query::Between(low, high) => {
                let low = f(low);
                Query::Between(low, f(high))
            }
        }
    }

    /// Returns `true` if `key` belongs to the selected set.
    pub fn matches<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self {
            Query::All => true,
            Query::Equals(b) => key == b.borrow(),
            Query::NotEquals(b) => key != b.borrow(),
            Query::BiggerThan(b) => key > b.borrow(),
            Query::BiggerThanEquals(b) => key >= b.borrow(),
            Query::LessThan(b) => key < b.borrow(),
            Query::LessThanEquals(b) => key <= b.borrow(),
            Query::Between(low, high) => key >= low.borrow() && key <= high.borrow(),
        }
    }

    /// Returns `true` if some key strictly less than `pivot` could match.
    ///
    /// A search tree only enters the part of a node left of `pivot` when
    /// this holds.
    pub fn admits_below<Q>(&self, pivot: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self {
            Query::All | Query::NotEquals(_) | Query::LessThan(_) | Query::LessThanEquals(_) => {
                true
            }
            Query::Equals(b) | Query::BiggerThan(b) | Query::BiggerThanEquals(b) => {
                b.borrow() < pivot
            }
            Query::Between(low, high) => {
                let (low, high): (&Q, &Q) = (low.borrow(), high.borrow());
                low < pivot && low <= high
            }
        }
    }

    /// Returns `true` if some key strictly greater than `pivot` could match.
    pub fn admits_above<Q>(&self, pivot: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self {
            Query::All | Query::NotEquals(_) | Query::BiggerThan(_) | Query::BiggerThanEquals(_) => {
                true
            }
            Query::Equals(b) | Query::LessThan(b) | Query::LessThanEquals(b) => b.borrow() > pivot,
            Query::Between(low, high) => {
                let (low, high): (&Q, &Q) = (low.borrow(), high.borrow());
                high > pivot && low <= high
            }
        }
    }
}

impl<K: Borrow<[u8]>> Query<K> {
    /// Returns `true` if some key starting with `prefix` could match.
    ///
    /// Every key with this prefix compares greater than or equal to the
    /// prefix itself, and a strictly shorter prefix compares less than any
    /// key it is a prefix of. A trie skips the subtree under `prefix` when
    /// this does not hold.
    pub fn admits_prefix(&self, prefix: &[u8]) -> bool {
        match self {
            Query::All | Query::NotEquals(_) => true,
            Query::Equals(b) => b.borrow().starts_with(prefix),
            Query::BiggerThan(b) | Query::BiggerThanEquals(b) => reaches_lower(prefix, b.borrow()),
            Query::LessThan(b) => prefix < b.borrow(),
            Query::LessThanEquals(b) => prefix <= b.borrow(),
            Query::Between(low, high) => {
                let (low, high): (&[u8], &[u8]) = (low.borrow(), high.borrow());
                low <= high && reaches_lower(prefix, low) && prefix <= high
            }
        }
    }
}

// Whether an extension of `prefix` can be >= `bound`.
fn reaches_lower(prefix: &[u8], bound: &[u8]) -> bool {
    match prefix.cmp(bound) {
        Ordering::Less => bound.starts_with(prefix),
        Ordering::Equal | Ordering::Greater => true,
    }
}
