//! # Queryable Map
//!
//! Ordered in-memory maps that answer range queries lazily.
//!
//! This crate provides two independent structures behind one contract, the
//! [`QueryableMap`] trait:
//!
//! - [`WhiteGreyBlackTree`]: a self-balancing search tree of wide nodes for
//!   any `Ord` key. Every node carries a three-state occupancy [`Marker`].
//! - [`Trie`]: a prefix trie over byte symbols for string-like keys, which
//!   collapses dead branches when keys are removed.
//!
//! ## Features
//!
//! - **Ordered traversal**: `asc` / `desc` over every entry
//! - **Range queries**: bigger/less than (strict and inclusive), between,
//!   equals and not-equals, each in ascending or descending order
//! - **Lazy results**: queries return iterators that walk the structure on
//!   demand and skip subtrees that cannot match
//! - **Prefix Views**: borrow every trie entry that starts with a prefix
//!
//! ## Example
//!
//! ```rust
//! use queryable_map::{QueryableMap, StringTrie, WhiteGreyBlackTree};
//!
//! let mut tree = WhiteGreyBlackTree::new();
//! for i in 1..=8 {
//!     tree.set(i, i * 10);
//! }
//! let keys: Vec<i32> = tree.between_asc(&2, &7).map(|e| *e.key()).collect();
//! assert_eq!(keys, vec![2, 3, 4, 5, 6, 7]);
//!
//! let mut trie = StringTrie::<String, u32>::new();
//! trie.set("Mijo".to_string(), 1);
//! trie.set("Ante".to_string(), 2);
//! assert_eq!(trie.get(&"Mijo".to_string()), Some(&1));
//! ```

// Expands to a `tracing` event when the feature is on, and to nothing otherwise.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

mod entry;
pub mod key_converter;
pub mod node;
mod prefix_view;
mod query;
mod queryable_map;
#[cfg(feature = "serde")]
mod serde_impls;
mod trie;
mod trie_iter;
mod util;
mod wgb;
mod wgb_iter;

// Re-export public types
pub use crate::entry::OrderedEntry;
pub use crate::key_converter::{BytesKeyConverter, IntKeyConverter, KeyToBytes, StrKeyConverter};
pub use crate::prefix_view::{PrefixView, PrefixViewIter};
pub use crate::query::{Order, Query};
pub use crate::queryable_map::QueryableMap;
pub use crate::trie::{BytesTrie, IntTrie, StringTrie, Trie};
pub use crate::trie_iter::TrieRange;
pub use crate::util::minimal_height;
pub use crate::wgb::{Marker, WhiteGreyBlackTree};
pub use crate::wgb_iter::WgbRange;

/// Errors reported by the structural checks of the maps.
///
/// Regular map operations never fail: a missing key is reported through
/// `Option`. An `Error` means the structure itself is corrupted, which is a
/// defect in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A structural invariant does not hold
    BrokenInvariant {
        /// Name of the structure that failed the check
        structure: &'static str,
        /// What was found
        reason: String,
    },
    /// Other error with description
    Other(String),
}

impl Error {
    pub(crate) fn broken(structure: &'static str, reason: impl Into<String>) -> Self {
        Error::BrokenInvariant {
            structure,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BrokenInvariant { structure, reason } => {
                write!(f, "broken {} invariant: {}", structure, reason)
            }
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}
