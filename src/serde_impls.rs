//! Serde support, enabled by the `serde` feature.
//!
//! Both maps serialize as a plain map in ascending key order and deserialize
//! from any map, so either structure can read what the other wrote.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeTuple, Serializer};

use crate::entry::OrderedEntry;
use crate::key_converter::KeyToBytes;
use crate::queryable_map::QueryableMap;
use crate::trie::Trie;
use crate::wgb::WhiteGreyBlackTree;

// An entry serializes as a `(key, value)` pair.
impl<K: Serialize, V: Serialize> Serialize for OrderedEntry<'_, K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(self.key())?;
        pair.serialize_element(self.value())?;
        pair.end()
    }
}

fn serialize_entries<'a, S, K, V, I>(len: usize, entries: I, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    K: Serialize + 'a,
    V: Serialize + 'a,
    I: Iterator<Item = OrderedEntry<'a, K, V>>,
{
    let mut map = serializer.serialize_map(Some(len))?;
    for entry in entries {
        map.serialize_entry(entry.key(), entry.value())?;
    }
    map.end()
}

struct EntriesVisitor<M, K, V> {
    expecting: &'static str,
    marker: PhantomData<fn() -> (M, K, V)>,
}

impl<M, K, V> EntriesVisitor<M, K, V> {
    fn new(expecting: &'static str) -> Self {
        EntriesVisitor {
            expecting,
            marker: PhantomData,
        }
    }
}

impl<'de, M, K, V> Visitor<'de> for EntriesVisitor<M, K, V>
where
    M: Default + Extend<(K, V)>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<M, A::Error> {
        let mut map = M::default();

        // later duplicates replace earlier ones, as with `set`
        while let Some((key, value)) = access.next_entry::<K, V>()? {
            map.extend(Some((key, value)));
        }

        Ok(map)
    }
}

impl<K, V> Serialize for WhiteGreyBlackTree<K, V>
where
    K: Ord + Clone + Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(self.len(), self.asc(), serializer)
    }
}

impl<'de, K, V> Deserialize<'de> for WhiteGreyBlackTree<K, V>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor::<Self, K, V>::new("a white/grey/black tree map"))
    }
}

impl<K, V, C> Serialize for Trie<K, V, C>
where
    K: Ord + Clone + Serialize,
    V: Serialize,
    C: KeyToBytes<K>,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(self.len(), self.asc(), serializer)
    }
}

impl<'de, K, V, C> Deserialize<'de> for Trie<K, V, C>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
    C: KeyToBytes<K>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor::<Self, K, V>::new("a trie map"))
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens, assert_ser_tokens, assert_tokens, Token};

    use crate::{OrderedEntry, QueryableMap, StringTrie, WhiteGreyBlackTree};

    #[test]
    fn test_tree_tokens() {
        let mut tree = WhiteGreyBlackTree::new();
        tree.set('c', 2_i32);
        tree.set('a', 0_i32);
        tree.set('b', 1_i32);

        assert_tokens(
            &tree,
            &[
                Token::Map { len: Some(3) },
                Token::Char('a'),
                Token::I32(0),
                Token::Char('b'),
                Token::I32(1),
                Token::Char('c'),
                Token::I32(2),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_trie_tokens() {
        let mut trie = StringTrie::<String, u32>::new();
        trie.set("Mijo".to_string(), 2);
        trie.set("Ante".to_string(), 1);

        assert_tokens(
            &trie,
            &[
                Token::Map { len: Some(2) },
                Token::Str("Ante"),
                Token::U32(1),
                Token::Str("Mijo"),
                Token::U32(2),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let mut expected = WhiteGreyBlackTree::new();
        expected.set(1_u8, 'z');

        assert_de_tokens(
            &expected,
            &[
                Token::Map { len: Some(2) },
                Token::U8(1),
                Token::Char('a'),
                Token::U8(1),
                Token::Char('z'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_entry_as_pair() {
        let entry = OrderedEntry::from((&7_u8, &"seven"));

        assert_ser_tokens(
            &entry,
            &[
                Token::Tuple { len: 2 },
                Token::U8(7),
                Token::Str("seven"),
                Token::TupleEnd,
            ],
        );
    }
}
