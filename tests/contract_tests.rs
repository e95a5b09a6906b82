//! The same expectations run against every map in the crate.
use queryable_map::{Order, OrderedEntry, Query, QueryableMap, StringTrie, WhiteGreyBlackTree};

type Tree = WhiteGreyBlackTree<String, i32>;
type Names = StringTrie<String, i32>;

const WORDS: [&str; 10] = [
    "pear", "apple", "plum", "fig", "kiwi", "lime", "date", "grape", "melon", "cherry",
];

fn s(key: &str) -> String {
    key.to_string()
}

fn filled<M: QueryableMap<String, i32> + Default>() -> M {
    let mut map = M::default();
    for (i, word) in WORDS.iter().enumerate() {
        assert_eq!(map.set(s(word), i as i32), None);
    }
    map
}

fn sorted_words() -> Vec<&'static str> {
    let mut words = WORDS.to_vec();
    words.sort();
    words
}

fn collect<M: QueryableMap<String, i32>>(map: &M, query: Query<String>, order: Order) -> Vec<String> {
    map.range(query, order).map(|e| e.key().clone()).collect()
}

fn check_point_operations<M: QueryableMap<String, i32> + Default>() {
    let mut map: M = filled();

    assert_eq!(map.len(), WORDS.len());
    assert!(!map.is_empty());
    assert_eq!(map.get(&s("kiwi")), Some(&4));
    assert_eq!(map.get(&s("banana")), None);
    assert!(map.contains_key(&s("fig")));

    assert_eq!(map.set(s("kiwi"), 40), Some(4));
    assert_eq!(map.len(), WORDS.len());
    assert_eq!(map.get_entry(&s("kiwi")).map(|e| *e.value()), Some(40));

    assert_eq!(map.remove(&s("kiwi")), Some(40));
    assert_eq!(map.remove(&s("kiwi")), None);
    assert_eq!(map.len(), WORDS.len() - 1);
    assert!(map.asc().all(|e| e.key() != "kiwi"));
}

fn check_ordering<M: QueryableMap<String, i32> + Default>() {
    let map: M = filled();
    let sorted = sorted_words();

    let asc: Vec<String> = map.asc().map(|e| e.key().clone()).collect();
    let mut desc: Vec<String> = map.desc().map(|e| e.key().clone()).collect();
    assert_eq!(asc, sorted);
    desc.reverse();
    assert_eq!(desc, sorted);

    assert_eq!(map.first().map(|e| e.key().clone()), Some(s("apple")));
    assert_eq!(map.last().map(|e| e.key().clone()), Some(s("plum")));
}

fn check_range_queries<M: QueryableMap<String, i32> + Default>() {
    let map: M = filled();
    let sorted = sorted_words();

    // every bound, stored or not, against a brute force filter
    let bounds = ["", "a", "apple", "b", "fig", "figs", "kiwi", "m", "plum", "z"];
    for bound in bounds.iter() {
        let b = s(bound);
        let shapes = [
            (Query::BiggerThan(b.clone()), sorted.iter().filter(|w| **w > *bound).cloned().collect::<Vec<_>>()),
            (Query::BiggerThanEquals(b.clone()), sorted.iter().filter(|w| **w >= *bound).cloned().collect()),
            (Query::LessThan(b.clone()), sorted.iter().filter(|w| **w < *bound).cloned().collect()),
            (Query::LessThanEquals(b.clone()), sorted.iter().filter(|w| **w <= *bound).cloned().collect()),
            (Query::NotEquals(b.clone()), sorted.iter().filter(|w| **w != *bound).cloned().collect()),
            (Query::Equals(b.clone()), sorted.iter().filter(|w| **w == *bound).cloned().collect()),
        ];

        for (query, expected) in shapes.iter() {
            assert_eq!(collect(&map, query.clone(), Order::Asc), *expected, "{:?} asc", query);
            let mut desc = collect(&map, query.clone(), Order::Desc);
            desc.reverse();
            assert_eq!(desc, *expected, "{:?} desc", query);
        }

        for high in bounds.iter() {
            let expected: Vec<&str> = sorted
                .iter()
                .filter(|w| **w >= *bound && **w <= *high)
                .cloned()
                .collect();
            let got: Vec<String> = map.between_asc(&b, &s(high)).map(|e| e.key().clone()).collect();
            assert_eq!(got, expected, "between {:?} and {:?}", bound, high);
        }
    }
}

fn keys<'a, I: Iterator<Item = OrderedEntry<'a, String, i32>>>(iter: I) -> Vec<String> {
    iter.map(|e| e.key().clone()).collect()
}

fn check_named_queries<M: QueryableMap<String, i32> + Default>() {
    let map: M = filled();

    assert_eq!(keys(map.bigger_than_asc(&s("lime"))), vec!["melon", "pear", "plum"]);
    assert_eq!(keys(map.bigger_than_desc(&s("lime"))), vec!["plum", "pear", "melon"]);
    assert_eq!(keys(map.bigger_than_equals_asc(&s("lime"))), vec!["lime", "melon", "pear", "plum"]);
    assert_eq!(keys(map.less_than_desc(&s("date"))), vec!["cherry", "apple"]);
    assert_eq!(keys(map.less_than_equals_asc(&s("date"))), vec!["apple", "cherry", "date"]);
    assert_eq!(keys(map.less_than_equals_desc(&s("d"))), vec!["cherry", "apple"]);
    assert_eq!(keys(map.between_desc(&s("fig"), &s("kiwi"))), vec!["kiwi", "grape", "fig"]);
    assert_eq!(keys(map.equals(&s("grape"))), vec!["grape"]);
    assert_eq!(keys(map.not_equals_desc(&s("grape"))).len(), WORDS.len() - 1);
}

fn check_remove_from_empty<M: QueryableMap<String, i32> + Default>() {
    let mut map = M::default();

    assert_eq!(map.remove(&s("junit2")), None);
    assert_eq!(map.len(), 0);
    assert!(map.asc().next().is_none());
    assert!(map.first().is_none());
}

fn check_clear<M: QueryableMap<String, i32> + Default>() {
    let mut map: M = filled();
    map.clear();

    assert!(map.is_empty());
    assert!(map.desc().next().is_none());
    assert_eq!(map.get(&s("fig")), None);

    // usable again afterwards
    map.set(s("fig"), 1);
    assert_eq!(map.len(), 1);
}

fn check_remove_everything<M: QueryableMap<String, i32> + Default>() {
    let mut map: M = filled();

    for (i, word) in WORDS.iter().enumerate() {
        assert_eq!(map.remove(&s(word)), Some(i as i32));
        assert_eq!(map.get(&s(word)), None);
        assert_eq!(map.len(), WORDS.len() - i - 1);

        let remaining: Vec<String> = map.asc().map(|e| e.key().clone()).collect();
        let mut expected: Vec<&str> = WORDS[i + 1..].to_vec();
        expected.sort();
        assert_eq!(remaining, expected);
    }
}

macro_rules! contract_tests {
    ($module:ident, $map:ty) => {
        mod $module {
            use super::*;

            #[test]
            fn point_operations() {
                check_point_operations::<$map>();
            }

            #[test]
            fn ordering() {
                check_ordering::<$map>();
            }

            #[test]
            fn range_queries() {
                check_range_queries::<$map>();
            }

            #[test]
            fn named_queries() {
                check_named_queries::<$map>();
            }

            #[test]
            fn remove_from_empty() {
                check_remove_from_empty::<$map>();
            }

            #[test]
            fn clear() {
                check_clear::<$map>();
            }

            #[test]
            fn remove_everything() {
                check_remove_everything::<$map>();
            }
        }
    };
}

contract_tests!(wgb, Tree);
contract_tests!(trie, Names);

#[test]
fn test_both_maps_agree() {
    let tree: Tree = filled();
    let trie: Names = filled();

    let from_tree: Vec<(String, i32)> = tree.asc().map(|e| e.to_owned_pair()).collect();
    let from_trie: Vec<(String, i32)> = trie.asc().map(|e| e.to_owned_pair()).collect();
    assert_eq!(from_tree, from_trie);

    assert_eq!(tree.name(), "wgb");
    assert_eq!(trie.name(), "trie");
}
