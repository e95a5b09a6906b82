//! Examples of using the queryable maps
use queryable_map::{QueryableMap, StringTrie, WhiteGreyBlackTree};

// Works with either structure through the shared contract
fn report<M: QueryableMap<String, u32>>(map: &M) {
    println!("{}: {} entries, depth {}, {} nodes", map.name(), map.len(), map.depth(), map.node_count());

    let older: Vec<_> = map
        .bigger_than_asc(&"Mi".to_string())
        .map(|e| e.key().as_str())
        .collect();
    println!("  after \"Mi\": {:?}", older);

    let window: Vec<_> = map
        .between_desc(&"Ante".to_string(), &"Mate".to_string())
        .map(|e| format!("{}={}", e.key(), e.value()))
        .collect();
    println!("  Ante..=Mate, descending: {:?}", window);
}

fn main() {
    let names = ["Iva", "Mijo", "Miljenko", "Miljenka", "Mate", "Petar", "Petra", "Ante", "Tomislav"];

    let mut tree = WhiteGreyBlackTree::new();
    let mut trie = StringTrie::<String, u32>::new();
    for (age, name) in (20..).zip(names.iter()) {
        tree.set(name.to_string(), age);
        trie.set(name.to_string(), age);
    }

    report(&tree);
    report(&trie);

    // Removing keys keeps both structures ordered
    tree.remove(&"Mijo".to_string());
    trie.remove(&"Mijo".to_string());
    assert_eq!(tree.get(&"Mijo".to_string()), None);
    assert_eq!(trie.get(&"Mijo".to_string()), None);

    // Prefix views are specific to the trie
    let view = trie.prefix_view(&"Milj".to_string());
    println!("keys starting with \"Milj\":");
    for entry in &view {
        println!("  {:?}", entry);
    }
}
