use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use queryable_map::{QueryableMap, StringTrie, WhiteGreyBlackTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn random_keys(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(3..12);
            (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}

fn filled<M: QueryableMap<String, usize> + Default>(keys: &[String]) -> M {
    let mut map = M::default();
    for (i, key) in keys.iter().enumerate() {
        map.set(key.clone(), i);
    }
    map
}

/// Benchmark filling an empty map with random keys
fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");

    for size in SIZES.iter() {
        let keys = random_keys(*size);

        group.bench_with_input(BenchmarkId::new("wgb", size), &keys, |b, keys| {
            b.iter(|| black_box(filled::<WhiteGreyBlackTree<String, usize>>(keys)));
        });

        group.bench_with_input(BenchmarkId::new("trie", size), &keys, |b, keys| {
            b.iter(|| black_box(filled::<StringTrie<String, usize>>(keys)));
        });
    }

    group.finish();
}

/// Benchmark point lookups of stored keys
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    for size in SIZES.iter() {
        let keys = random_keys(*size);
        let tree: WhiteGreyBlackTree<String, usize> = filled(&keys);
        let trie: StringTrie<String, usize> = filled(&keys);

        group.bench_with_input(BenchmarkId::new("wgb", size), &keys, |b, keys| {
            b.iter(|| keys.iter().filter_map(|k| tree.get(k)).sum::<usize>());
        });

        group.bench_with_input(BenchmarkId::new("trie", size), &keys, |b, keys| {
            b.iter(|| keys.iter().filter_map(|k| trie.get(k)).sum::<usize>());
        });
    }

    group.finish();
}

/// Benchmark a full ascending traversal
fn bench_asc(c: &mut Criterion) {
    let mut group = c.benchmark_group("asc");

    for size in SIZES.iter() {
        let keys = random_keys(*size);
        let tree: WhiteGreyBlackTree<String, usize> = filled(&keys);
        let trie: StringTrie<String, usize> = filled(&keys);

        group.bench_function(BenchmarkId::new("wgb", size), |b| {
            b.iter(|| black_box(tree.asc().count()));
        });

        group.bench_function(BenchmarkId::new("trie", size), |b| {
            b.iter(|| black_box(trie.asc().count()));
        });
    }

    group.finish();
}

/// Benchmark a narrow range query, which should not depend on the map size
fn bench_between(c: &mut Criterion) {
    let mut group = c.benchmark_group("between");
    let (low, high) = ("mi".to_string(), "mj".to_string());

    for size in SIZES.iter() {
        let keys = random_keys(*size);
        let tree: WhiteGreyBlackTree<String, usize> = filled(&keys);
        let trie: StringTrie<String, usize> = filled(&keys);

        group.bench_function(BenchmarkId::new("wgb", size), |b| {
            b.iter(|| black_box(tree.between_asc(&low, &high).count()));
        });

        group.bench_function(BenchmarkId::new("trie", size), |b| {
            b.iter(|| black_box(trie.between_asc(&low, &high).count()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_set, bench_get, bench_asc, bench_between);
criterion_main!(benches);
