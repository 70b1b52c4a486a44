use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_multiset::{AvlTree, HashTable, Order};

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen_range(1..=i32::MAX)).collect();

    c.bench_function("tree_insert", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for value in &values {
                tree.insert(*value).unwrap();
            }
            black_box(tree.size())
        })
    });

    let mut tree = AvlTree::new();
    for value in &values {
        tree.insert(*value).unwrap();
    }

    c.bench_function("tree_search", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.search(value));
            }
        })
    });

    c.bench_function("tree_traverse", |b| {
        b.iter(|| black_box(tree.traverse(Order::Inorder)))
    });

    c.bench_function("tree_remove", |b| {
        b.iter(|| {
            let mut tree = tree.copy();
            for value in &values {
                tree.remove(value);
            }
        })
    });

    c.bench_function("tree_split", |b| {
        b.iter(|| black_box(tree.copy().split(i32::MAX / 2)))
    });

    let other = AvlTree::try_from_iter(values.iter().take(N / 10).copied()).unwrap();
    c.bench_function("tree_merge", |b| {
        b.iter(|| {
            let mut tree = tree.copy();
            tree.merge(&other);
            black_box(tree.size())
        })
    });

    c.bench_function("table_put", |b| {
        b.iter(|| {
            let mut table = HashTable::new();
            for value in &values {
                table.put(*value, *value);
            }
            black_box(table.len())
        })
    });

    let mut table = HashTable::new();
    for value in &values {
        table.put(*value, *value);
    }

    c.bench_function("table_get", |b| {
        b.iter(|| {
            for value in &values {
                black_box(table.get(value).ok());
            }
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
