//! B-tree benchmarks across minimum degrees.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use degreetree::{BTree, Key};

const N: Key = 10_000;
const DEGREES: [usize; 4] = [2, 4, 16, 64];

/// Keys 0..N in a fixed scrambled order (7919 is coprime with N).
fn scrambled() -> Vec<Key> {
    (0..N).map(|i| (i * 7919) % N).collect()
}

fn bench_insert(c: &mut Criterion) {
    let ascending: Vec<Key> = (0..N).collect();
    let scrambled = scrambled();
    let mut group = c.benchmark_group("insert");

    for t in DEGREES {
        group.bench_with_input(BenchmarkId::new("ascending", t), &t, |b, &t| {
            b.iter(|| BTree::create(t, black_box(&ascending)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("scrambled", t), &t, |b, &t| {
            b.iter(|| BTree::create(t, black_box(&scrambled)).unwrap())
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let keys = scrambled();
    let mut group = c.benchmark_group("search");

    for t in DEGREES {
        let tree = BTree::create(t, &keys).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(t), &tree, |b, tree| {
            b.iter(|| {
                let mut hits = 0usize;
                for key in (0..N * 2).step_by(7) {
                    if tree.contains(black_box(key)) {
                        hits += 1;
                    }
                }
                hits
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let keys = scrambled();
    let mut group = c.benchmark_group("remove");

    for t in DEGREES {
        let order: Vec<Key> = keys.iter().rev().copied().collect();
        group.bench_with_input(BenchmarkId::from_parameter(t), &t, |b, &t| {
            b.iter_batched(
                || BTree::create(t, &keys).unwrap(),
                |mut tree| {
                    for &key in &order {
                        tree.remove(key);
                    }
                    tree
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_search, bench_remove);
criterion_main!(benches);
