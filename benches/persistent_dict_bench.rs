//! Benchmark for PersistentDict vs standard BTreeMap.
//!
//! Compares the persistent red-black tree against Rust's standard BTreeMap
//! for common operations. BTreeMap updates in place, so its numbers are a
//! lower bound rather than a like-for-like comparison.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_dict::persistent::PersistentDict;
use std::collections::BTreeMap;
use std::hint::black_box;

const SIZES: [i32; 3] = [100, 1000, 10000];

/// Scatters `0..size` so inserts do not arrive in ascending order.
fn scattered_keys(size: i32) -> Vec<i32> {
    (0..size).map(|index| (index * 7919) % size).collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in SIZES {
        let keys = scattered_keys(size);

        group.bench_with_input(BenchmarkId::new("PersistentDict", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut dict = PersistentDict::new();
                for &key in keys {
                    dict = dict.insert(black_box(key), black_box(key * 2));
                }
                black_box(dict)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in SIZES {
        let persistent_dict: PersistentDict<i32, i32> =
            (0..size).map(|index| (index, index * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();

        group.bench_with_input(BenchmarkId::new("PersistentDict", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0_i64;
                for key in 0..size {
                    if let Some(&value) = persistent_dict.get(&black_box(key)) {
                        sum += i64::from(value);
                    }
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0_i64;
                for key in 0..size {
                    if let Some(&value) = standard_map.get(&black_box(key)) {
                        sum += i64::from(value);
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in SIZES {
        let keys = scattered_keys(size);
        let persistent_dict: PersistentDict<i32, i32> = keys.iter().map(|&key| (key, key)).collect();
        let standard_map: BTreeMap<i32, i32> = keys.iter().map(|&key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("PersistentDict", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut dict = persistent_dict.clone();
                for key in keys {
                    dict = dict.remove(black_box(key));
                }
                black_box(dict)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = standard_map.clone();
                for key in keys {
                    map.remove(black_box(key));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// iteration and derived operation Benchmarks
// =============================================================================

fn benchmark_iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iter");

    for size in SIZES {
        let persistent_dict: PersistentDict<i32, i32> =
            (0..size).map(|index| (index, index)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index)).collect();

        group.bench_with_input(BenchmarkId::new("PersistentDict", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = persistent_dict.values().map(|&value| i64::from(value)).sum();
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i64 = standard_map.values().map(|&value| i64::from(value)).sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

fn benchmark_union(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("union");

    for size in SIZES {
        let evens: PersistentDict<i32, i32> = (0..size).map(|index| (index * 2, index)).collect();
        let odds: PersistentDict<i32, i32> = (0..size).map(|index| (index * 2 + 1, index)).collect();

        group.bench_with_input(BenchmarkId::new("merge_walk", size), &size, |bencher, _| {
            bencher.iter(|| black_box(evens.union(&odds)));
        });

        group.bench_with_input(BenchmarkId::new("repeated_insert", size), &size, |bencher, _| {
            bencher.iter(|| {
                let union = odds
                    .iter()
                    .fold(evens.clone(), |dict, (key, value)| dict.insert(*key, *value));
                black_box(union)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_get,
    benchmark_remove,
    benchmark_iter,
    benchmark_union
);

criterion_main!(benches);
