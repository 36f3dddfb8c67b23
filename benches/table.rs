use std::collections::HashMap;
use std::hint::black_box;

use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use strtable::Table;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn keys(n: usize, seed: u64) -> Vec<String> {
    let mut keys: Vec<String> = (0..n).map(|i| format!("key_{i:016X}")).collect();
    keys.shuffle(&mut SmallRng::seed_from_u64(seed));
    keys
}

fn filled(keys: &[String]) -> Table<u64> {
    let mut table = Table::new();
    for (i, key) in keys.iter().enumerate() {
        table.set(key.as_str(), i as u64);
    }
    table
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in SIZES {
        let keys = keys(size, 1);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("strtable", size), &keys, |b, keys| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut table = Table::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        table.set(key, i as u64);
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("std", size), &keys, |b, keys| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = HashMap::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        map.insert(key, i as u64);
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for size in SIZES {
        let present = keys(size, 2);
        let missing: Vec<String> = (0..size).map(|i| format!("absent_{i}")).collect();
        let table = filled(&present);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(BenchmarkId::new("hit", size), |b| {
            b.iter(|| {
                for key in &present {
                    black_box(table.get(key));
                }
            })
        });

        group.bench_function(BenchmarkId::new("miss", size), |b| {
            b.iter(|| {
                for key in &missing {
                    black_box(table.has(key));
                }
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for size in SIZES {
        let keys = keys(size, 3);
        let table = filled(&keys);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(BenchmarkId::new("strtable", size), |b| {
            b.iter_batched(
                || table.clone(),
                |mut table| {
                    for key in &keys {
                        black_box(table.remove(key));
                    }
                    table
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_remove);
criterion_main!(benches);
