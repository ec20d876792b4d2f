//! Benchmarks for the PATRICIA trie
//!
//! Compares the trie against the standard library maps:
//! - HashMap (std::collections::HashMap) for point operations
//! - BTreeMap (std::collections::BTreeMap) for ordered operations
//!
//! Closest-match queries and the snapshot view have no direct std
//! equivalent; rough analogs are included where they make sense.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use patricia_map::{Decision, PatriciaIntTrie, PatriciaTrie};

// =============================================================================
// BENCHMARK DATA GENERATORS
// =============================================================================

/// Sequential keys with a shared prefix and a numeric tail.
fn generate_sequential_keys(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("seq_key_{:08}", i).into_bytes())
        .collect()
}

/// Keys clustered under a handful of shared prefixes.
fn generate_prefix_heavy_keys(count: usize) -> Vec<Vec<u8>> {
    let prefixes = [
        "application",
        "applications",
        "apply",
        "approve",
        "banana",
        "band",
        "bandana",
        "cat",
        "category",
        "catalog",
    ];

    let mut keys = Vec::new();
    for i in 0..count {
        let prefix = prefixes[i % prefixes.len()];
        let key = format!("{}_item_{:06}", prefix, i / prefixes.len());
        keys.push(key.into_bytes());
    }

    keys.sort();
    keys.dedup();
    keys
}

/// Printable-ASCII keys of varied length from a seeded generator.
fn generate_random_ascii_keys(count: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut state = seed | 1;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state
    };

    let mut keys = Vec::with_capacity(count);
    for _ in 0..count {
        let len = 8 + (next() % 40) as usize;
        let mut key = Vec::with_capacity(len);
        for _ in 0..len {
            key.push((next() % 94 + 33) as u8);
        }
        keys.push(key);
    }

    keys.sort();
    keys.dedup();
    keys
}

/// Scattered u32 keys; the affine step has full period, so no duplicates.
fn generate_scattered_u32_keys(count: usize) -> Vec<u32> {
    let mut key = 1u32;
    (0..count)
        .map(|_| {
            key = key.wrapping_mul(2_654_435_761).wrapping_add(1);
            key
        })
        .collect()
}

// =============================================================================
// INSERTION PERFORMANCE BENCHMARKS
// =============================================================================

fn bench_insertion_performance(c: &mut Criterion) {
    let test_cases = vec![
        ("sequential_1k", generate_sequential_keys(1000)),
        ("sequential_10k", generate_sequential_keys(10000)),
        ("prefix_heavy_10k", generate_prefix_heavy_keys(10000)),
        ("random_ascii_10k", generate_random_ascii_keys(10000, 42)),
    ];

    let mut group = c.benchmark_group("insertion_performance");

    for (name, keys) in &test_cases {
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("patricia_trie", name), keys, |b, keys| {
            b.iter_batched(
                || PatriciaTrie::new(),
                |mut trie| {
                    for (i, key) in keys.iter().enumerate() {
                        black_box(trie.insert(key.clone(), i).unwrap());
                    }
                    trie
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("hashmap", name), keys, |b, keys| {
            b.iter_batched(
                || HashMap::new(),
                |mut map| {
                    for (i, key) in keys.iter().enumerate() {
                        black_box(map.insert(key.clone(), i));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("btreemap", name), keys, |b, keys| {
            b.iter_batched(
                || BTreeMap::new(),
                |mut map| {
                    for (i, key) in keys.iter().enumerate() {
                        black_box(map.insert(key.clone(), i));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// =============================================================================
// LOOKUP PERFORMANCE BENCHMARKS
// =============================================================================

fn bench_lookup_performance(c: &mut Criterion) {
    let test_cases = vec![
        ("sequential_10k", generate_sequential_keys(10000)),
        ("prefix_heavy_10k", generate_prefix_heavy_keys(10000)),
        ("random_ascii_10k", generate_random_ascii_keys(10000, 42)),
    ];

    let mut group = c.benchmark_group("lookup_performance");

    for (name, keys) in &test_cases {
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("patricia_trie", name), keys, |b, keys| {
            let mut trie = PatriciaTrie::new();
            for (i, key) in keys.iter().enumerate() {
                trie.insert(key.clone(), i).unwrap();
            }

            b.iter(|| {
                for key in keys {
                    black_box(trie.get(key));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("hashmap", name), keys, |b, keys| {
            let mut map = HashMap::new();
            for (i, key) in keys.iter().enumerate() {
                map.insert(key.clone(), i);
            }

            b.iter(|| {
                for key in keys {
                    black_box(map.get(key));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("btreemap", name), keys, |b, keys| {
            let mut map = BTreeMap::new();
            for (i, key) in keys.iter().enumerate() {
                map.insert(key.clone(), i);
            }

            b.iter(|| {
                for key in keys {
                    black_box(map.get(key));
                }
            })
        });
    }

    group.finish();
}

// =============================================================================
// CLOSEST-MATCH BENCHMARKS
// =============================================================================

fn bench_closest_match(c: &mut Criterion) {
    let keys = generate_prefix_heavy_keys(10000);

    // Probes miss: the last byte is flipped into a different letter.
    let probes: Vec<Vec<u8>> = keys
        .iter()
        .map(|k| {
            let mut p = k.clone();
            if let Some(last) = p.last_mut() {
                *last = if *last == b'z' { b'y' } else { b'z' };
            }
            p
        })
        .collect();

    let mut trie = PatriciaTrie::new();
    for (i, key) in keys.iter().enumerate() {
        trie.insert(key.clone(), i).unwrap();
    }
    let mut map = BTreeMap::new();
    for (i, key) in keys.iter().enumerate() {
        map.insert(key.clone(), i);
    }

    let mut group = c.benchmark_group("closest_match");
    group.throughput(Throughput::Elements(probes.len() as u64));

    group.bench_function("patricia_select", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(trie.select(probe));
            }
        })
    });

    group.bench_function("patricia_select_with_stop", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(trie.select_with(probe, |_, _| Decision::Stop));
            }
        })
    });

    // Not the same query, but the closest ordered-map idiom: the nearest
    // entry at or below the probe.
    group.bench_function("btreemap_range_prev", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(map.range(..=probe.as_slice()).next_back());
            }
        })
    });

    group.finish();
}

// =============================================================================
// ORDERED ITERATION BENCHMARKS
// =============================================================================

fn bench_ordered_iteration(c: &mut Criterion) {
    let keys = generate_random_ascii_keys(10000, 7);

    let mut trie = PatriciaTrie::new();
    let mut map = BTreeMap::new();
    for (i, key) in keys.iter().enumerate() {
        trie.insert(key.clone(), i).unwrap();
        map.insert(key.clone(), i);
    }

    let mut group = c.benchmark_group("ordered_iteration");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("patricia_iter", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (_, v) in trie.iter() {
                total = total.wrapping_add(*v);
            }
            black_box(total)
        })
    });

    group.bench_function("patricia_traverse", |b| {
        b.iter(|| {
            let mut total = 0usize;
            trie.traverse(|_, v| {
                total = total.wrapping_add(*v);
                Decision::Continue
            });
            black_box(total)
        })
    });

    group.bench_function("btreemap_iter", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for (_, v) in map.iter() {
                total = total.wrapping_add(*v);
            }
            black_box(total)
        })
    });

    group.finish();
}

// =============================================================================
// SNAPSHOT VIEW BENCHMARKS
// =============================================================================

fn bench_entries_view(c: &mut Criterion) {
    let keys = generate_random_ascii_keys(10000, 99);

    let mut group = c.benchmark_group("entries_view");
    group.throughput(Throughput::Elements(keys.len() as u64));

    // Cold: every iteration pays for recording the order.
    group.bench_function("snapshot_build", |b| {
        b.iter_batched(
            || {
                let mut trie = PatriciaTrie::new();
                for (i, key) in keys.iter().enumerate() {
                    trie.insert(key.clone(), i).unwrap();
                }
                trie
            },
            |mut trie| {
                let n = trie.entries().len();
                black_box(n)
            },
            BatchSize::SmallInput,
        )
    });

    // Warm: the snapshot is already cached, reads are indexed.
    group.bench_function("snapshot_indexed_reads", |b| {
        let mut trie = PatriciaTrie::new();
        for (i, key) in keys.iter().enumerate() {
            trie.insert(key.clone(), i).unwrap();
        }
        let count = trie.entries().len();

        b.iter(|| {
            let entries = trie.entries();
            let mut total = 0usize;
            for i in 0..count {
                if let Some((_, v)) = entries.get(i) {
                    total = total.wrapping_add(*v);
                }
            }
            black_box(total)
        })
    });

    group.finish();
}

// =============================================================================
// REMOVAL BENCHMARKS
// =============================================================================

fn bench_removal(c: &mut Criterion) {
    let keys = generate_sequential_keys(1000);
    let doomed: Vec<_> = keys.iter().step_by(10).cloned().collect();

    let mut group = c.benchmark_group("removal");
    group.throughput(Throughput::Elements(doomed.len() as u64));

    // Non-zero-key removal rebuilds, so this is the expensive path.
    group.bench_function("patricia_remove", |b| {
        b.iter_batched(
            || {
                let mut trie = PatriciaTrie::new();
                for (i, key) in keys.iter().enumerate() {
                    trie.insert(key.clone(), i).unwrap();
                }
                trie
            },
            |mut trie| {
                for key in &doomed {
                    black_box(trie.remove(key));
                }
                trie
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("patricia_retain", |b| {
        b.iter_batched(
            || {
                let mut trie = PatriciaTrie::new();
                for (i, key) in keys.iter().enumerate() {
                    trie.insert(key.clone(), i).unwrap();
                }
                trie
            },
            |mut trie| {
                trie.retain(|_, v| *v % 10 != 0);
                trie
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("btreemap_remove", |b| {
        b.iter_batched(
            || {
                let mut map = BTreeMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.insert(key.clone(), i);
                }
                map
            },
            |mut map| {
                for key in &doomed {
                    black_box(map.remove(key));
                }
                map
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// =============================================================================
// INTEGER KEY BENCHMARKS
// =============================================================================

fn bench_integer_keys(c: &mut Criterion) {
    let keys = generate_scattered_u32_keys(10000);

    let mut group = c.benchmark_group("integer_keys");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("patricia_int_insert", |b| {
        b.iter_batched(
            || PatriciaIntTrie::default(),
            |mut trie| {
                for &key in &keys {
                    black_box(trie.insert(key, key).unwrap());
                }
                trie
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("btreemap_insert", |b| {
        b.iter_batched(
            || BTreeMap::new(),
            |mut map| {
                for &key in &keys {
                    black_box(map.insert(key, key));
                }
                map
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("patricia_int_lookup", |b| {
        let mut trie = PatriciaIntTrie::default();
        for &key in &keys {
            trie.insert(key, key).unwrap();
        }

        b.iter(|| {
            for key in &keys {
                black_box(trie.get(key));
            }
        })
    });

    group.bench_function("btreemap_lookup", |b| {
        let mut map = BTreeMap::new();
        for &key in &keys {
            map.insert(key, key);
        }

        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });

    group.finish();
}

// =============================================================================
// BENCHMARK GROUPS
// =============================================================================

criterion_group!(
    name = patricia_benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(20);
    targets =
        bench_insertion_performance,
        bench_lookup_performance,
        bench_closest_match,
        bench_ordered_iteration,
        bench_entries_view,
        bench_removal,
        bench_integer_keys
);

criterion_main!(patricia_benches);
