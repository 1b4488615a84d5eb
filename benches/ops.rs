//! Micro-operation benchmarks for the frequency set.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency for fresh inserts, touches under smooth
//! and skewed access patterns, and ordered traversal.

use std::hint::black_box;
use std::time::Instant;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use freqset::FrequencySet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZE: u64 = 16_384;
const OPS: u64 = 100_000;

// ============================================================================
// Insert (all new values)
// ============================================================================

fn bench_insert_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_new");
    group.throughput(Throughput::Elements(SIZE));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut set = FrequencySet::with_capacity(SIZE as usize);
            for value in 0..SIZE {
                set.add(black_box(value));
            }
            set
        })
    });

    group.finish();
}

// ============================================================================
// Touch (re-adding present values)
// ============================================================================

fn bench_touch(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch");
    group.throughput(Throughput::Elements(OPS));

    // Round-robin touches: weights rise together, relocations stay shallow.
    group.bench_function("uniform", |b| {
        b.iter_custom(|iters| {
            let mut set = FrequencySet::with_capacity(SIZE as usize);
            for value in 0..SIZE {
                set.add(value);
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    set.add(black_box(i % SIZE));
                }
            }
            start.elapsed()
        })
    });

    // Skewed touches: a small hot set climbs toward the head and stays.
    group.bench_function("skewed", |b| {
        b.iter_custom(|iters| {
            let mut set = FrequencySet::with_capacity(SIZE as usize);
            for value in 0..SIZE {
                set.add(value);
            }
            let mut rng = StdRng::seed_from_u64(42);
            let start = Instant::now();
            for _ in 0..iters {
                for _ in 0..OPS {
                    let value = if rng.gen::<f64>() < 0.9 {
                        rng.gen_range(0..SIZE / 100)
                    } else {
                        rng.gen_range(0..SIZE)
                    };
                    set.add(black_box(value));
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Ordered traversal
// ============================================================================

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    group.throughput(Throughput::Elements(SIZE));

    group.bench_function("weighted", |b| {
        let mut set = FrequencySet::with_capacity(SIZE as usize);
        let mut rng = StdRng::seed_from_u64(7);
        for value in 0..SIZE {
            set.add(value);
            for _ in 0..rng.gen_range(0..4) {
                set.add(value);
            }
        }
        b.iter(|| {
            let mut total = 0u64;
            for (_, weight) in set.weighted_iter() {
                total += weight;
            }
            black_box(total)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_insert_new, bench_touch, bench_iter);
criterion_main!(benches);
