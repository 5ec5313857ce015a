use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fractonica::ephemeris::{find_closest, fraction_at, MemorySource};

/// Roughly 3000 years of new moons, one every mean synodic month.
fn synthetic_table() -> Vec<i64> {
    let start = -30_000_000_000_i64;
    (0..37_000).map(|i| start + i * 2_551_443).collect()
}

fn random_queries(rng: &mut StdRng, table: &[i64], samples: usize) -> Vec<i64> {
    let (first, last) = (table[0], table[table.len() - 1]);
    (0..samples)
        .map(|_| rng.random_range(first..=last))
        .collect()
}

fn bench_find_closest(c: &mut Criterion) {
    let table = synthetic_table();
    let source = MemorySource::new(&table).unwrap();
    let mut rng = StdRng::seed_from_u64(0xF2AC);

    c.bench_function("find_closest/random", |b| {
        b.iter_batched(
            || random_queries(&mut rng, &table, 10_000),
            |queries| {
                for ts in queries {
                    black_box(find_closest(&source, black_box(ts)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_fraction_at(c: &mut Criterion) {
    let table = synthetic_table();
    let source = MemorySource::new(&table).unwrap();
    let mut rng = StdRng::seed_from_u64(0xF2AD);

    c.bench_function("fraction_at/cold", |b| {
        b.iter_batched(
            || random_queries(&mut rng, &table, 10_000),
            |queries| {
                for ts in queries {
                    black_box(fraction_at(&source, black_box(ts), 4_096, None));
                }
            },
            BatchSize::SmallInput,
        )
    });

    // A polling loop: one query per second, the window stays warm
    let start = table[18_000] + 1;
    c.bench_function("fraction_at/polling", |b| {
        b.iter(|| {
            let mut window = None;
            for ts in start..start + 10_000 {
                let (result, next) = fraction_at(&source, black_box(ts), 4_096, window);
                window = next;
                black_box(result);
            }
        })
    });
}

criterion_group!(benches, bench_find_closest, bench_fraction_at);
criterion_main!(benches);
