use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use entity_slots::Entity;
use entity_slots::EntityId;
use entity_slots::HashSet as SlotSet;
use entity_slots::hasher::IdBuildHasher;
use hashbrown::HashSet as HashbrownSet;
use rand::Rng;
use rand::SeedableRng;
use rand::distr;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;

const SIZES: &[usize] = &[
    (1 << 6),
    (1 << 8),
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
];

fn shuffled_keys(len: usize) -> Vec<i32> {
    let mut keys = (0..len as i32).collect::<Vec<i32>>();
    keys.shuffle(&mut SmallRng::from_os_rng());
    keys
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = shuffled_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("entity_slots/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut set = SlotSet::with_hasher(IdBuildHasher);
                    for key in keys {
                        black_box(set.insert(key));
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("entity_slots_preallocated/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut set = SlotSet::with_capacity_and_hasher(size, IdBuildHasher);
                    for key in keys {
                        black_box(set.insert(key));
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut set = HashbrownSet::new();
                    for key in keys {
                        black_box(set.insert(key));
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_uniform(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_uniform");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = shuffled_keys(size);
        let slots: SlotSet<i32, IdBuildHasher> = keys.iter().copied().collect();
        let brown: HashbrownSet<i32> = keys.iter().copied().collect();

        // Half of the probes miss.
        let mut rng = SmallRng::from_os_rng();
        let uniform = distr::Uniform::new(0, size as i32 * 2).unwrap();
        let probes = (0..size).map(|_| rng.sample(uniform)).collect::<Vec<i32>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("entity_slots/{size}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(slots.contains(probe));
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(brown.contains(probe));
                }
            })
        });
    }

    group.finish();
}

fn bench_find_zipf(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_zipf");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = shuffled_keys(size);
        let slots: SlotSet<i32, IdBuildHasher> = keys.iter().copied().collect();
        let brown: HashbrownSet<i32> = keys.iter().copied().collect();

        let mut rng = SmallRng::from_os_rng();
        let zipf = Zipf::new(size as f32, 1.0).unwrap();
        let probes = (0..size)
            .map(|_| rng.sample(zipf) as i32 - 1)
            .collect::<Vec<i32>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("entity_slots/{size}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(slots.contains(probe));
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(brown.contains(probe));
                }
            })
        });
    }

    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        // Every key appears twice: the first occurrence inserts, the second
        // removes, so the free-list is exercised throughout.
        let mut ops = shuffled_keys(size);
        ops.extend(shuffled_keys(size));
        ops.shuffle(&mut SmallRng::from_os_rng());

        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function(format!("entity_slots/{size}"), |b| {
            b.iter(|| {
                let mut set = SlotSet::with_hasher(IdBuildHasher);
                for key in &ops {
                    if !set.insert(*key) {
                        set.remove(key);
                    }
                }
                black_box(set)
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut set = HashbrownSet::new();
                for key in &ops {
                    if !set.insert(*key) {
                        set.remove(key);
                    }
                }
                black_box(set)
            })
        });
    }

    group.finish();
}

fn bench_entity_tags(c: &mut Criterion) {
    let mut group = c.benchmark_group("entity_tags");

    for &tags in &[4usize, 16, 64] {
        group.throughput(Throughput::Elements(tags as u64 * 2));
        group.bench_function(format!("add_remove/{tags}"), |b| {
            b.iter_batched(
                || Entity::new(EntityId::new(0), "bench"),
                |mut entity| {
                    for tag in 0..tags as i32 {
                        black_box(entity.add_tag(tag));
                    }
                    for tag in 0..tags as i32 {
                        black_box(entity.remove_tag(tag));
                    }
                    black_box(entity)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_find_uniform,
    bench_find_zipf,
    bench_churn,
    bench_entity_tags,
);

criterion_main!(benches);
