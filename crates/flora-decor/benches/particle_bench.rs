use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flora_core::default_bouquet;
use flora_decor::{Drift, ParticleField};

fn bench_particle_step(c: &mut Criterion) {
    let mut field = ParticleField::default();
    c.bench_function("particle_step_200", |b| {
        b.iter(|| {
            field.step();
            black_box(field.positions());
        });
    });
}

fn bench_drift_bouquet(c: &mut Criterion) {
    let drift = Drift::default();
    let placements: Vec<_> = default_bouquet().iter().map(|c| c.placement()).collect();
    c.bench_function("drift_6_instances", |b| {
        b.iter(|| {
            for (i, p) in placements.iter().enumerate() {
                black_box(drift.apply(i, *p, black_box(12.5)));
            }
        });
    });
}

criterion_group!(benches, bench_particle_step, bench_drift_bouquet);
criterion_main!(benches);
