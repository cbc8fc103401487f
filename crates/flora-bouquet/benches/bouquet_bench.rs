use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flora_bouquet::{Bouquet, BouquetConfig, InstanceManager, NullRenderer};
use flora_core::{default_bouquet, ColorGradient, ParameterSet, NOMINAL_FRAME_DT};

fn bench_frame_default(c: &mut Criterion) {
    let mut bouquet = Bouquet::new(BouquetConfig::default(), NullRenderer);
    c.bench_function("bouquet_frame_6x30x1200", |b| {
        b.iter(|| black_box(bouquet.frame(NOMINAL_FRAME_DT)));
    });
}

fn bench_frame_paused(c: &mut Criterion) {
    let mut bouquet = Bouquet::new(BouquetConfig::default(), NullRenderer);
    bouquet.command_sender().toggle_playback();
    c.bench_function("bouquet_frame_paused", |b| {
        b.iter(|| black_box(bouquet.frame(NOMINAL_FRAME_DT)));
    });
}

fn bench_regenerate(c: &mut Criterion) {
    let params = ParameterSet::default();
    let gradient = ColorGradient::default();
    let mut renderer = NullRenderer;
    let mut manager = InstanceManager::new();
    manager.create_all(&default_bouquet(), &params, &gradient, &mut renderer);
    c.bench_function("regenerate_all_default", |b| {
        b.iter(|| manager.regenerate_all(&params, &gradient, &mut renderer));
    });
}

criterion_group!(benches, bench_frame_default, bench_frame_paused, bench_regenerate);
criterion_main!(benches);
