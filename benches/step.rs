//! Per-frame stepping throughput for the three effect layers.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use circuitfx::circuit::CircuitSim;
use circuitfx::prelude::*;

fn bench_field_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = FieldSim::new(FieldConfig::default(), 1920.0, 1080.0, &mut rng);
    let cursor = Some(Vec2::new(960.0, 540.0));

    c.bench_function("field_step_1000", |b| {
        b.iter(|| field.step(std::hint::black_box(cursor)))
    });
}

fn bench_circuit_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let seeds = RadialScene::new(8).layout(1920.0, 1080.0);
    let mut circuit = CircuitSim::new(seeds.iter().map(NodeSeed::node).collect(), &mut rng);

    c.bench_function("circuit_step_9_nodes", |b| b.iter(|| circuit.step(&mut rng)));
}

fn bench_circuit_render(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let seeds = RadialScene::new(8).layout(1920.0, 1080.0);
    let circuit = CircuitSim::new(seeds.iter().map(NodeSeed::node).collect(), &mut rng);
    let mut frame = DrawList::new();

    c.bench_function("circuit_render_9_nodes", |b| {
        b.iter(|| {
            frame.clear();
            circuit.render(&mut frame);
        })
    });
}

fn bench_ambient_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(4);
    let mut ambient = AmbientSim::new(AmbientConfig::default(), 1920.0, 1080.0, &mut rng);

    c.bench_function("ambient_step", |b| {
        b.iter(|| ambient.step(1.0 / 60.0, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_field_step,
    bench_circuit_step,
    bench_circuit_render,
    bench_ambient_step
);
criterion_main!(benches);
