use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use cruise_sim::control::fuzzy::{FuzzyConfig, FuzzyInference, FuzzyLookupTable, FuzzySurface};
use cruise_sim::control::{FuzzyController, Pid};
use cruise_sim::sim::{simulate, SimConfig, Setpoint};
use cruise_sim::vehicle::{presets, Plant};

fn benchmark_surface_evaluation(c: &mut Criterion) {
    let inference = FuzzyInference::new(FuzzyConfig::incremental());
    let table = FuzzyLookupTable::from_inference(&inference, 30, 30);

    c.bench_function("fuzzy_infer_direct", |b| {
        b.iter(|| inference.evaluate(black_box(3.2), black_box(-0.7)))
    });
    c.bench_function("fuzzy_infer_table", |b| {
        b.iter(|| table.evaluate(black_box(3.2), black_box(-0.7)))
    });
    c.bench_function("fuzzy_table_build_30x30", |b| {
        b.iter(|| FuzzyLookupTable::from_inference(&inference, 30, 30))
    });
}

fn benchmark_closed_loop(c: &mut Criterion) {
    let setpoint = Setpoint::Constant(20.0);
    let config = SimConfig::default();
    let mut plant = Plant::new(presets::ferrari());

    let mut pid = Pid::default();
    c.bench_function("simulate_pid_400_steps", |b| {
        b.iter(|| simulate(&mut plant, &mut pid, &setpoint, &config))
    });

    let mut fuzzy = FuzzyController::default();
    c.bench_function("simulate_fuzzy_400_steps", |b| {
        b.iter(|| simulate(&mut plant, &mut fuzzy, &setpoint, &config))
    });
}

criterion_group!(benches, benchmark_surface_evaluation, benchmark_closed_loop);
criterion_main!(benches);
