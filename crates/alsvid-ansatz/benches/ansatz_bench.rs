//! Benchmarks for template assembly
//!
//! Run with: cargo bench -p alsvid-ansatz

use alsvid_ansatz::{Entanglement, RyRz};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Benchmark building the template at growing qubit counts.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("ryrz_build");

    for num_qubits in &[2, 5, 10, 20, 50] {
        group.bench_with_input(
            BenchmarkId::new("linear", num_qubits),
            num_qubits,
            |b, &n| {
                let ansatz = RyRz::new(n)
                    .with_reps(3)
                    .with_entanglement(Entanglement::Linear);
                b.iter(|| black_box(&ansatz).build().unwrap());
            },
        );

        group.bench_with_input(
            BenchmarkId::new("full", num_qubits),
            num_qubits,
            |b, &n| {
                let ansatz = RyRz::new(n).with_reps(3);
                b.iter(|| black_box(&ansatz).build().unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark the closed-form parameter count against a full build.
fn bench_num_parameters(c: &mut Criterion) {
    let mut group = c.benchmark_group("ryrz_num_parameters");

    let ansatz = RyRz::new(20)
        .with_reps(3)
        .with_entanglement(Entanglement::Circular);

    group.bench_function("closed_form", |b| {
        b.iter(|| black_box(&ansatz).num_parameters().unwrap());
    });

    group.bench_function("via_build", |b| {
        b.iter(|| black_box(&ansatz).build().unwrap().num_parameters());
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_num_parameters);
criterion_main!(benches);
