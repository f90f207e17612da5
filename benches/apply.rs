//! Benchmarks for gate evolution and verification across register sizes.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qgoal::circuit::{cnot, cz, h, t, toffoli};
use qgoal::easybuild::{ghz_circuit, h_all};
use qgoal::{Circuit, GateOp, State, apply, verify};

/// H, T and an entangling ladder, repeated in layers.
fn mixed_circuit(n: usize, layers: usize) -> Circuit {
    let mut ops: Vec<GateOp> = Vec::new();
    for _ in 0..layers {
        ops.extend((0..n).map(h));
        ops.extend((0..n).map(t));
        ops.extend((0..n - 1).map(|q| cnot(q, q + 1).unwrap()));
        ops.extend((0..n - 1).map(|q| cz(q + 1, q).unwrap()));
        ops.extend((0..n.saturating_sub(2)).map(|q| toffoli(q, q + 1, q + 2).unwrap()));
    }
    Circuit::new(n, ops).unwrap()
}

fn bench_h_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("h_all");
    for n in [4, 8, 12, 16] {
        let circuit = h_all(n);
        let state = State::zero_state(n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| apply(black_box(&circuit), black_box(&state)))
        });
    }
    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    for n in [4, 8, 12] {
        let circuit = mixed_circuit(n, 4);
        let state = State::zero_state(n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| apply(black_box(&circuit), black_box(&state)))
        });
    }
    group.finish();
}

fn bench_verify_ghz(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify_ghz");
    for n in [4, 8, 12] {
        let state = apply(&ghz_circuit(n), &State::zero_state(n).unwrap()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| verify(black_box(&state), "|GHZ⟩", n))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_h_all, bench_mixed, bench_verify_ghz);
criterion_main!(benches);
