//! Benchmarks for Sturm sequence construction, isolation and refinement.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sturm_poly::Polynomial;
use sturm_rings::rationals::Q;
use sturm_roots::{IsolationConfig, Solver, SturmSequence};

/// Polynomial with `n` roots spread over (-n, n), none at a dyadic point.
fn spread_roots_f64(n: usize) -> Polynomial<f64> {
    #[allow(clippy::cast_precision_loss)]
    let roots: Vec<f64> = (0..n).map(|i| 2.0 * i as f64 - n as f64 + 1.0 / 3.0).collect();
    Polynomial::from_roots(&roots)
}

fn spread_roots_q(n: usize) -> Polynomial<Q> {
    let n = i64::try_from(n).unwrap_or(i64::MAX);
    let roots: Vec<Q> = (0..n).map(|i| Q::new(6 * i - 3 * n + 1, 3)).collect();
    Polynomial::from_roots(&roots)
}

fn bench_sequence_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("sturm_sequence");

    for degree in [4, 8, 16] {
        let pf = spread_roots_f64(degree);
        let pq = spread_roots_q(degree);

        group.bench_with_input(BenchmarkId::new("f64", degree), &degree, |b, _| {
            b.iter(|| black_box(SturmSequence::new(&pf)))
        });
        group.bench_with_input(BenchmarkId::new("Q", degree), &degree, |b, _| {
            b.iter(|| black_box(SturmSequence::new(&pq)))
        });
    }

    group.finish();
}

fn bench_isolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("separate_roots");
    let config = IsolationConfig::default();

    for degree in [4, 8, 16] {
        let Ok(seq) = SturmSequence::new(&spread_roots_q(degree)) else {
            continue;
        };
        let bound = seq.root_bound();
        let lower = -bound.clone();

        group.bench_with_input(BenchmarkId::new("sequential", degree), &degree, |b, _| {
            b.iter(|| black_box(seq.separate_roots_with(&lower, &bound, &config)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", degree), &degree, |b, _| {
            b.iter(|| black_box(seq.separate_roots_parallel(&lower, &bound, &config)))
        });
    }

    group.finish();
}

fn bench_refinement(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_all");
    group.sample_size(50);

    let Ok(seq) = SturmSequence::new(&spread_roots_f64(12)) else {
        return;
    };
    let Ok(isolation) = seq.separate_roots_auto() else {
        return;
    };
    let solver = Solver::default();

    group.bench_function("degree_12_f64", |b| {
        b.iter(|| black_box(solver.refine_all(seq.squarefree(), &isolation.roots)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sequence_construction,
    bench_isolation,
    bench_refinement
);

criterion_main!(benches);
