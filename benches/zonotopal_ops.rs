//! Benchmark: building the four spaces of each variant
//!
//! Every iteration constructs a fresh algebra so the memo tables are empty.
//!
//! Inputs:
//! - the four lines (1,0), (0,1), (1,1), (1,-1) in the plane
//! - six vectors in Q^3: the unit vectors, (1,1,0), (0,1,1) and (1,1,1)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use zonotopal_algebra::*;

fn inputs() -> Vec<(&'static str, Vec<Vec<i64>>)> {
    vec![
        ("four_lines", vec![vec![1, 0, 1, 1], vec![0, 1, 1, -1]]),
        (
            "six_vectors",
            vec![vec![1, 0, 0, 1, 0, 1], vec![0, 1, 0, 1, 1, 1], vec![0, 0, 1, 0, 1, 1]],
        ),
    ]
}

/// Full I/J/P/D computation over Q
fn bench_rational(c: &mut Criterion) {
    let mut group = c.benchmark_group("zon_spaces_q");
    group.measurement_time(Duration::from_secs(10));
    let q = rational_field();

    for (name, rows) in inputs() {
        let x = Matrix::from_i64_rows(&q, &rows).unwrap();
        for variant in [Variant::Central, Variant::Internal, Variant::External] {
            group.bench_with_input(BenchmarkId::new(variant.to_string(), name), &x, |bench, x| {
                bench.iter(|| {
                    let algebra = zonotopal_algebra(black_box(x), variant, &ZonotopalConfig::new()).unwrap();
                    black_box(algebra.zon_spaces().unwrap().dimension())
                });
            });
        }
    }
    group.finish();
}

/// The two D-space strategies on the same input
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("d_strategy");
    let q = rational_field();
    let x = Matrix::from_i64_rows(&q, &inputs()[1].1).unwrap();

    for strategy in [DStrategy::GlobalDual, DStrategy::LatticeExtension] {
        let config = ZonotopalConfig::new().with_d_strategy(strategy);
        group.bench_function(format!("{:?}", strategy), |bench| {
            bench.iter(|| {
                let algebra = zonotopal_algebra(black_box(&x), Variant::Central, &config).unwrap();
                black_box(algebra.d_space_basis().unwrap().len())
            });
        });
    }
    group.finish();
}

/// Central algebra over the BN254 scalar field
fn bench_bn254(c: &mut Criterion) {
    let field = BN254_FR.clone();
    let x = Matrix::from_i64_rows(&field, &inputs()[1].1).unwrap();
    c.bench_function("central_bn254_six_vectors", |bench| {
        bench.iter(|| {
            let algebra = zonotopal_algebra(black_box(&x), Variant::Central, &ZonotopalConfig::new()).unwrap();
            black_box(algebra.d_space_basis().unwrap().len())
        });
    });
}

criterion_group!(benches, bench_rational, bench_strategies, bench_bn254);
criterion_main!(benches);
