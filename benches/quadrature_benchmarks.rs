//! Quadrature Benchmarks with 95% Confidence Intervals
//!
//! Throughput of uniform and importance sampling, and scaling of the
//! batch scheduler with worker count.
//!
//! Run with: cargo criterion

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mcquad::prelude::*;

/// Uniform sampling of the product integrand in increasing dimension.
fn bench_mcquad_dimension(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcquad_dimension");
    group.sample_size(50);
    group.confidence_level(0.95);

    let npoints = 20_000;
    group.throughput(Throughput::Elements(npoints as u64));

    for dim in [1, 2, 6, 12] {
        let domain = Domain::unit(dim).unwrap();
        let options = QuadOptions::builder().npoints(npoints).seed(42).build().unwrap();
        let integrand = ReferenceIntegrand::Product;

        group.bench_with_input(BenchmarkId::new("product", dim), &dim, |b, _| {
            b.iter(|| black_box(mcquad(|x| integrand.eval(x), &domain, &options).unwrap()));
        });
    }

    group.finish();
}

/// Work-stealing scaling with worker count.
fn bench_mcquad_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcquad_workers");
    group.sample_size(30);
    group.confidence_level(0.95);

    let npoints = 200_000;
    group.throughput(Throughput::Elements(npoints as u64));

    let domain = Domain::cube(6, -1.0, 1.0).unwrap();
    let integrand = ReferenceIntegrand::Gaussian { beta: 1.0 };

    for workers in [1, 2, 4, 8] {
        let options = QuadOptions::builder()
            .npoints(npoints)
            .seed(42)
            .workers(workers)
            .batch_size(5000)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::new("gaussian_6d", workers), &workers, |b, _| {
            b.iter(|| black_box(mcquad(|x| integrand.eval(x), &domain, &options).unwrap()));
        });
    }

    group.finish();
}

/// Importance sampling with exponential draws.
fn bench_mcimport(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcimport");
    group.sample_size(50);
    group.confidence_level(0.95);

    let reference = TruncatedExponential::default();

    for npoints in [2_000, 20_000, 200_000] {
        group.throughput(Throughput::Elements(npoints as u64));
        let options = QuadOptions::builder().npoints(npoints).seed(42).build().unwrap();
        let sampler = reference.sampler(6);

        group.bench_with_input(BenchmarkId::new("exp_6d", npoints), &npoints, |b, _| {
            b.iter(|| black_box(mcimport(|x| reference.eval(x), &sampler, &options).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mcquad_dimension,
    bench_mcquad_workers,
    bench_mcimport
);
criterion_main!(benches);
