// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trimetric::geometry::Primitive;

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for n in [16usize, 64, 256] {
        let mesh = Primitive::grid(n, n, 1.0).to_mesh();
        group.bench_with_input(BenchmarkId::new("grid", 2 * n * n), &mesh, |b, mesh| {
            b.iter(|| black_box(mesh).aggregate_metrics().unwrap());
        });
    }

    let sphere = Primitive::sphere(10.0, 128).to_mesh();
    group.bench_function("sphere_128", |b| {
        b.iter(|| black_box(&sphere).legacy_metrics().unwrap());
    });

    group.finish();
}

fn bench_per_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("per_triangle");

    let mesh = Primitive::grid(128, 128, 0.5).to_mesh();
    group.bench_function("grid_128", |b| {
        b.iter(|| black_box(&mesh).per_triangle_metrics().unwrap());
    });

    group.finish();
}

fn bench_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("edges");

    for fn_ in [32u32, 128] {
        let mesh = Primitive::sphere(1.0, fn_).to_mesh();
        group.bench_with_input(BenchmarkId::new("sphere", fn_), &mesh, |b, mesh| {
            b.iter(|| black_box(mesh).relative_edge_lengths().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_per_triangle, bench_edges);
criterion_main!(benches);
