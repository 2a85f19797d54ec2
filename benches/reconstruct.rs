// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reconstruction benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::f64::consts::PI;
use wirecode::{CurveEdge, Point, WireReconstructor};

/// Zig-zag of lines with a quarter arc every tenth edge, shuffled
fn shuffled_wire(n: usize) -> Vec<CurveEdge> {
    let mut edges = Vec::with_capacity(n);
    let mut cursor = Point::origin();
    for i in 0..n {
        if i % 10 == 9 {
            let center = cursor + nalgebra::Vector3::new(0.0, 1.0, 0.0);
            let arc = CurveEdge::arc_xy(center, 1.0, -PI / 2.0, 0.0);
            cursor = center + nalgebra::Vector3::new(1.0, 0.0, 0.0);
            edges.push(arc);
        } else {
            let next = cursor + nalgebra::Vector3::new(1.0, if i % 2 == 0 { 0.5 } else { -0.5 }, 0.0);
            edges.push(CurveEdge::line(cursor, next));
            cursor = next;
        }
    }
    edges.shuffle(&mut StdRng::seed_from_u64(42));
    edges
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");
    let reconstructor = WireReconstructor::default();

    for n in [100usize, 1_000, 10_000] {
        let edges = shuffled_wire(n);
        group.bench_with_input(BenchmarkId::new("shuffled_wire", n), &edges, |b, edges| {
            b.iter(|| reconstructor.reconstruct(black_box(edges)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconstruct);
criterion_main!(benches);
