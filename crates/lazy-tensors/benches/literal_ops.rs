// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for literal construction and structural hashing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use host_memory::{HostMemoryPool, MemoryBudget};
use lazy_tensors::{shape_util, Literal, ScalarType, Shape};

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal_new");
    for side in [8i64, 64, 256] {
        let shape = Shape::matrix(ScalarType::F32, side, side);
        group.bench_with_input(BenchmarkId::new("heap", side), &shape, |b, shape| {
            b.iter(|| Literal::new(black_box(shape)))
        });

        let pool = HostMemoryPool::new(MemoryBudget::from_mb(64));
        group.bench_with_input(BenchmarkId::new("pooled", side), &shape, |b, shape| {
            b.iter(|| Literal::new_in(black_box(shape), &pool))
        });
    }
    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let leaf = Shape::new(ScalarType::BF16, [4, 128, 64, 64]);
    let literal = Literal::new(&Shape::new(ScalarType::BF16, [4, 1, 1, 1]));
    let nested: Shape = "((f32[128,768], f32[768]), (f32[768,3072], f32[3072]), s64[])"
        .parse()
        .expect("valid shape");

    c.bench_function("shape_hash_leaf", |b| b.iter(|| shape_util::hash(black_box(&leaf))));
    c.bench_function("shape_hash_nested", |b| {
        b.iter(|| shape_util::hash(black_box(&nested)))
    });
    c.bench_function("literal_hash", |b| b.iter(|| black_box(&literal).hash()));
}

criterion_group!(benches, bench_construct, bench_hash);
criterion_main!(benches);
