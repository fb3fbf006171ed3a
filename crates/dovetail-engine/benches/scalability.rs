// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dovetail_engine::gale_shapley::GaleShapleySolver;
use dovetail_model::generate::{DEFAULT_SEED, InstanceGenerator};
use dovetail_verify::verifier::check_instance;
use std::hint::black_box;

const SIZES: [usize; 4] = [16, 64, 256, 512];

fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher");

    for n in SIZES {
        let instance = InstanceGenerator::new(DEFAULT_SEED).generate(n);
        let mut solver = GaleShapleySolver::preallocated(n);

        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::new("gale_shapley", n), &instance, |b, inst| {
            b.iter(|| {
                let outcome = solver.solve(black_box(inst));
                if !outcome.is_stable() {
                    panic!("Benchmark configuration error: matcher stopped early on n = {}.", n);
                }
                outcome
            })
        });
    }
    group.finish();
}

fn bench_verifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("verifier");

    for n in SIZES {
        let instance = InstanceGenerator::new(DEFAULT_SEED).generate(n);
        let matching = GaleShapleySolver::preallocated(n)
            .solve(&instance)
            .into_matching()
            .unwrap_or_else(|| panic!("matcher stopped early on n = {}", n));

        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::new("check_instance", n), &matching, |b, m| {
            b.iter(|| {
                let report = check_instance(black_box(&instance), black_box(m));
                if !report.is_empty() {
                    panic!("Benchmark configuration error: matcher output failed verification.");
                }
                report
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_matcher, bench_verifier);
criterion_main!(benches);
