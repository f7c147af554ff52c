//! Step Dispatch Benchmarks
//!
//! Measures the cost of driving generators through the step protocol.
//!
//! # Benchmark Categories
//!
//! 1. **Plain bodies**: counter and Fibonacci, one resume per value
//! 2. **Scripts**: op-table dispatch, inline vs spilled
//! 3. **Delegation**: per-value forwarding through nested links

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ember_vm::generators::{for_each, instantiate, GeneratorObject, Script, ScriptBuilder};
use ember_vm::stdlib::itertools::{Counter, Fibonacci};

// =============================================================================
// Helpers
// =============================================================================

/// Builds a chain of `depth` nested delegations around a counter of `n`.
fn nested(depth: u32, n: u64) -> GeneratorObject<Script<u64>> {
    if depth == 0 {
        return ScriptBuilder::new()
            .delegate(move || instantiate::<Counter>(n))
            .instantiate();
    }
    ScriptBuilder::new()
        .delegate(move || nested(depth - 1, n))
        .instantiate()
}

// =============================================================================
// Plain Bodies
// =============================================================================

fn bench_plain(c: &mut Criterion) {
    let mut group = c.benchmark_group("plain");

    for n in [16u64, 1024] {
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::new("counter", n), &n, |b, &n| {
            b.iter(|| {
                let mut sum = 0u64;
                let mut counter = instantiate::<Counter>(n);
                for_each(&mut counter, |v| sum += v).unwrap();
                black_box(sum)
            })
        });
    }

    group.throughput(Throughput::Elements(90));
    group.bench_function("fibonacci_90", |b| {
        b.iter(|| {
            let mut last = 0u64;
            let mut fib = instantiate::<Fibonacci>(90);
            for_each(&mut fib, |v| last = v).unwrap();
            black_box(last)
        })
    });

    group.finish();
}

// =============================================================================
// Scripts
// =============================================================================

fn bench_script(c: &mut Criterion) {
    let mut group = c.benchmark_group("script");

    for ops in [8u64, 64] {
        group.throughput(Throughput::Elements(ops));
        group.bench_with_input(BenchmarkId::new("emit", ops), &ops, |b, &ops| {
            b.iter(|| {
                let mut script = ScriptBuilder::<u64>::new().emit_all(0..ops).instantiate();
                let mut count = 0u64;
                for_each(&mut script, |_| count += 1).unwrap();
                black_box(count)
            })
        });
    }

    group.finish();
}

// =============================================================================
// Delegation
// =============================================================================

fn bench_delegation(c: &mut Criterion) {
    let mut group = c.benchmark_group("delegation");
    group.throughput(Throughput::Elements(256));

    for depth in [0u32, 4, 16] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut chain = nested(depth, 256);
                let mut sum = 0u64;
                for_each(&mut chain, |v| sum += v).unwrap();
                black_box(sum)
            })
        });
    }

    group.finish();
}

criterion_group!(step_benches, bench_plain, bench_script, bench_delegation);
criterion_main!(step_benches);
