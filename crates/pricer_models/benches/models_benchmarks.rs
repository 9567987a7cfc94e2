//! Criterion benchmarks for pricer_models.
//!
//! Benchmarks cover:
//! - Black-Scholes price and full Greeks bundle
//! - CRR pricing with two-buffer induction against full tree construction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::{MarketParams, OptionType};
use pricer_models::analytical::price_black_scholes;
use pricer_models::lattice::price_crr;

fn atm_call() -> MarketParams {
    MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
}

/// Benchmark closed-form price and Greeks.
fn bench_black_scholes(c: &mut Criterion) {
    let params = atm_call();
    c.bench_function("black_scholes_price_and_greeks", |b| {
        b.iter(|| price_black_scholes(black_box(&params)));
    });
}

/// Benchmark CRR pricing across step counts.
fn bench_crr(c: &mut Criterion) {
    let mut group = c.benchmark_group("crr");
    let params = atm_call();

    for steps in [50, 200, 1000] {
        group.bench_with_input(BenchmarkId::new("price_only", steps), &steps, |b, &n| {
            b.iter(|| price_crr(black_box(&params), n, false));
        });
        group.bench_with_input(BenchmarkId::new("full_tree", steps), &steps, |b, &n| {
            b.iter(|| price_crr(black_box(&params), n, true));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_black_scholes, bench_crr);
criterion_main!(benches);
