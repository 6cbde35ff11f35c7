//! Benchmarks for the IRR solver and the formula groups around it.
//!
//! Run with: cargo bench -p fincalc-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use fincalc_analytics::prelude::*;
use fincalc_math::solvers::{BracketMethod, SolverConfig};

// =============================================================================
// TEST DATA
// =============================================================================

/// Series whose IRR Newton reaches directly.
fn conventional_series() -> CashFlowSeries {
    CashFlowSeries::new([-1000.0, 200.0, 200.0, 200.0, 200.0, 200.0])
}

/// Series whose IRR lies far from the seed.
fn distant_root_series() -> CashFlowSeries {
    CashFlowSeries::new([-100.0, 0.0, 0.0, 0.0, 0.0, 5000.0])
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_irr(c: &mut Criterion) {
    let mut group = c.benchmark_group("irr");

    let cases = [
        ("conventional", conventional_series(), 2550.0),
        ("no_perpetuity", conventional_series(), 0.0),
        ("distant_root", distant_root_series(), 0.0),
    ];

    for (name, series, perpetuity) in &cases {
        group.bench_with_input(BenchmarkId::new("brent", name), series, |b, series| {
            b.iter(|| irr(black_box(series), black_box(*perpetuity)))
        });

        let bisection =
            IrrConfig::default().with_solver(SolverConfig::default().with_fallback(BracketMethod::Bisection));
        group.bench_with_input(BenchmarkId::new("bisection", name), series, |b, series| {
            b.iter(|| solve_irr(black_box(series), black_box(*perpetuity), &bisection))
        });
    }

    group.finish();
}

fn bench_value_firm(c: &mut Criterion) {
    let series = conventional_series();
    let inputs = ValuationInputs::new(0.02, 0.10, 100.0).with_balance_sheet(50.0, 10.0, 20.0);

    c.bench_function("value_firm", |b| {
        b.iter(|| value_firm(black_box(&series), black_box(&inputs), PerpetuityPolicy::Undefined))
    });
}

fn bench_bond(c: &mut Criterion) {
    let mut group = c.benchmark_group("bond_value");

    for years in [5u32, 30, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, &years| {
            b.iter(|| bond_value(1000.0, 0.05, black_box(0.04), years, Frequency::Quarterly))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_irr, bench_value_firm, bench_bond);
criterion_main!(benches);
