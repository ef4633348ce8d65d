use crate::common::configure_criterion;
use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use field_rail::scope;
use field_rail::ValidationScope;
use std::hint::black_box;

pub fn bench_scope_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope/lifecycle");

    group.bench_function("open_materialize_empty", |b| {
        b.iter(|| {
            let handle = scope::open();
            black_box(handle.materialize())
        })
    });

    group.bench_function("report_without_scope", |b| {
        b.iter(|| black_box(scope::report(black_box("email"), black_box("ignored"))))
    });

    group.bench_function("nested_scopes", |b| {
        b.iter(|| {
            let outer = ValidationScope::new();
            outer.in_scope(|| {
                scope::report("outer", "x");
                let inner = ValidationScope::new();
                inner.in_scope(|| scope::report("inner", "y"));
                black_box(inner.materialize())
            });
            black_box(outer.materialize())
        })
    });

    group.finish();
}

pub fn bench_report_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope/report_scaling");

    for count in [1usize, 10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let scope = ValidationScope::new();
                scope.in_scope(|| {
                    for i in 0..count {
                        // Few distinct fields, many messages per field.
                        scope::report(format!("field{}", i % 8), "invalid");
                    }
                });
                black_box(scope.materialize())
            })
        });
    }

    group.finish();
}

pub fn bench_property_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope/property");

    group.bench_function("with_property", |b| {
        b.iter(|| scope::with_property(black_box("billingEmail"), scope::current_property))
    });

    group.finish();
}

criterion_group! {
    name = scope_benches;
    config = configure_criterion();
    targets = bench_scope_lifecycle, bench_report_scaling, bench_property_context
}
