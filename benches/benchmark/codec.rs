use crate::common::{configure_criterion, Age, Email};
use criterion::{criterion_group, Criterion};
use field_rail::{MessageConfig, OptionalCodec, Scalar, ValidatingCodec, ValidationScope};
use std::hint::black_box;

pub fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/evaluate");
    let config = MessageConfig::default();
    let codec = ValidatingCodec::<Email>::new();

    group.bench_function("valid", |b| {
        b.iter(|| {
            let outcome =
                codec.evaluate(black_box(Some("kim@example.com".to_string())), Some("email"), &config);
            black_box(outcome)
        })
    });

    group.bench_function("domain_failure", |b| {
        b.iter(|| {
            let outcome = codec.evaluate(black_box(Some("kim".to_string())), Some("email"), &config);
            black_box(outcome)
        })
    });

    group.bench_function("missing_required", |b| {
        b.iter(|| black_box(codec.evaluate(black_box(None), None, &config)))
    });

    group.bench_function("format_failure", |b| {
        let age = ValidatingCodec::<Age>::new();
        b.iter(|| {
            let outcome =
                age.evaluate_scalar(black_box(Some(Scalar::Str("old".to_string()))), Some("age"), &config);
            black_box(outcome)
        })
    });

    group.finish();
}

pub fn bench_read_in_scope(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/read");

    group.bench_function("required_valid", |b| {
        let codec = ValidatingCodec::<Age>::new();
        b.iter(|| {
            let scope = ValidationScope::new();
            let value = scope.in_scope(|| codec.read(black_box(Some(34))));
            black_box((value, scope.materialize()))
        })
    });

    group.bench_function("required_invalid", |b| {
        let codec = ValidatingCodec::<Age>::new();
        b.iter(|| {
            let scope = ValidationScope::new();
            let value = scope.in_scope(|| codec.read(black_box(Some(-1))));
            black_box((value, scope.materialize()))
        })
    });

    group.bench_function("optional_absent", |b| {
        let codec = OptionalCodec::<Email>::new();
        b.iter(|| {
            let scope = ValidationScope::new();
            let value = scope.in_scope(|| codec.read(black_box(None)));
            black_box((value, scope.materialize()))
        })
    });

    group.finish();
}

criterion_group! {
    name = codec_benches;
    config = configure_criterion();
    targets = bench_evaluate, bench_read_in_scope
}
