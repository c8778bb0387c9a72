//! Parser benchmarks.
//!
//! Run with: `cargo bench --package valx-par`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use valx_eval::Value;
use valx_par::{Language, OperatorEntry, Parser};

fn arithmetic() -> Language {
    Language::new()
        .with_operator(
            "+",
            OperatorEntry {
                precedence: Some(5),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a + b)))),
                ..Default::default()
            },
        )
        .with_operator(
            "*",
            OperatorEntry {
                precedence: Some(6),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a * b)))),
                ..Default::default()
            },
        )
}

fn bench_flat_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_flat");
    let source = "1 + 2 * 3 + 4 * 5 + 6 * 7 + 8 * 9 + 10 * 11 + 12 * 13 + 14";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("flat_arithmetic", |b| {
        b.iter(|| Parser::compile(black_box(source), arithmetic()).unwrap())
    });
    group.finish();
}

fn bench_nested_parens(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_nested");
    let source = "((((1 + 2) * 3) + 4) * 5)";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("nested_parens", |b| {
        b.iter(|| Parser::compile(black_box(source), arithmetic()).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_flat_expression, bench_nested_parens);
criterion_main!(benches);
