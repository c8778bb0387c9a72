//! Scanning throughput for the token-level scanner.
//!
//! Run with: `cargo bench --package valx-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use valx_lex::{DefaultScanner, Scanner, Token};

fn scan_all(source: &str) {
    let mut scanner = DefaultScanner::new(source);
    loop {
        match scanner.scan().unwrap() {
            Token::Eof => break,
            _ => continue,
        }
    }
}

fn bench_identifiers_and_numbers(c: &mut Criterion) {
    let source = "foo.bar_baz[12] + 3.14159 * quux_1 - \"a literal string\" ".repeat(20);
    let mut group = c.benchmark_group("valx_lex_scan");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("identifiers_and_numbers", |b| {
        b.iter(|| scan_all(black_box(&source)))
    });
    group.finish();
}

fn bench_symbol_runs(c: &mut Criterion) {
    let source = "a<=b&&c!=d||e>=f==g ".repeat(30);
    let mut group = c.benchmark_group("valx_lex_scan");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("symbol_runs", |b| b.iter(|| scan_all(black_box(&source))));
    group.finish();
}

criterion_group!(benches, bench_identifiers_and_numbers, bench_symbol_runs);
criterion_main!(benches);
