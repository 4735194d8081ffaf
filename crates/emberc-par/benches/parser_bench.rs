//! Parser benchmarks.
//!
//! Run with: `cargo bench --package emberc-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use emberc_par::ast::Module;
use emberc_par::Parser;
use emberc_util::Handler;

fn parse_source(source: &str) -> Module {
    let handler = Handler::new();
    let mut parser = Parser::new(source, &handler);
    parser.parse_module()
}

fn bench_parser_declaration(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_declaration");

    let source = "var x = 42";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("var_decl", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_arithmetic");

    let source = "1 + 2 * 3 - 4 / 5 % 6 + (7 - 8) * 9";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("precedence_chain", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
        var n = 10
        var sum = 0
        var i = 0
        while i < n {
            if i % 2 == 0 {
                sum += i
            } elif i % 3 == 0 {
                sum -= i
            } else {
                sum = sum
            }
            i += 1
        }
        sum
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("while_with_if_elif_else", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_logical_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_logical");

    let source = "true and false or not true and (1 < 2) or (3 >= 4)";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("and_or_not_chain", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_complex");

    let source = r#"
        var total = 0
        var count = 0
        var limit = 100
        while count < limit {
            var term = count * count + 1
            if term % 2 == 0 and term > 10 {
                total += term
            } elif term % 3 == 0 {
                total -= term
            }
            count += 1
        }
        var average = if count > 0 { total / count } else { 0 }
        average
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("mixed_program", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_declaration,
    bench_parser_arithmetic,
    bench_parser_control_flow,
    bench_parser_logical_expressions,
    bench_parser_complex
);
criterion_main!(benches);
