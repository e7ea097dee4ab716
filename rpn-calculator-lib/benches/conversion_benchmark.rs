use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rpn_calculator::interpreter::{evaluate_rpn, infix_to_rpn};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_and_evaluate");
    let expressions = [
        "(1 + 2) * (3 + 4)".to_string(),
        "2 ^ 3 ^ 2".to_string(),
        "pow(sqrt(16), 3) + max(3, 7) * min(10, 5)".to_string(),
        "sqrt(abs(-9)) * cos(0) + log(exp(1))".to_string(),
        "{ 3, 1, 4, 1, 5, 9, 2, 6 } median".to_string(),
    ];
    for expression in expressions {
        group.throughput(Throughput::Elements(expression.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(&expression),
            &expression,
            |bencher, expression| {
                bencher.iter(|| evaluate_rpn(infix_to_rpn(expression.to_string()).unwrap()));
            },
        );
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
