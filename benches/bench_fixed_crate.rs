use std::hint::black_box;
use std::str::FromStr;

use criterion::{Criterion, criterion_group, criterion_main};
use fixed::types::I16F16;

fn bench_addition(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_addition", |b| {
        let x = I16F16::from_str("123.456789").unwrap();
        let y = I16F16::from_str("987.654321").unwrap();
        b.iter(|| black_box(black_box(x) + black_box(y)));
    });
}

fn bench_subtraction(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_subtraction", |b| {
        let x = I16F16::from_str("987.654321").unwrap();
        let y = I16F16::from_str("123.456789").unwrap();
        b.iter(|| black_box(black_box(x) - black_box(y)));
    });
}

fn bench_multiplication(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_multiplication", |b| {
        let x = I16F16::from_str("123.456789").unwrap();
        let y = I16F16::from_str("9.876543").unwrap();
        b.iter(|| black_box(black_box(x) * black_box(y)));
    });
}

fn bench_division(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_division", |b| {
        let x = I16F16::from_str("123.456789").unwrap();
        let y = I16F16::from_str("9.876543").unwrap();
        b.iter(|| black_box(black_box(x) / black_box(y)));
    });
}

fn bench_parsing(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_parsing", |b| {
        b.iter(|| black_box(I16F16::from_str("123.456789").unwrap()));
    });
}

fn bench_formatting(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_formatting", |b| {
        let d = I16F16::from_str("123.456789").unwrap();
        b.iter(|| black_box(format!("{}", d)));
    });
}

fn bench_from_f64(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_from_f64", |b| {
        b.iter(|| black_box(I16F16::from_num(black_box(123.456789_f64))));
    });
}

fn bench_to_f64(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_to_f64", |b| {
        let d = I16F16::from_num(123.456789_f64);
        b.iter(|| black_box(black_box(d).to_num::<f64>()));
    });
}

fn bench_sum(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_sum_1000_values", |b| {
        let values: Vec<I16F16> = (0..1000)
            .map(|i| I16F16::from_num((i % 100) as f64 * 0.25))
            .collect();
        b.iter(|| black_box(values.iter().copied().sum::<I16F16>()));
    });
}

fn bench_comparison(c: &mut Criterion) {
    c.bench_function("fixed_i16f16_comparison", |b| {
        let x = I16F16::from_str("123.456789").unwrap();
        let y = I16F16::from_str("123.456790").unwrap();
        b.iter(|| black_box(black_box(x) < black_box(y)));
    });
}

criterion_group!(
    benches,
    bench_addition,
    bench_subtraction,
    bench_multiplication,
    bench_division,
    bench_parsing,
    bench_formatting,
    bench_from_f64,
    bench_to_f64,
    bench_sum,
    bench_comparison,
);

criterion_main!(benches);
