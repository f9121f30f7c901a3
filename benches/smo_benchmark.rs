//! Benchmark active learning, Naive Bayes, and repeated comparisons
//!
//! Run with: cargo bench --bench smo_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ezr::pipeline::{bayes, compare, smo, Data, Settings, Value};

/// An n x n grid with two conflicting goals
fn grid(n: usize) -> Data {
    Data::from_rows(
        vec![
            "Aa".to_string(),
            "Bb".to_string(),
            "Cost-".to_string(),
            "Gain+".to_string(),
        ],
        (0..n).flat_map(|a| {
            (0..n).map(move |b| {
                vec![
                    Value::Num(a as f64),
                    Value::Num(b as f64),
                    Value::Num((a * a + b) as f64),
                    Value::Num((a + b * b) as f64),
                ]
            })
        }),
    )
    .expect("Failed to build grid")
}

/// Symbolic rows with a noisy class
fn labeled(n_rows: usize) -> Data {
    let rows: Vec<Vec<String>> = (0..n_rows)
        .map(|i| {
            vec![
                format!("a{}", i % 5),
                format!("b{}", (i / 5) % 7),
                format!("k{}", (i % 5 + i % 3) % 4),
            ]
        })
        .collect();
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.iter().map(|s| s.as_str()).collect())
        .collect();
    Data::from_text(&["aa", "bb", "klass!"], &rows).expect("Failed to build dataset")
}

fn benchmark_smo(c: &mut Criterion) {
    let mut group = c.benchmark_group("smo");
    let settings = Settings::default();

    for n in [30, 70, 100] {
        let data = grid(n);
        group.bench_with_input(BenchmarkId::from_parameter(n * n), &data, |b, data| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(settings.seed);
                smo(black_box(data), &settings, &mut rng)
            })
        });
    }
    group.finish();
}

fn benchmark_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    group.sample_size(10);
    let settings = Settings::default();
    let data = grid(40);

    for repeats in [4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &repeats, |b, &repeats| {
            b.iter(|| compare(black_box(&data), &settings, repeats))
        });
    }
    group.finish();
}

fn benchmark_bayes(c: &mut Criterion) {
    let settings = Settings::default();
    let data = labeled(5_000);
    c.bench_function("bayes_5000", |b| {
        b.iter(|| bayes::evaluate(black_box(&data), &settings))
    });
}

criterion_group!(benches, benchmark_smo, benchmark_compare, benchmark_bayes);
criterion_main!(benches);
