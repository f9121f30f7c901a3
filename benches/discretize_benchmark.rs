//! Benchmark bin construction and tree growth over best/rest splits
//!
//! Run with: cargo bench --bench discretize_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use ezr::pipeline::{rank_bins, tree, Classes, Data, Settings, Value};

/// Synthetic rows: `n_features` numeric inputs and two goals driven by the first two
fn generate_test_data(n_rows: usize, n_features: usize, seed: u64) -> Data {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut names: Vec<String> = (0..n_features).map(|i| format!("F{}", i)).collect();
    names.push("Cost-".to_string());
    names.push("Value+".to_string());

    let rows = (0..n_rows).map(|_| {
        let mut row: Vec<Value> = (0..n_features)
            .map(|_| Value::Num(rng.gen::<f64>() * 100.0))
            .collect();
        let a = row[0].as_num().unwrap_or(0.0);
        let b = row[1 % n_features].as_num().unwrap_or(0.0);
        row.push(Value::Num(a * a + rng.gen::<f64>() * 10.0));
        row.push(Value::Num(b - a / 2.0));
        row
    });
    Data::from_rows(names, rows).expect("Failed to build dataset")
}

fn best_rest(data: &Data) -> Classes {
    let mut ranked = data.clone();
    ranked.order();
    let n = (ranked.rows.len() as f64).sqrt() as usize;
    let total = ranked.rows.len();
    let mut classes = Classes::new();
    classes.insert("best".to_string(), ranked.rows[..n].to_vec());
    classes.insert("rest".to_string(), ranked.rows[total - n..].to_vec());
    classes
}

fn benchmark_rank_bins(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_bins");
    let settings = Settings::default();

    for (n_rows, n_features) in [(1_000, 5), (5_000, 10), (20_000, 20)] {
        let data = generate_test_data(n_rows, n_features, 42);
        let classes = best_rest(&data);
        group.throughput(Throughput::Elements(n_features as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", n_rows, n_features)),
            &(data, classes),
            |b, (data, classes)| {
                b.iter(|| {
                    rank_bins(
                        black_box(data),
                        black_box(classes),
                        "best",
                        "rest",
                        &settings,
                    )
                })
            },
        );
    }
    group.finish();
}

fn benchmark_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_grow");
    let settings = Settings::default();

    for n_rows in [1_000, 10_000] {
        let data = generate_test_data(n_rows, 8, 7);
        let classes = best_rest(&data);
        group.bench_with_input(
            BenchmarkId::from_parameter(n_rows),
            &(data, classes),
            |b, (data, classes)| {
                b.iter(|| tree::grow(black_box(data), black_box(classes), "best", "rest", &settings))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_rank_bins, benchmark_tree);
criterion_main!(benches);
