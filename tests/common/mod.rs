//! Shared test utilities and fixture generators

#![allow(dead_code)]

use ezr::pipeline::{Data, Value};
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// A slice of the auto93 car dataset: 3 x columns, an ignored column,
/// a symbolic column, and three goals
pub const AUTO93_CSV: &str = "\
Clndrs,Volume,HpX,Model,origin,Lbs-,Acc+,Mpg+
8,304,193,70,1,4732,18.5,10
8,360,215,70,1,4615,14,10
8,307,200,70,1,4376,15,10
8,318,210,70,1,4382,13.5,10
8,429,208,72,1,4633,11,10
8,400,150,73,1,4997,14,10
6,250,100,71,1,3282,15,20
6,232,90,78,1,3210,17.2,20
6,225,100,76,1,3233,15.4,20
6,199,90,70,1,2648,15,20
4,97,88,70,3,2130,14.5,30
4,90,48,78,2,1985,21.5,40
4,85,65,79,3,2020,19.2,30
4,91,67,80,3,1965,15.7,30
4,97,?,80,2,2130,24.6,40
4,86,65,80,3,2110,17.9,50
4,98,65,81,1,2380,20.7,30
4,105,74,82,2,1980,15.3,40
4,112,88,82,1,2395,18,30
4,120,88,82,3,2160,14.5,40
";

/// Header of [`AUTO93_CSV`]
pub fn auto93_names() -> Vec<String> {
    AUTO93_CSV
        .lines()
        .next()
        .unwrap()
        .split(',')
        .map(|s| s.to_string())
        .collect()
}

/// Parse [`AUTO93_CSV`] without touching the filesystem
pub fn auto93() -> Data {
    let mut lines = AUTO93_CSV.lines();
    let names: Vec<&str> = lines.next().unwrap().split(',').collect();
    let rows: Vec<Vec<&str>> = lines.map(|line| line.split(',').collect()).collect();
    Data::from_text(&names, &rows).unwrap()
}

/// Two inputs on an n x n grid with two goals that both prefer small `Aa`
pub fn grid(n: usize) -> Data {
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
                    Value::Num((2 * n - a + b % 3) as f64),
                ]
            })
        }),
    )
    .unwrap()
}

/// Sixty rows of three symbolic attributes and a three-way class that mostly
/// follows the first attribute
pub fn categorical() -> Data {
    let rows: Vec<Vec<String>> = (0..60usize)
        .map(|i| {
            let klass = ["x", "y", "z"][(i % 3 + usize::from(i % 7 == 0)) % 3];
            vec![
                format!("a{}", i % 3),
                format!("b{}", (i / 3) % 4),
                format!("c{}", (i * 7) % 5),
                klass.to_string(),
            ]
        })
        .collect();
    Data::from_text(&["aa", "bb", "cc", "klass!"], &rows_as_str(&rows)).unwrap()
}

fn rows_as_str(rows: &[Vec<String>]) -> Vec<Vec<&str>> {
    rows.iter()
        .map(|r| r.iter().map(|s| s.as_str()).collect())
        .collect()
}

/// Create a temporary directory with a CSV file holding `text`
pub fn create_temp_csv(text: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");
    std::fs::write(&csv_path, text).unwrap();
    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}
