//! Tests for bin construction and ranking on a best/rest split of auto93

use ezr::pipeline::discretize::{column_bins, default_small, merges};
use ezr::pipeline::{rank_bins, Classes, Col, Data, Settings};

#[path = "common/mod.rs"]
mod common;

/// Top and bottom four rows by distance to heaven
fn best_rest(data: &Data) -> Classes {
    let mut ranked = data.clone();
    ranked.order();
    let n = ranked.rows.len();
    let mut classes = Classes::new();
    classes.insert("best".to_string(), ranked.rows[..4].to_vec());
    classes.insert("rest".to_string(), ranked.rows[n - 4..].to_vec());
    classes
}

#[test]
fn test_numeric_bins_partition_the_line() {
    let data = common::auto93();
    let classes = best_rest(&data);
    let settings = Settings::default();

    for col in data.cols.x_cols().filter(|c| c.is_num()) {
        let bins = column_bins(col, &classes, None, &settings);
        assert!(!bins.is_empty());
        assert_eq!(bins[0].lo(), Some(f64::NEG_INFINITY), "{}", col.txt());
        assert_eq!(bins.last().unwrap().hi(), Some(f64::INFINITY), "{}", col.txt());
        for pair in bins.windows(2) {
            assert_eq!(pair[0].hi(), pair[1].lo(), "{} has a gap", col.txt());
            assert!(pair[0].lo() < pair[1].lo());
        }
        // every row of the full dataset lands in exactly one bin
        for row in &data.rows {
            let hits = bins.iter().filter(|b| b.selects(row)).count();
            assert_eq!(hits, 1, "{} = {}", col.txt(), row[col.at()]);
        }
    }
}

#[test]
fn test_bins_select_the_rows_they_counted() {
    let data = common::auto93();
    let classes = best_rest(&data);
    let settings = Settings::default();
    let col = &data.cols.all[0];

    for bin in column_bins(col, &classes, None, &settings) {
        let (yes, _) = bin.selects_rejects(&classes);
        for (klass, n) in &bin.ys {
            assert_eq!(yes.get(klass).map_or(0, |rows| rows.len()), *n, "{}", bin);
        }
    }
}

#[test]
fn test_converged_bins_do_not_merge_again() {
    let data = common::auto93();
    let classes = best_rest(&data);
    let settings = Settings {
        bins: 4,
        ..Default::default()
    };
    let small = default_small(&classes, &settings);
    for col in data.cols.x_cols() {
        let bins = column_bins(col, &classes, None, &settings);
        if let Col::Num(_) = col {
            let again = merges(bins.clone(), |a, b| a.merge(b, small));
            assert_eq!(again.len(), bins.len(), "{}", col.txt());
        }
    }
}

#[test]
fn test_ranked_bins() {
    let data = common::auto93();
    let classes = best_rest(&data);
    let ranked = rank_bins(&data, &classes, "best", "rest", &Settings::default()).unwrap();

    let top: Vec<String> = ranked.iter().take(3).map(|(_, b)| b.to_string()).collect();
    assert_eq!(top, vec!["Clndrs < 8", "Volume < 318", "Model >= 78"]);
    assert!(ranked.iter().take(3).all(|(s, _)| (*s - 1.0).abs() < 1e-9));

    let (score, bin) = &ranked[3];
    assert_eq!(bin.to_string(), "origin == 2");
    assert!((score - 0.5).abs() < 1e-9);
    assert!((ranked.last().unwrap().0 + 1.0).abs() < 1e-9);
}
