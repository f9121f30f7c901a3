//! Discretization: entropy-merged bins per column
//!
//! Every non-missing value is dropped into an initial bin (equal-width for
//! numbers, one per symbol). Numeric neighbors are then merged until no pair
//! wants to merge, and the survivors are stretched to cover the whole number
//! line.

use std::collections::HashMap;

use super::bin::{class_size, Bin, Classes};
use super::column::{BinKey, Col};
use super::data::Data;
use super::error::{EzError, Result};
use super::settings::Settings;

/// Repeatedly merge adjacent bins until a full pass merges nothing.
///
/// Within one pass a merged bin is emitted as-is and the scan continues after
/// the pair it absorbed; the next pass reconsiders it.
pub fn merges<F>(mut bins: Vec<Bin>, merge: F) -> Vec<Bin>
where
    F: Fn(&Bin, &Bin) -> Option<Bin>,
{
    loop {
        let before = bins.len();
        let mut now = Vec::with_capacity(before);
        let mut j = 0;
        while j < bins.len() {
            let mut a = bins[j].clone();
            if j + 1 < bins.len() {
                if let Some(merged) = merge(&a, &bins[j + 1]) {
                    a = merged;
                    j += 1;
                }
            }
            now.push(a);
            j += 1;
        }
        if now.len() == before {
            return bins;
        }
        bins = now;
    }
}

/// Default minimum bin size: total rows over the maximum bin count
pub fn default_small(classes: &Classes, settings: &Settings) -> f64 {
    class_size(classes) as f64 / settings.bins as f64
}

/// Bins for one column, built from every class's rows.
///
/// Missing values are skipped. `small` defaults to [`default_small`].
pub fn column_bins(
    col: &Col,
    classes: &Classes,
    small: Option<f64>,
    settings: &Settings,
) -> Vec<Bin> {
    let at = col.at();
    let mut index: HashMap<BinKey, usize> = HashMap::new();
    let mut out: Vec<Bin> = Vec::new();

    for (klass, rows) in classes {
        for row in rows {
            let x = &row[at];
            let Some(key) = col.bin_key(x, settings.bins) else {
                continue;
            };
            let i = *index.entry(key).or_insert_with(|| {
                out.push(Bin::new(at, col.txt(), x));
                out.len() - 1
            });
            out[i].add(x, klass);
        }
    }

    out.sort_by(|a, b| compare_spans(a, b));
    let small = small.unwrap_or_else(|| default_small(classes, settings));
    col.complete_bins(out, small)
}

fn compare_spans(a: &Bin, b: &Bin) -> std::cmp::Ordering {
    use super::bin::Span;
    match (&a.span, &b.span) {
        (Span::Range { lo: x, .. }, Span::Range { lo: y, .. }) => {
            x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal)
        }
        (Span::Symbol(x), Span::Symbol(y)) => x.cmp(y),
        (Span::Range { .. }, Span::Symbol(_)) => std::cmp::Ordering::Less,
        (Span::Symbol(_), Span::Range { .. }) => std::cmp::Ordering::Greater,
    }
}

/// Bins for every independent column of `data`, in column order
pub fn all_bins(data: &Data, classes: &Classes, settings: &Settings) -> Vec<Bin> {
    data.cols
        .x_cols()
        .flat_map(|col| column_bins(col, classes, None, settings))
        .collect()
}

/// Score every independent-column bin by how much more often it holds `best`
/// rows than `rest` rows. Highest score first.
pub fn rank_bins(
    data: &Data,
    classes: &Classes,
    best: &str,
    rest: &str,
    settings: &Settings,
) -> Result<Vec<(f64, Bin)>> {
    let n_best = classes
        .get(best)
        .ok_or_else(|| EzError::MissingClass(best.to_string()))?
        .len();
    let n_rest = classes
        .get(rest)
        .ok_or_else(|| EzError::MissingClass(rest.to_string()))?
        .len();

    let mut scored: Vec<(f64, Bin)> = all_bins(data, classes, settings)
        .into_iter()
        .map(|bin| (bin.score(best, rest, n_best, n_rest), bin))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    Ok(scored)
}
