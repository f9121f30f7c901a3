//! Sequential model optimization (active learning)
//!
//! Only a handful of rows are ever "labeled" (scored by `d2h`). The labeled
//! rows are split into best and rest, a Naive Bayes model of each is built,
//! and the unlabeled row that looks most like best and least like rest is
//! labeled next.

use rand::seq::SliceRandom;
use rand::Rng;

use super::data::Data;
use super::error::{EzError, Result};
use super::settings::Settings;
use super::value::Row;

/// Outcome of one active learning run
#[derive(Debug, Clone)]
pub struct SmoResult {
    /// Best labeled row
    pub best: Row,
    /// Every labeled row, best first by `d2h` normalized over the labeled
    /// rows alone
    pub done: Vec<Row>,
}

impl SmoResult {
    /// Number of rows that were labeled
    pub fn evaluations(&self) -> usize {
        self.done.len()
    }
}

/// Default acquisition: log likelihood under best minus under rest
pub fn best_minus_rest(b: f64, r: f64) -> f64 {
    b - r
}

/// Run active learning with the default acquisition function
pub fn smo<R: Rng + ?Sized>(data: &Data, settings: &Settings, rng: &mut R) -> Result<SmoResult> {
    smo_with(data, settings, rng, best_minus_rest)
}

/// Run active learning, ranking candidates with `score(like_best, like_rest)`
pub fn smo_with<R, F>(data: &Data, settings: &Settings, rng: &mut R, score: F) -> Result<SmoResult>
where
    R: Rng + ?Sized,
    F: Fn(f64, f64) -> f64,
{
    if data.rows.is_empty() {
        return Err(EzError::EmptyDataset);
    }

    let mut rows = data.rows.clone();
    rows.shuffle(rng);
    let cut = settings.budget0.min(rows.len());
    let mut todo = rows.split_off(cut);
    let mut done = rows;

    let mut ranked = data.clone_with(&done)?;
    ranked.order();

    for round in 0..settings.budget {
        if todo.len() < 3 {
            log::debug!("smo: pool exhausted after {} rounds", round);
            break;
        }
        let n = (done.len() as f64).powf(settings.best).round() as usize;
        let n = n.min(ranked.rows.len());
        let best = data.clone_with(&ranked.rows[..n])?;
        let rest = data.clone_with(&ranked.rows[n..])?;

        todo = acquire(&best, &rest, todo, settings, &score);
        let top = todo.remove(0);
        done.push(top);

        ranked = data.clone_with(&done)?;
        ranked.order();
        log::debug!(
            "smo: round {} labeled {} rows, {} candidates left",
            round + 1,
            done.len(),
            todo.len()
        );
    }

    let best = ranked.rows.first().cloned().ok_or(EzError::EmptyDataset)?;
    Ok(SmoResult {
        best,
        done: ranked.rows,
    })
}

/// Sort candidates by acquisition score (highest first) and keep the top fraction.
///
/// Both sub-models share the labeled row count as `nall`.
fn acquire<F>(best: &Data, rest: &Data, todo: Vec<Row>, settings: &Settings, score: &F) -> Vec<Row>
where
    F: Fn(f64, f64) -> f64,
{
    let nall = best.rows.len() + rest.rows.len();
    let mut keyed: Vec<(f64, Row)> = todo
        .into_iter()
        .map(|r| {
            let b = best.loglike(&r, nall, 2, settings);
            let s = rest.loglike(&r, nall, 2, settings);
            (score(b, s), r)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let chop = ((keyed.len() as f64 * settings.top) as usize).max(1);
    keyed.truncate(chop);
    keyed.into_iter().map(|(_, r)| r).collect()
}
