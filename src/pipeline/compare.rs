//! Baselines for judging active learning
//!
//! A run of [`smo`] is only interesting next to what the same number of
//! labels would have bought by picking rows at random, and next to the
//! dataset as it stands.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::column::Num;
use super::data::Data;
use super::error::{EzError, Result};
use super::settings::Settings;
use super::smo::smo;
use super::value::Row;

/// Label `budget` rows drawn at random (with replacement) and keep the best
pub fn random_guess<R: Rng + ?Sized>(data: &Data, budget: usize, rng: &mut R) -> Result<Row> {
    let mut best: Option<(f64, &Row)> = None;
    for _ in 0..budget.max(1) {
        let r = data.rows.choose(rng).ok_or(EzError::EmptyDataset)?;
        let d = data.d2h(r);
        if best.map_or(true, |(b, _)| d < b) {
            best = Some((d, r));
        }
    }
    best.map(|(_, r)| r.clone()).ok_or(EzError::EmptyDataset)
}

/// Distance-to-heaven summaries for the whole dataset, repeated active
/// learning runs, and repeated random guessing on the same budget
#[derive(Debug, Clone)]
pub struct Comparison {
    pub as_is: Num,
    pub smo: Num,
    pub guess: Num,
    /// Labels each random guess was allowed
    pub budget: usize,
    pub repeats: usize,
}

/// Run `repeats` rounds of [`smo`] and [`random_guess`] in parallel.
///
/// Repeat `i` is seeded with `settings.seed + i`, so results do not depend on
/// scheduling. Every distance is measured against the full dataset.
pub fn compare(data: &Data, settings: &Settings, repeats: usize) -> Result<Comparison> {
    if data.rows.is_empty() {
        return Err(EzError::EmptyDataset);
    }
    let budget = settings.budget0 + settings.budget;

    let runs: Vec<(f64, f64)> = (0..repeats)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(settings.seed.wrapping_add(i as u64));
            let found = smo(data, settings, &mut rng)?;
            let guess = random_guess(data, budget, &mut rng)?;
            Ok((data.d2h(&found.best), data.d2h(&guess)))
        })
        .collect::<Result<_>>()?;

    let mut as_is = Num::new(0, "asIs");
    for r in &data.rows {
        as_is.add(data.d2h(r));
    }
    let mut smo_d2h = Num::new(0, "smo");
    let mut guess_d2h = Num::new(0, "guess");
    for (s, g) in runs {
        smo_d2h.add(s);
        guess_d2h.add(g);
    }
    log::info!(
        "compare: {} repeats, asIs {:.3}, smo {:.3}, guess {:.3}",
        repeats,
        as_is.mid(),
        smo_d2h.mid(),
        guess_d2h.mid()
    );

    Ok(Comparison {
        as_is,
        smo: smo_d2h,
        guess: guess_d2h,
        budget,
        repeats,
    })
}
