//! Tunable knobs shared by discretization, classification and optimization

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::EzError;

/// Run configuration.
///
/// Defaults mirror the classic option table: 16 bins, `k=1`, `m=2`,
/// 4 initial evaluations, 16 more acquired, best ratio 0.5, top 0.8,
/// leaf size 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Random number seed
    pub seed: u64,
    /// Maximum number of bins per numeric column
    pub bins: usize,
    /// Low frequency kludge for class priors
    pub k: f64,
    /// Low frequency kludge for symbolic likelihoods
    pub m: f64,
    /// Initial evaluations in the active learning loop
    pub budget0: usize,
    /// Further evaluations acquired by the active learning loop
    pub budget: usize,
    /// Exponent sizing the best set (`|done|^best`)
    pub best: f64,
    /// Fraction of candidates kept after each acquisition round
    pub top: f64,
    /// Tree leaf size (best rows)
    pub leaf: usize,
    /// Rows seen before the incremental classifier starts scoring
    pub warmup: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 1234567891,
            bins: 16,
            k: 1.0,
            m: 2.0,
            budget0: 4,
            budget: 16,
            best: 0.5,
            top: 0.8,
            leaf: 2,
            warmup: 10,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Fields the file omits keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every knob is inside its usable range
    pub fn validate(&self) -> std::result::Result<(), EzError> {
        if self.bins == 0 {
            return Err(EzError::InvalidSetting {
                name: "bins",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.best > 0.0 && self.best < 1.0) {
            return Err(EzError::InvalidSetting {
                name: "best",
                reason: format!("must be in (0, 1), got {}", self.best),
            });
        }
        if !(self.top > 0.0 && self.top <= 1.0) {
            return Err(EzError::InvalidSetting {
                name: "top",
                reason: format!("must be in (0, 1], got {}", self.top),
            });
        }
        if self.k < 0.0 || self.m < 0.0 {
            return Err(EzError::InvalidSetting {
                name: "k/m",
                reason: "smoothing constants cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}
