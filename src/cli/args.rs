//! Command-line argument definitions using clap

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::Settings;

/// ezr - Active learning and best/rest explanation for small tabular datasets
#[derive(Parser, Debug)]
#[command(name = "ezr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Input file path (CSV or Parquet). The first row names the columns.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// JSON settings file. Fields it omits keep their defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub knobs: Knobs,
}

/// Per-run overrides of the settings file and defaults
#[derive(Args, Debug, Default, Clone)]
pub struct Knobs {
    /// Random number seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Maximum number of bins per column
    #[arg(long, global = true)]
    pub bins: Option<usize>,

    /// Naive Bayes low class frequency smoothing
    #[arg(short = 'k', global = true)]
    pub k: Option<f64>,

    /// Naive Bayes low attribute frequency smoothing
    #[arg(short = 'm', global = true)]
    pub m: Option<f64>,

    /// Rows labeled before active learning starts
    #[arg(long, global = true)]
    pub budget0: Option<usize>,

    /// Rows labeled during active learning
    #[arg(long, global = true)]
    pub budget: Option<usize>,

    /// Best rows are the top |labeled|^best
    #[arg(long, global = true, value_parser = validate_open_fraction)]
    pub best: Option<f64>,

    /// Fraction of candidates kept each active learning round
    #[arg(long, global = true, value_parser = validate_fraction)]
    pub top: Option<f64>,

    /// Stop splitting a tree below this many best rows
    #[arg(long, global = true)]
    pub leaf: Option<usize>,

    /// Rows Naive Bayes trains on before it starts scoring
    #[arg(long, global = true)]
    pub warmup: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Column summary: role, count, middle and spread of every column
    Info,

    /// Rows sorted by distance to heaven
    Rank {
        /// Print every Nth row
        #[arg(long, default_value = "30")]
        every: usize,
    },

    /// Bins ranked by how well they separate best rows from rest
    Bins,

    /// Tree explaining what separates best rows from rest
    Tree {
        /// Also write the tree as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// One active learning run
    Smo,

    /// Active learning versus random guessing, over repeated seeds
    Compare {
        /// Number of seeds to try
        #[arg(long, default_value = "20")]
        repeats: usize,
    },

    /// Incremental Naive Bayes accuracy on the class column
    Bayes,

    /// Show how column names map to roles, on the auto93 header
    Header,
}

impl Cli {
    /// Get the input path, returning an error if it was not given
    pub fn input(&self) -> Result<&PathBuf> {
        self.input.as_ref().ok_or_else(|| {
            anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
        })
    }

    /// Defaults, then the settings file, then command-line flags
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        let settings = self.knobs.apply(base);
        settings
            .validate()
            .context("Invalid settings on the command line")?;
        Ok(settings)
    }
}

impl Knobs {
    /// Overwrite every field that was given on the command line
    pub fn apply(&self, mut s: Settings) -> Settings {
        if let Some(v) = self.seed {
            s.seed = v;
        }
        if let Some(v) = self.bins {
            s.bins = v;
        }
        if let Some(v) = self.k {
            s.k = v;
        }
        if let Some(v) = self.m {
            s.m = v;
        }
        if let Some(v) = self.budget0 {
            s.budget0 = v;
        }
        if let Some(v) = self.budget {
            s.budget = v;
        }
        if let Some(v) = self.best {
            s.best = v;
        }
        if let Some(v) = self.top {
            s.top = v;
        }
        if let Some(v) = self.leaf {
            s.leaf = v;
        }
        if let Some(v) = self.warmup {
            s.warmup = v;
        }
        s
    }
}

/// Validator for fractions in (0, 1]
fn validate_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!("must be in (0, 1], got {}", value))
    }
}

/// Validator for fractions in (0, 1)
fn validate_open_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!("must be in (0, 1), got {}", value))
    }
}
