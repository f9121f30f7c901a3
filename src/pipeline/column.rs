//! Incremental column summaries (NUM and SYM)
//!
//! A column's name encodes its type and role: an upper-case first letter
//! means numeric, a trailing `-`/`+` marks a goal to minimize/maximize, `!`
//! marks the class label and `X` means ignore.

use std::collections::HashMap;

use super::bin::Bin;
use super::discretize::merges;
use super::value::Value;

/// Stand-in for infinity in column bounds
pub const BIG: f64 = 1e32;
/// Guard against division by zero
pub const TINY: f64 = 1.0 / BIG;

/// What a column is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Independent attribute
    X,
    /// Numeric goal (`+` or `-`)
    Goal,
    /// Class label (`!`)
    Klass,
    /// Skipped (`X`)
    Ignore,
}

impl Role {
    pub fn from_name(txt: &str) -> Self {
        match txt.chars().last() {
            Some('X') => Role::Ignore,
            Some('!') => Role::Klass,
            Some('+') | Some('-') => Role::Goal,
            _ => Role::X,
        }
    }
}

/// Key used to place a raw value into an initial bin
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BinKey {
    Index(usize),
    Symbol(String),
}

/// Summary of a numeric column: Welford mean/variance plus min/max
#[derive(Debug, Clone, PartialEq)]
pub struct Num {
    pub at: usize,
    pub txt: String,
    pub n: usize,
    mu: f64,
    m2: f64,
    pub lo: f64,
    pub hi: f64,
    /// 0 when minimizing, 1 otherwise
    pub heaven: f64,
}

impl Num {
    pub fn new(at: usize, txt: &str) -> Self {
        Self {
            at,
            txt: txt.to_string(),
            n: 0,
            mu: 0.0,
            m2: 0.0,
            lo: BIG,
            hi: -BIG,
            heaven: if txt.ends_with('-') { 0.0 } else { 1.0 },
        }
    }

    pub fn add(&mut self, x: f64) {
        self.n += 1;
        let d = x - self.mu;
        self.mu += d / self.n as f64;
        self.m2 += d * (x - self.mu);
        self.lo = self.lo.min(x);
        self.hi = self.hi.max(x);
    }

    pub fn mid(&self) -> f64 {
        self.mu
    }

    /// Sample standard deviation, 0 below two observations
    pub fn div(&self) -> f64 {
        if self.n < 2 {
            0.0
        } else {
            (self.m2 / (self.n - 1) as f64).sqrt()
        }
    }

    /// Map `x` into 0..1 (min..max)
    pub fn norm(&self, x: f64) -> f64 {
        (x - self.lo) / (self.hi - self.lo + TINY)
    }

    /// Distance from `x` to this column's ideal edge
    pub fn d2h(&self, x: f64) -> f64 {
        (self.norm(x) - self.heaven).abs()
    }

    /// Gaussian density at `x`, clipped to 1
    pub fn like(&self, x: f64) -> f64 {
        let v = self.div().powi(2) + TINY;
        let nom = (-(x - self.mu).powi(2) / (2.0 * v)).exp() + TINY;
        let denom = (2.0 * std::f64::consts::PI * v).sqrt();
        (nom / (denom + TINY)).min(1.0)
    }

    /// Equal-width bin index of `x`
    pub fn bin(&self, x: f64, bins: usize) -> usize {
        let i = (bins as f64 * self.norm(x)).floor().max(0.0) as usize;
        i.min(bins.saturating_sub(1))
    }

    /// Merge neighbors, then stitch the survivors into one gapless partition
    /// spanning minus to plus infinity.
    ///
    /// Each interior boundary sits at the smallest value of the bin above it,
    /// so every value still falls in the bin that counted it.
    pub fn complete_bins(&self, bins: Vec<Bin>, small: f64) -> Vec<Bin> {
        let mut bins = merges(bins, |a, b| a.merge(b, small));
        if bins.is_empty() {
            return bins;
        }
        for j in 1..bins.len() {
            if let Some(next_lo) = bins[j].lo() {
                set_hi(&mut bins[j - 1], next_lo);
            }
        }
        let last = bins.len() - 1;
        set_lo(&mut bins[0], f64::NEG_INFINITY);
        set_hi(&mut bins[last], f64::INFINITY);
        bins
    }
}

fn set_lo(bin: &mut Bin, x: f64) {
    if let super::bin::Span::Range { lo, .. } = &mut bin.span {
        *lo = x;
    }
}

fn set_hi(bin: &mut Bin, x: f64) {
    if let super::bin::Span::Range { hi, .. } = &mut bin.span {
        *hi = x;
    }
}

/// Summary of a symbolic column: a frequency table
#[derive(Debug, Clone, PartialEq)]
pub struct Sym {
    pub at: usize,
    pub txt: String,
    pub n: usize,
    has: HashMap<String, usize>,
    /// Symbols in order of first sighting
    seen: Vec<String>,
}

impl Sym {
    pub fn new(at: usize, txt: &str) -> Self {
        Self {
            at,
            txt: txt.to_string(),
            n: 0,
            has: HashMap::new(),
            seen: Vec::new(),
        }
    }

    pub fn add(&mut self, x: &str) {
        self.n += 1;
        match self.has.get_mut(x) {
            Some(count) => *count += 1,
            None => {
                self.has.insert(x.to_string(), 1);
                self.seen.push(x.to_string());
            }
        }
    }

    pub fn count(&self, x: &str) -> usize {
        self.has.get(x).copied().unwrap_or(0)
    }

    /// Most frequent symbol. Ties go to the symbol seen first.
    pub fn mid(&self) -> Option<&str> {
        let mut out: Option<(&str, usize)> = None;
        for s in &self.seen {
            let c = self.has[s];
            if out.map_or(true, |(_, best)| c > best) {
                out = Some((s.as_str(), c));
            }
        }
        out.map(|(s, _)| s)
    }

    /// Entropy of the frequency table
    pub fn div(&self) -> f64 {
        super::bin::entropy(self.seen.iter().map(|s| &self.has[s])).0
    }

    /// m-estimate of `x` given a class prior
    pub fn like(&self, x: &str, prior: f64, m: f64) -> f64 {
        (self.count(x) as f64 + m * prior) / (self.n as f64 + m)
    }
}

/// A column summary of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum Col {
    Num(Num),
    Sym(Sym),
}

impl Col {
    /// Build the right summary for a header name
    pub fn new(at: usize, txt: &str) -> Self {
        if txt.chars().next().is_some_and(|c| c.is_uppercase()) {
            Col::Num(Num::new(at, txt))
        } else {
            Col::Sym(Sym::new(at, txt))
        }
    }

    pub fn at(&self) -> usize {
        match self {
            Col::Num(c) => c.at,
            Col::Sym(c) => c.at,
        }
    }

    pub fn txt(&self) -> &str {
        match self {
            Col::Num(c) => &c.txt,
            Col::Sym(c) => &c.txt,
        }
    }

    pub fn n(&self) -> usize {
        match self {
            Col::Num(c) => c.n,
            Col::Sym(c) => c.n,
        }
    }

    pub fn role(&self) -> Role {
        Role::from_name(self.txt())
    }

    pub fn is_num(&self) -> bool {
        matches!(self, Col::Num(_))
    }

    /// Can this column hold `x`? Missing fits everywhere.
    pub fn accepts(&self, x: &Value) -> bool {
        matches!(
            (self, x),
            (_, Value::Missing) | (Col::Num(_), Value::Num(_)) | (Col::Sym(_), Value::Sym(_))
        )
    }

    /// Summarize one more value. Missing values are skipped.
    pub fn add(&mut self, x: &Value) {
        match (self, x) {
            (Col::Num(c), Value::Num(v)) => c.add(*v),
            (Col::Sym(c), Value::Sym(s)) => c.add(s),
            _ => {}
        }
    }

    /// Central tendency: mean or mode
    pub fn mid(&self) -> Value {
        match self {
            Col::Num(c) if c.n > 0 => Value::Num(c.mid()),
            Col::Sym(c) => c.mid().map_or(Value::Missing, Value::sym),
            _ => Value::Missing,
        }
    }

    /// Dispersion: standard deviation or entropy
    pub fn div(&self) -> f64 {
        match self {
            Col::Num(c) => c.div(),
            Col::Sym(c) => c.div(),
        }
    }

    /// Likelihood of `x` under this summary
    pub fn like(&self, x: &Value, prior: f64, m: f64) -> f64 {
        match (self, x) {
            (Col::Num(c), Value::Num(v)) => c.like(*v),
            (Col::Sym(c), Value::Sym(s)) => c.like(s, prior, m),
            _ => 0.0,
        }
    }

    /// Initial bin for a raw value: equal-width index or the symbol itself
    pub fn bin_key(&self, x: &Value, bins: usize) -> Option<BinKey> {
        match (self, x) {
            (Col::Num(c), Value::Num(v)) => Some(BinKey::Index(c.bin(*v, bins))),
            (Col::Sym(_), Value::Sym(s)) => Some(BinKey::Symbol(s.clone())),
            _ => None,
        }
    }

    /// Finish a sorted list of initial bins. Symbolic bins are kept as-is.
    pub fn complete_bins(&self, bins: Vec<Bin>, small: f64) -> Vec<Bin> {
        match self {
            Col::Num(c) => c.complete_bins(bins, small),
            Col::Sym(_) => bins,
        }
    }
}
