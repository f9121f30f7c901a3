//! Bins: value ranges tagged with the class labels seen inside them
//!
//! A numeric bin covers `[lo, hi)` (or exactly `lo` when `lo == hi`); a
//! symbolic bin covers one symbol. Each bin counts how often every class
//! label fell into it, which is what merging and tree splitting score on.

use std::collections::BTreeMap;
use std::fmt;

use super::value::{Row, Value};

/// Mapping from class label to the rows carrying that label
pub type Classes = BTreeMap<String, Vec<Row>>;

/// Total number of rows across all classes
pub fn class_size(classes: &Classes) -> usize {
    classes.values().map(|rows| rows.len()).sum()
}

/// What part of a column a bin covers
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    /// Numeric range, `[lo, hi)`
    Range { lo: f64, hi: f64 },
    /// A single symbol
    Symbol(String),
}

/// Shannon entropy (base 2) of a table of counts, plus the total count
pub fn entropy<'a>(counts: impl IntoIterator<Item = &'a usize>) -> (f64, usize) {
    let counts: Vec<usize> = counts.into_iter().copied().filter(|&n| n > 0).collect();
    let total: usize = counts.iter().sum();
    if total == 0 {
        return (0.0, 0);
    }
    let n = total as f64;
    let e = -counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p.log2()
        })
        .sum::<f64>();
    (e, total)
}

/// A range (or symbol) of one column with its class counts
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    /// Index of the owning column
    pub at: usize,
    /// Name of the owning column
    pub txt: String,
    pub span: Span,
    /// Class label -> occurrences
    pub ys: BTreeMap<String, usize>,
}

impl Bin {
    /// A fresh bin holding no rows, spanning exactly `x`
    pub fn new(at: usize, txt: &str, x: &Value) -> Self {
        let span = match x {
            Value::Num(v) => Span::Range { lo: *v, hi: *v },
            other => Span::Symbol(other.to_string()),
        };
        Self {
            at,
            txt: txt.to_string(),
            span,
            ys: BTreeMap::new(),
        }
    }

    /// Widen the span to cover `x` and count one more `y`
    pub fn add(&mut self, x: &Value, y: &str) {
        if let (Span::Range { lo, hi }, Value::Num(v)) = (&mut self.span, x) {
            *lo = lo.min(*v);
            *hi = hi.max(*v);
        }
        *self.ys.entry(y.to_string()).or_insert(0) += 1;
    }

    /// Number of rows counted in this bin
    pub fn n(&self) -> usize {
        self.ys.values().sum()
    }

    /// Lower bound, for numeric bins
    pub fn lo(&self) -> Option<f64> {
        match self.span {
            Span::Range { lo, .. } => Some(lo),
            Span::Symbol(_) => None,
        }
    }

    /// Upper bound, for numeric bins
    pub fn hi(&self) -> Option<f64> {
        match self.span {
            Span::Range { hi, .. } => Some(hi),
            Span::Symbol(_) => None,
        }
    }

    /// Combine two neighboring numeric bins of the same column.
    ///
    /// Returns the union when either side has fewer than `small` rows, or when
    /// the union's entropy is no worse than the weighted entropy of the parts.
    /// `None` means "keep them apart".
    pub fn merge(&self, other: &Bin, small: f64) -> Option<Bin> {
        if self.at != other.at {
            return None;
        }
        let span = match (&self.span, &other.span) {
            (Span::Range { lo: lo1, hi: hi1 }, Span::Range { lo: lo2, hi: hi2 }) => Span::Range {
                lo: lo1.min(*lo2),
                hi: hi1.max(*hi2),
            },
            _ => return None,
        };
        let mut ys = self.ys.clone();
        for (k, v) in &other.ys {
            *ys.entry(k.clone()).or_insert(0) += v;
        }
        let merged = Bin {
            at: self.at,
            txt: self.txt.clone(),
            span,
            ys,
        };

        let (ei, ni) = entropy(self.ys.values());
        let (ej, nj) = entropy(other.ys.values());
        let (ek, nk) = entropy(merged.ys.values());
        if (ni as f64) < small || (nj as f64) < small {
            return Some(merged);
        }
        if ek <= (ni as f64 * ei + nj as f64 * ej) / nk as f64 {
            return Some(merged);
        }
        None
    }

    /// Does this bin match the row? Missing values match every bin.
    pub fn selects(&self, row: &[Value]) -> bool {
        match (&self.span, &row[self.at]) {
            (_, Value::Missing) => true,
            (Span::Range { lo, hi }, Value::Num(x)) => {
                (lo == x && x == hi) || (*lo <= *x && *x < *hi)
            }
            (Span::Symbol(s), Value::Sym(x)) => s == x,
            _ => false,
        }
    }

    /// Split a partition into the rows this bin selects and the rest,
    /// keeping class labels on both sides.
    pub fn selects_rejects(&self, classes: &Classes) -> (Classes, Classes) {
        let mut yes = Classes::new();
        let mut no = Classes::new();
        for (klass, rows) in classes {
            for row in rows {
                let side = if self.selects(row) { &mut yes } else { &mut no };
                side.entry(klass.clone()).or_default().push(row.clone());
            }
        }
        (yes, no)
    }

    /// Fraction of `best` rows minus fraction of `rest` rows counted here
    pub fn score(&self, best: &str, rest: &str, n_best: usize, n_rest: usize) -> f64 {
        let b = *self.ys.get(best).unwrap_or(&0) as f64;
        let r = *self.ys.get(rest).unwrap_or(&0) as f64;
        b / (n_best as f64 + super::column::TINY) - r / (n_rest as f64 + super::column::TINY)
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Span::Symbol(s) => write!(f, "{} == {}", self.txt, s),
            Span::Range { lo, hi } if lo == hi => write!(f, "{} == {}", self.txt, Value::Num(*lo)),
            Span::Range { lo, hi } => match (lo.is_infinite(), hi.is_infinite()) {
                (true, true) => write!(f, "{} any", self.txt),
                (true, false) => write!(f, "{} < {}", self.txt, Value::Num(*hi)),
                (false, true) => write!(f, "{} >= {}", self.txt, Value::Num(*lo)),
                (false, false) => write!(
                    f,
                    "{} <= {} < {}",
                    Value::Num(*lo),
                    self.txt,
                    Value::Num(*hi)
                ),
            },
        }
    }
}
