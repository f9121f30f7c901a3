//! Scalar cells and rows

use std::fmt;
use std::sync::Arc;

/// Text that marks a missing cell in input files
pub const MISSING: &str = "?";

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unknown value (written as `?`)
    Missing,
    /// Numeric value
    Num(f64),
    /// Symbolic value
    Sym(String),
}

impl Value {
    pub fn sym(s: impl Into<String>) -> Self {
        Value::Sym(s.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(x) => Some(*x),
            _ => None,
        }
    }

}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "{}", MISSING),
            Value::Num(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{}", *x as i64),
            Value::Num(x) => write!(f, "{}", x),
            Value::Sym(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Num(x)
    }
}

/// An immutable row. Sub-datasets share rows instead of copying them.
pub type Row = Arc<[Value]>;

/// Build a row from owned values
pub fn row(values: Vec<Value>) -> Row {
    Arc::from(values)
}
