//! Error types for the modeling core.
//!
//! Structural misuse (rows that disagree with their header, partitions missing
//! an expected class) is reported here. Numeric edge cases such as zero
//! variance or constant columns are absorbed by the columns themselves and
//! never surface as errors.

use thiserror::Error;

/// Errors raised while building or querying datasets and models
#[derive(Debug, Error, PartialEq)]
pub enum EzError {
    /// A header row with no column names
    #[error("header row is empty")]
    EmptyHeader,

    /// Row length disagrees with the header
    #[error("row has {found} values but the header declares {expected} columns")]
    Arity { expected: usize, found: usize },

    /// A cell that cannot be read as its column's type
    #[error("column '{column}' expects a {expected} value, got '{value}'")]
    Coerce {
        column: String,
        expected: &'static str,
        value: String,
    },

    /// A class partition lacking one of the labels the caller asked for
    #[error("class partition has no '{0}' rows")]
    MissingClass(String),

    /// Classification requested on data whose header names no class column
    #[error("header has no class column (a name ending in '!')")]
    NoClassColumn,

    /// An operation that must return a row was handed no rows
    #[error("dataset has no rows")]
    EmptyDataset,

    /// A setting outside its valid range
    #[error("invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Result alias for the modeling core
pub type Result<T> = std::result::Result<T, EzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EzError::Arity { expected: 8, found: 7 };
        assert_eq!(
            err.to_string(),
            "row has 7 values but the header declares 8 columns"
        );

        let err = EzError::Coerce {
            column: "Lbs-".to_string(),
            expected: "numeric",
            value: "heavy".to_string(),
        };
        assert!(err.to_string().contains("Lbs-"));
        assert!(err.to_string().contains("heavy"));
    }
}
