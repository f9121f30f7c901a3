//! Pipeline module - columns, datasets, discretization, and the learners

pub mod bayes;
pub mod bin;
pub mod cols;
pub mod column;
pub mod compare;
pub mod data;
pub mod discretize;
pub mod error;
pub mod loader;
pub mod settings;
pub mod smo;
pub mod tree;
pub mod value;

pub use bayes::NaiveBayes;
pub use bin::{Bin, Classes, Span};
pub use cols::Cols;
pub use column::{Col, Num, Role, Sym};
pub use compare::{compare, random_guess, Comparison};
pub use data::Data;
pub use discretize::{all_bins, column_bins, rank_bins};
pub use error::EzError;
pub use loader::{load_data, load_frame};
pub use settings::Settings;
pub use smo::{smo, SmoResult};
pub use tree::Node;
pub use value::{Row, Value};
