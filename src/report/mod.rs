//! Report module - terminal tables and JSON export

pub mod summary;
pub mod tree_export;

pub use summary::*;
pub use tree_export::*;
