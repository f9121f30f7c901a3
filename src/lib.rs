//! ezr: Active Learning and Explanation Library
//!
//! Summarizes tabular data into typed columns, ranks rows by distance to
//! heaven, finds good rows with few labels (sequential model optimization),
//! explains best versus rest with discretized trees, and classifies rows
//! with an incremental Naive Bayes.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
