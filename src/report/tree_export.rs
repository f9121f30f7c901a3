//! Explanation tree export functionality

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{Bin, Node, Settings, Span};

/// Metadata about the run that grew the tree
#[derive(Serialize)]
pub struct TreeMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// ezr version
    pub ezr_version: String,
    /// Input file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    /// Label of the class being explained
    pub best: String,
    /// Label of everything else
    pub rest: String,
    /// Settings used for discretization and growth
    pub settings: Settings,
}

/// One tree node as a nested record
#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeRecord {
    Leaf {
        depth: usize,
        /// Rows per class that reached this leaf
        counts: BTreeMap<String, usize>,
    },
    Split {
        depth: usize,
        /// Splitting column index
        at: usize,
        /// Splitting column name
        column: String,
        /// Human readable condition, e.g. `Volume < 120`
        condition: String,
        /// Lower bound, absent when unbounded or symbolic
        #[serde(skip_serializing_if = "Option::is_none")]
        lo: Option<f64>,
        /// Upper bound, absent when unbounded or symbolic
        #[serde(skip_serializing_if = "Option::is_none")]
        hi: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        symbol: Option<String>,
        yes: Box<NodeRecord>,
        no: Box<NodeRecord>,
    },
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        match node {
            Node::Leaf { depth, classes } => NodeRecord::Leaf {
                depth: *depth,
                counts: classes
                    .iter()
                    .map(|(klass, rows)| (klass.clone(), rows.len()))
                    .collect(),
            },
            Node::Split {
                depth,
                at,
                txt,
                span,
                yes,
                no,
            } => {
                let condition = Bin {
                    at: *at,
                    txt: txt.clone(),
                    span: span.clone(),
                    ys: Default::default(),
                }
                .to_string();
                let (lo, hi, symbol) = match span {
                    Span::Range { lo, hi } => (finite(*lo), finite(*hi), None),
                    Span::Symbol(s) => (None, None, Some(s.clone())),
                };
                NodeRecord::Split {
                    depth: *depth,
                    at: *at,
                    column: txt.clone(),
                    condition,
                    lo,
                    hi,
                    symbol,
                    yes: Box::new(NodeRecord::from(yes.as_ref())),
                    no: Box::new(NodeRecord::from(no.as_ref())),
                }
            }
        }
    }
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// Complete tree export with metadata
#[derive(Serialize)]
pub struct TreeExport {
    pub metadata: TreeMetadata,
    pub tree: NodeRecord,
}

impl TreeExport {
    pub fn new(tree: &Node, input_file: Option<&Path>, best: &str, rest: &str, settings: &Settings) -> Self {
        Self {
            metadata: TreeMetadata {
                timestamp: Utc::now().to_rfc3339(),
                ezr_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.map(|p| p.display().to_string()),
                best: best.to_string(),
                rest: rest.to_string(),
                settings: settings.clone(),
            },
            tree: NodeRecord::from(tree),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize tree to JSON")
    }

    /// Write the export to a JSON file
    pub fn write(&self, output_path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write tree to {}", output_path.display()))?;
        Ok(())
    }
}
