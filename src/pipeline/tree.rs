//! Explanation trees: why are the best rows best?
//!
//! Bins are computed once, against the full best/rest partition. Each node
//! splits on whichever of those bins most separates the best rows it holds
//! from the rest, until too few best rows remain or a split stops helping.

use std::fmt::Write as _;

use super::bin::{Bin, Classes, Span};
use super::column::TINY;
use super::data::Data;
use super::discretize::all_bins;
use super::error::{EzError, Result};
use super::settings::Settings;

/// A node of an explanation tree
#[derive(Debug, Clone)]
pub enum Node {
    /// Rows that reached this point
    Leaf { depth: usize, classes: Classes },
    /// A split on one bin
    Split {
        depth: usize,
        /// Splitting column index
        at: usize,
        /// Splitting column name
        txt: String,
        span: Span,
        /// Rows the bin selects
        yes: Box<Node>,
        /// Everything else
        no: Box<Node>,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { depth, .. } | Node::Split { depth, .. } => *depth,
        }
    }

    /// Nodes in pre-order: parent, then its yes subtree, then its no subtree
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.iter().filter(|node| node.is_leaf())
    }

    /// Rows of class `klass` held below this node
    pub fn count(&self, klass: &str) -> usize {
        self.leaves()
            .map(|leaf| match leaf {
                Node::Leaf { classes, .. } => classes.get(klass).map_or(0, |rows| rows.len()),
                Node::Split { .. } => 0,
            })
            .sum()
    }

    /// Indented text rendering, one line per node
    pub fn render(&self, best: &str, rest: &str) -> String {
        let mut out = String::new();
        self.render_into(&mut out, best, rest, "");
        out
    }

    fn render_into(&self, out: &mut String, best: &str, rest: &str, label: &str) {
        let pad = "|.. ".repeat(self.depth());
        let _ = writeln!(
            out,
            "{:<40} {}={} {}={}",
            format!("{}{}", pad, label),
            best,
            self.count(best),
            rest,
            self.count(rest)
        );
        if let Node::Split {
            at, txt, span, yes, no, ..
        } = self
        {
            let bin = Bin {
                at: *at,
                txt: txt.clone(),
                span: span.clone(),
                ys: Default::default(),
            };
            yes.render_into(out, best, rest, &bin.to_string());
            no.render_into(out, best, rest, &format!("not({})", bin));
        }
    }
}

/// Pre-order traversal over a tree
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Split { yes, no, .. } = node {
            self.stack.push(no);
            self.stack.push(yes);
        }
        Some(node)
    }
}

/// Default split score: share of best rows selected minus share of rest rows
pub fn best_minus_rest(b: f64, r: f64) -> f64 {
    b - r
}

/// Grow a tree with the default split score
pub fn grow(data: &Data, classes: &Classes, best: &str, rest: &str, settings: &Settings) -> Result<Node> {
    grow_with(data, classes, best, rest, settings, best_minus_rest)
}

/// Grow a tree, ranking bins with `score(best_share, rest_share)`.
///
/// `classes` must hold both `best` and `rest`. Every class other than `best`
/// counts as rest when scoring.
pub fn grow_with<F>(
    data: &Data,
    classes: &Classes,
    best: &str,
    rest: &str,
    settings: &Settings,
    score: F,
) -> Result<Node>
where
    F: Fn(f64, f64) -> f64,
{
    let n_best = classes
        .get(best)
        .ok_or_else(|| EzError::MissingClass(best.to_string()))?
        .len();
    let n_rest = classes
        .get(rest)
        .ok_or_else(|| EzError::MissingClass(rest.to_string()))?
        .len();

    let builder = Builder {
        bins: all_bins(data, classes, settings),
        best,
        n_best: n_best as f64,
        n_rest: n_rest as f64,
        leaf: settings.leaf,
        score,
    };
    Ok(builder.grow(classes.clone(), 0, None))
}

struct Builder<'a, F> {
    bins: Vec<Bin>,
    best: &'a str,
    n_best: f64,
    n_rest: f64,
    leaf: usize,
    score: F,
}

impl<F: Fn(f64, f64) -> f64> Builder<'_, F> {
    fn grow(&self, classes: Classes, depth: usize, above: Option<usize>) -> Node {
        let n_best = classes.get(self.best).map_or(0, |rows| rows.len());
        if n_best <= self.leaf || above == Some(n_best) {
            return Node::Leaf { depth, classes };
        }
        let Some(bin) = self.pick(&classes) else {
            return Node::Leaf { depth, classes };
        };
        log::debug!("tree: depth {} splits {} best rows on {}", depth, n_best, bin);

        let (yes, no) = bin.selects_rejects(&classes);
        Node::Split {
            depth,
            at: bin.at,
            txt: bin.txt.clone(),
            span: bin.span.clone(),
            yes: Box::new(self.grow(yes, depth + 1, Some(n_best))),
            no: Box::new(self.grow(no, depth + 1, Some(n_best))),
        }
    }

    /// Highest scoring bin for this partition. Ties go to the earlier bin.
    fn pick(&self, classes: &Classes) -> Option<&Bin> {
        let mut out: Option<(f64, &Bin)> = None;
        for bin in &self.bins {
            let s = self.rate(bin, classes);
            if out.map_or(true, |(best, _)| s > best) {
                out = Some((s, bin));
            }
        }
        out.map(|(_, bin)| bin)
    }

    fn rate(&self, bin: &Bin, classes: &Classes) -> f64 {
        let mut b = 0usize;
        let mut r = 0usize;
        for (klass, rows) in classes {
            let hits = rows.iter().filter(|row| bin.selects(row)).count();
            if klass == self.best {
                b += hits;
            } else {
                r += hits;
            }
        }
        (self.score)(b as f64 / (self.n_best + TINY), r as f64 / (self.n_rest + TINY))
    }
}
