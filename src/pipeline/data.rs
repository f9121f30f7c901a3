//! Datasets: rows plus the column summaries kept in sync with them

use super::cols::Cols;
use super::error::Result;
use super::settings::Settings;
use super::value::{row, Row, Value};

/// Rows summarized into columns
#[derive(Debug, Clone)]
pub struct Data {
    pub rows: Vec<Row>,
    pub cols: Cols,
}

impl Data {
    /// An empty dataset with the given header
    pub fn new(names: Vec<String>) -> Result<Self> {
        Ok(Self {
            rows: Vec::new(),
            cols: Cols::new(names)?,
        })
    }

    /// Build a dataset from a header and typed rows
    pub fn from_rows<I>(names: Vec<String>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let mut data = Self::new(names)?;
        for values in rows {
            data.add(row(values))?;
        }
        Ok(data)
    }

    /// Build a dataset from a header and raw text cells, typed per column
    pub fn from_text<S: AsRef<str>>(names: &[S], rows: &[Vec<S>]) -> Result<Self> {
        let mut data = Self::new(names.iter().map(|s| s.as_ref().to_string()).collect())?;
        for raw in rows {
            let cells: Vec<&str> = raw.iter().map(|s| s.as_ref()).collect();
            let values = data.cols.coerce(&cells)?;
            data.add(row(values))?;
        }
        Ok(data)
    }

    /// Append a row, updating every column summary
    pub fn add(&mut self, row: Row) -> Result<()> {
        self.cols.add(&row)?;
        self.rows.push(row);
        Ok(())
    }

    /// A dataset with the same header holding `rows`. Statistics are rebuilt
    /// from just those rows.
    pub fn clone_with<'a, I>(&self, rows: I) -> Result<Data>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut out = Data {
            rows: Vec::new(),
            cols: self.cols.fresh(),
        };
        for r in rows {
            out.add(r.clone())?;
        }
        Ok(out)
    }

    /// Sort rows by distance to heaven, best first. Stable.
    pub fn order(&mut self) -> &[Row] {
        let rows = std::mem::take(&mut self.rows);
        let mut keyed: Vec<(f64, Row)> = rows.into_iter().map(|r| (self.d2h(&r), r)).collect();
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        self.rows = keyed.into_iter().map(|(_, r)| r).collect();
        &self.rows
    }

    /// Root mean square of each goal's normalized distance to its ideal.
    /// 0 is heaven, 1 is hell.
    pub fn d2h(&self, row: &[Value]) -> f64 {
        let mut d = 0.0;
        let mut n = 0;
        for goal in self.cols.goals() {
            if let Value::Num(x) = row[goal.at] {
                d += goal.d2h(x).powi(2);
                n += 1;
            }
        }
        if n == 0 {
            0.0
        } else {
            (d / n as f64).sqrt()
        }
    }

    /// Naive Bayes log score of `row` belonging to this dataset.
    ///
    /// `nall` is the row count over every competing dataset and `nh` the
    /// number of those datasets; together they set this dataset's prior.
    pub fn loglike(&self, row: &[Value], nall: usize, nh: usize, settings: &Settings) -> f64 {
        let prior =
            (self.rows.len() as f64 + settings.k) / (nall as f64 + settings.k * nh as f64);
        let likes = self
            .cols
            .x_cols()
            .filter(|col| !row[col.at()].is_missing())
            .map(|col| col.like(&row[col.at()], prior, settings.m));
        likes
            .chain(std::iter::once(prior))
            .filter(|&x| x > 0.0)
            .map(f64::ln)
            .sum()
    }

    /// Central tendency of every column, in header order
    pub fn mids(&self) -> Vec<Value> {
        self.cols.all.iter().map(|col| col.mid()).collect()
    }

    /// Names and central tendencies of the columns at `at`, numbers rounded
    /// to `digits` decimal places
    pub fn stats(&self, at: &[usize], digits: i32) -> Vec<(String, Value)> {
        let scale = 10f64.powi(digits);
        at.iter()
            .filter_map(|&i| self.cols.all.get(i))
            .map(|col| {
                let mid = match col.mid() {
                    Value::Num(x) => Value::Num((x * scale).round() / scale),
                    other => other,
                };
                (col.txt().to_string(), mid)
            })
            .collect()
    }
}
