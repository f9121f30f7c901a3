//! Column set: header names turned into typed, role-tagged summaries

use super::column::{Col, Role};
use super::error::{EzError, Result};
use super::value::{Value, MISSING};

/// All column summaries of a dataset, with index views by role
#[derive(Debug, Clone, PartialEq)]
pub struct Cols {
    /// Header names, in declaration order
    pub names: Vec<String>,
    /// Every column, in declaration order
    pub all: Vec<Col>,
    /// Positions (into `all`) of independent columns
    pub x: Vec<usize>,
    /// Positions (into `all`) of dependent columns: goals and the class
    pub y: Vec<usize>,
    /// Position of the class column, if any
    pub klass: Option<usize>,
}

impl Cols {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(EzError::EmptyHeader);
        }
        let mut all = Vec::with_capacity(names.len());
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut klass = None;

        for (at, txt) in names.iter().enumerate() {
            let col = Col::new(at, txt);
            match col.role() {
                Role::Ignore => {}
                Role::X => x.push(at),
                Role::Goal => y.push(at),
                Role::Klass => {
                    y.push(at);
                    if klass.is_none() {
                        klass = Some(at);
                    }
                }
            }
            all.push(col);
        }

        Ok(Self {
            names,
            all,
            x,
            y,
            klass,
        })
    }

    /// Fresh, empty columns with the same names and roles
    pub fn fresh(&self) -> Self {
        Self {
            names: self.names.clone(),
            all: self.names.iter().enumerate().map(|(at, txt)| Col::new(at, txt)).collect(),
            x: self.x.clone(),
            y: self.y.clone(),
            klass: self.klass,
        }
    }

    pub fn x_cols(&self) -> impl Iterator<Item = &Col> {
        self.x.iter().map(|&i| &self.all[i])
    }

    pub fn y_cols(&self) -> impl Iterator<Item = &Col> {
        self.y.iter().map(|&i| &self.all[i])
    }

    /// Numeric goal columns, the ones `d2h` measures
    pub fn goals(&self) -> impl Iterator<Item = &super::column::Num> {
        self.y_cols().filter_map(|col| match col {
            Col::Num(num) if col.role() == Role::Goal => Some(num),
            _ => None,
        })
    }

    pub fn klass_col(&self) -> Option<&Col> {
        self.klass.map(|i| &self.all[i])
    }

    /// Type raw text cells according to their columns.
    ///
    /// `?` and empty cells become missing; numeric columns must parse as numbers.
    pub fn coerce(&self, raw: &[&str]) -> Result<Vec<Value>> {
        self.check_arity(raw.len())?;
        self.all
            .iter()
            .zip(raw)
            .map(|(col, cell)| {
                let cell = cell.trim();
                if cell.is_empty() || cell == MISSING {
                    Ok(Value::Missing)
                } else if col.is_num() {
                    cell.parse::<f64>().map(Value::Num).map_err(|_| EzError::Coerce {
                        column: col.txt().to_string(),
                        expected: "numeric",
                        value: cell.to_string(),
                    })
                } else {
                    Ok(Value::Sym(cell.to_string()))
                }
            })
            .collect()
    }

    /// Update every column with one row. The row is checked first, so a bad
    /// row leaves all statistics untouched.
    pub fn add(&mut self, row: &[Value]) -> Result<()> {
        self.check(row)?;
        for col in &mut self.all {
            col.add(&row[col.at()]);
        }
        Ok(())
    }

    /// Validate a row against the header without updating anything
    pub fn check(&self, row: &[Value]) -> Result<()> {
        self.check_arity(row.len())?;
        for col in &self.all {
            let x = &row[col.at()];
            if !col.accepts(x) {
                return Err(EzError::Coerce {
                    column: col.txt().to_string(),
                    expected: if col.is_num() { "numeric" } else { "symbolic" },
                    value: x.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_arity(&self, found: usize) -> Result<()> {
        if found != self.all.len() {
            return Err(EzError::Arity {
                expected: self.all.len(),
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_auto93_header_roles() {
        let cols = Cols::new(names(&[
            "Clndrs", "Volume", "HpX", "Model", "origin", "Lbs-", "Acc+", "Mpg+",
        ]))
        .unwrap();

        let x: Vec<&str> = cols.x_cols().map(|c| c.txt()).collect();
        let y: Vec<&str> = cols.y_cols().map(|c| c.txt()).collect();
        assert_eq!(x, vec!["Clndrs", "Volume", "Model", "origin"]);
        assert_eq!(y, vec!["Lbs-", "Acc+", "Mpg+"]);
        assert_eq!(cols.all.len(), 8);
        assert!(cols.klass.is_none());
        assert_eq!(cols.goals().count(), 3);
    }

    #[test]
    fn test_klass_column() {
        let cols = Cols::new(names(&["outlook", "Temp", "play!"])).unwrap();
        assert_eq!(cols.klass, Some(2));
        assert_eq!(cols.y, vec![2]);
        assert_eq!(cols.goals().count(), 0);
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(Cols::new(Vec::new()), Err(EzError::EmptyHeader));
    }

    #[test]
    fn test_coerce() {
        let cols = Cols::new(names(&["Volume", "origin"])).unwrap();
        assert_eq!(
            cols.coerce(&["350", " 1 "]).unwrap(),
            vec![Value::Num(350.0), Value::sym("1")]
        );
        assert_eq!(
            cols.coerce(&["?", ""]).unwrap(),
            vec![Value::Missing, Value::Missing]
        );
        assert!(matches!(
            cols.coerce(&["big", "1"]),
            Err(EzError::Coerce { .. })
        ));
        assert!(matches!(cols.coerce(&["1"]), Err(EzError::Arity { .. })));
    }

    #[test]
    fn test_bad_row_leaves_stats_untouched() {
        let mut cols = Cols::new(names(&["Volume", "Lbs-"])).unwrap();
        cols.add(&[Value::Num(1.0), Value::Num(2.0)]).unwrap();
        let before = cols.clone();

        assert!(cols.add(&[Value::Num(5.0), Value::sym("heavy")]).is_err());
        assert!(cols.add(&[Value::Num(5.0)]).is_err());
        assert_eq!(cols, before);
    }

    #[test]
    fn test_fresh_keeps_shape() {
        let mut cols = Cols::new(names(&["Volume", "Lbs-"])).unwrap();
        cols.add(&[Value::Num(1.0), Value::Num(2.0)]).unwrap();
        let fresh = cols.fresh();
        assert_eq!(fresh.names, cols.names);
        assert_eq!(fresh.y, cols.y);
        assert_eq!(fresh.all[0].n(), 0);
    }
}
