//! Incremental Naive Bayes: test on each row, then train on it

use super::cols::Cols;
use super::data::Data;
use super::error::{EzError, Result};
use super::settings::Settings;
use super::value::{Row, Value};

/// One dataset per class label, grown row by row
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    template: Cols,
    klass: usize,
    settings: Settings,
    /// Class models in order of first sighting
    datas: Vec<(String, Data)>,
    nall: usize,
    correct: usize,
}

impl NaiveBayes {
    /// A classifier for rows shaped like `cols`, which must name a class column
    pub fn new(cols: &Cols, settings: &Settings) -> Result<Self> {
        let klass = cols.klass.ok_or(EzError::NoClassColumn)?;
        Ok(Self {
            template: cols.fresh(),
            klass,
            settings: settings.clone(),
            datas: Vec::new(),
            nall: 0,
            correct: 0,
        })
    }

    /// Most likely class for `row`. Ties go to the class seen first.
    pub fn classify(&self, row: &[Value]) -> Option<&str> {
        let nh = self.datas.len();
        let mut out: Option<(f64, &str)> = None;
        for (label, data) in &self.datas {
            let like = data.loglike(row, self.nall, nh, &self.settings);
            if out.map_or(true, |(best, _)| like > best) {
                out = Some((like, label.as_str()));
            }
        }
        out.map(|(_, label)| label)
    }

    /// Score `row` (once past warm-up), then learn from it
    pub fn observe(&mut self, row: Row) -> Result<()> {
        self.template.check(&row)?;
        let want = row[self.klass].to_string();
        self.nall += 1;
        if self.nall > self.settings.warmup && self.classify(&row) == Some(want.as_str()) {
            self.correct += 1;
        }

        let i = match self.datas.iter().position(|(label, _)| *label == want) {
            Some(i) => i,
            None => {
                let fresh = Data {
                    rows: Vec::new(),
                    cols: self.template.fresh(),
                };
                self.datas.push((want, fresh));
                self.datas.len() - 1
            }
        };
        self.datas[i].1.add(row)
    }

    /// Fraction of all observed rows classified correctly
    pub fn accuracy(&self) -> f64 {
        if self.nall == 0 {
            0.0
        } else {
            self.correct as f64 / self.nall as f64
        }
    }

    /// Rows seen so far
    pub fn seen(&self) -> usize {
        self.nall
    }

    /// Class labels in order of first sighting
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.datas.iter().map(|(label, _)| label.as_str())
    }
}

/// Stream every row of `data` through a fresh classifier
pub fn evaluate(data: &Data, settings: &Settings) -> Result<NaiveBayes> {
    let mut nb = NaiveBayes::new(&data.cols, settings)?;
    for row in &data.rows {
        nb.observe(row.clone())?;
    }
    Ok(nb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Data {
        let rows: Vec<Vec<&str>> = [
            "sunny,85,false,no",
            "sunny,80,true,no",
            "overcast,83,false,yes",
            "rainy,70,false,yes",
            "rainy,68,false,yes",
            "rainy,65,true,no",
            "overcast,64,true,yes",
            "sunny,72,false,no",
            "sunny,69,false,yes",
            "rainy,75,false,yes",
            "sunny,75,true,yes",
            "overcast,72,true,yes",
            "overcast,81,false,yes",
            "rainy,71,true,no",
        ]
        .iter()
        .map(|line| line.split(',').collect())
        .collect();
        Data::from_text(&["outlook", "Temp", "windy", "play!"], &rows).unwrap()
    }

    #[test]
    fn test_needs_class_column() {
        let data = Data::new(vec!["Size".to_string(), "Y-".to_string()]).unwrap();
        let err = NaiveBayes::new(&data.cols, &Settings::default()).unwrap_err();
        assert_eq!(err, EzError::NoClassColumn);
    }

    #[test]
    fn test_learns_labels_in_order() {
        let nb = evaluate(&weather(), &Settings::default()).unwrap();
        assert_eq!(nb.seen(), 14);
        assert_eq!(nb.labels().collect::<Vec<_>>(), vec!["no", "yes"]);
        assert!((0.0..=1.0).contains(&nb.accuracy()));
    }

    #[test]
    fn test_warmup_rows_are_not_scored() {
        let settings = Settings {
            warmup: 100,
            ..Default::default()
        };
        let nb = evaluate(&weather(), &settings).unwrap();
        assert_eq!(nb.accuracy(), 0.0);
    }

    #[test]
    fn test_rejects_misshapen_row() {
        let data = weather();
        let mut nb = NaiveBayes::new(&data.cols, &Settings::default()).unwrap();
        let err = nb.observe(crate::pipeline::value::row(vec![Value::sym("sunny")]));
        assert!(matches!(err, Err(EzError::Arity { .. })));
        assert_eq!(nb.seen(), 0);
    }

    #[test]
    fn test_classify_before_training() {
        let data = weather();
        let nb = NaiveBayes::new(&data.cols, &Settings::default()).unwrap();
        assert_eq!(nb.classify(&data.rows[0]), None);
    }
}
