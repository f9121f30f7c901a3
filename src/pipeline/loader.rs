//! Dataset loader for CSV and Parquet files
//!
//! Every cell is read as text and typed by the header afterwards, so a
//! column's type comes from its name and never from polars' inference.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::data::Data;
use super::value::{row, MISSING};

/// Read a file (CSV or Parquet based on extension) with every column as text
pub fn load_frame(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Load a dataset, typing each cell by its column's header name
pub fn load_data(path: &Path) -> Result<Data> {
    let df = load_frame(path)?;
    frame_to_data(&df).with_context(|| format!("Failed to load {}", path.display()))
}

/// Convert a frame into a dataset. Nulls become missing values.
pub fn frame_to_data(df: &DataFrame) -> Result<Data> {
    let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    let text: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|col| col.cast(&DataType::String))
        .collect::<PolarsResult<_>>()?;
    let cells: Vec<&StringChunked> = text
        .iter()
        .map(|col| col.str())
        .collect::<PolarsResult<_>>()?;

    let mut data = Data::new(names)?;
    for i in 0..df.height() {
        let raw: Vec<&str> = cells.iter().map(|ca| ca.get(i).unwrap_or(MISSING)).collect();
        let values = data
            .cols
            .coerce(&raw)
            .with_context(|| format!("Bad value in data row {}", i + 1))?;
        data.add(row(values))?;
    }

    log::info!(
        "loaded {} rows x {} columns ({} x, {} y)",
        data.rows.len(),
        data.cols.all.len(),
        data.cols.x.len(),
        data.cols.y.len()
    );
    Ok(data)
}
