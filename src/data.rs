//! Raw Metric Loading
//!
//! Loads per-cell raw measurements (one row per grid cell) from CSV or
//! Parquet using Polars.
//!
//! Expected columns:
//!   - `cell_id` (required; any type, read as string)
//!   - `ndvi`, `protodyakonov`, `bonitet`, `slope_deg`, `water_fraction`
//!     (each optional; nulls and non-finite values become absent metrics)
//!   - `min_lon`, `min_lat`, `max_lon`, `max_lat` (optional cell bounds)
//!
//! Unknown columns are ignored.

use crate::grid::{BoundingBox, GridCell};
use crate::payload::{MetricKey, RawMetrics};
use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const CELL_ID_COL: &str = "cell_id";
pub const BOUNDS_COLS: [&str; 4] = ["min_lon", "min_lat", "max_lon", "max_lat"];

/// Structural problems with the raw metric table
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// One input row: cell identity, optional footprint and raw layers
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    pub cell_id: String,
    pub bounds: Option<BoundingBox>,
    pub raw: RawMetrics,
}

/// Load cell records from a `.csv` or `.parquet` file
pub fn load_cells(path: &Path) -> Result<Vec<CellRecord>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let df = match extension.as_str() {
        "csv" => load_csv(path)?,
        "parquet" => load_parquet(path)?,
        other => return Err(InputError::UnsupportedFormat(other.to_string()).into()),
    };

    let records = records_from_frame(&df)
        .with_context(|| format!("Failed to read cell records from {:?}", path))?;

    info!(path = ?path, cells = records.len(), "Loaded raw metrics");
    Ok(records)
}

fn load_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {:?}", path))
}

fn load_parquet(path: &Path) -> Result<DataFrame> {
    LazyFrame::scan_parquet(path, Default::default())
        .with_context(|| format!("Failed to scan parquet: {:?}", path))?
        .collect()
        .with_context(|| format!("Failed to load parquet: {:?}", path))
}

/// Read a column as Float64 if it exists
fn float_column(df: &DataFrame, name: &str) -> Result<Option<Float64Chunked>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };

    let cast = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;
    let values = cast
        .f64()
        .with_context(|| format!("Column '{}' is not Float64 after cast", name))?
        .clone();

    Ok(Some(values))
}

/// Convert a DataFrame into cell records
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<CellRecord>> {
    let ids = df
        .column(CELL_ID_COL)
        .map_err(|_| InputError::MissingColumn(CELL_ID_COL.to_string()))?
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as string", CELL_ID_COL))?;
    let ids = ids.str()?;

    let mut metric_cols: Vec<(MetricKey, Float64Chunked)> = Vec::new();
    for key in MetricKey::ALL {
        match float_column(df, key.as_str())? {
            Some(values) => metric_cols.push((key, values)),
            None => warn!(column = key.as_str(), "Metric column absent, every cell will default it"),
        }
    }

    let bounds_cols = BOUNDS_COLS
        .iter()
        .map(|name| float_column(df, name))
        .collect::<Result<Option<Vec<_>>>>()?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let Some(cell_id) = ids.get(idx) else {
            warn!(row = idx, "Skipping row without cell_id");
            continue;
        };

        let raw: RawMetrics = metric_cols
            .iter()
            .filter_map(|(key, values)| values.get(idx).map(|v| (*key, v)))
            .collect();

        let bounds = bounds_cols.as_ref().and_then(|cols| {
            let b = BoundingBox::new(
                cols[0].get(idx)?,
                cols[1].get(idx)?,
                cols[2].get(idx)?,
                cols[3].get(idx)?,
            );
            b.is_valid().then_some(b)
        });

        records.push(CellRecord {
            cell_id: cell_id.to_string(),
            bounds,
            raw,
        });
    }

    Ok(records)
}

/// Fill missing bounds from a generated grid, matching on cell id
///
/// Returns the number of records that received bounds.
pub fn attach_grid_bounds(records: &mut [CellRecord], grid: &[GridCell]) -> usize {
    let by_id: FxHashMap<&str, BoundingBox> = grid
        .iter()
        .map(|cell| (cell.id.as_str(), cell.bounds))
        .collect();

    let mut attached = 0;
    for record in records.iter_mut().filter(|r| r.bounds.is_none()) {
        if let Some(bounds) = by_id.get(record.cell_id.as_str()) {
            record.bounds = Some(*bounds);
            attached += 1;
        }
    }

    attached
}
