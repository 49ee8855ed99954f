//! Batch Configuration
//!
//! Read from environment variables by the `score_grid` binary:
//!
//! | Variable         | Default               | Meaning                                     |
//! |------------------|-----------------------|---------------------------------------------|
//! | `INPUT_PATH`     | (required)            | Raw metric table (.csv / .parquet)          |
//! | `OUTPUT_PATH`    | `q_otu_grid.geojson`  | Scored GeoJSON                              |
//! | `WEIGHTS_PATH`   | (none → defaults)     | Weights JSON                                |
//! | `SUMMARY_PATH`   | (none)                | Run summary JSON                            |
//! | `PARALLEL`       | `true`                | Score with Rayon                            |
//! | `STRICT_WEIGHTS` | `false`               | Abort on weight validation messages         |
//! | `GRID_BBOX`      | (none)                | `min_lon,min_lat,max_lon,max_lat`           |
//! | `GRID_CELL_SIZE` | (none)                | Cell size in degrees, used with `GRID_BBOX` |

use crate::grid::BoundingBox;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_PATH: &str = "q_otu_grid.geojson";

/// Grid used to fill in cell footprints missing from the input table
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub bbox: BoundingBox,
    pub cell_size_deg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub weights_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
    pub parallel: bool,
    pub strict_weights: bool,
    pub grid: Option<GridSpec>,
}

impl BatchConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            weights_path: None,
            summary_path: None,
            parallel: true,
            strict_weights: false,
            grid: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value lookup (environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_path = lookup("INPUT_PATH").context("INPUT_PATH is not set")?;
        let output_path = lookup("OUTPUT_PATH").unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        let mut config = Self::new(input_path, output_path);
        config.weights_path = lookup("WEIGHTS_PATH").map(PathBuf::from);
        config.summary_path = lookup("SUMMARY_PATH").map(PathBuf::from);

        if let Some(value) = lookup("PARALLEL") {
            config.parallel = parse_bool("PARALLEL", &value)?;
        }
        if let Some(value) = lookup("STRICT_WEIGHTS") {
            config.strict_weights = parse_bool("STRICT_WEIGHTS", &value)?;
        }

        config.grid = match (lookup("GRID_BBOX"), lookup("GRID_CELL_SIZE")) {
            (Some(bbox), Some(size)) => Some(GridSpec {
                bbox: parse_bbox(&bbox)?,
                cell_size_deg: size
                    .trim()
                    .parse()
                    .with_context(|| format!("GRID_CELL_SIZE is not a number: {}", size))?,
            }),
            (None, None) => None,
            _ => bail!("GRID_BBOX and GRID_CELL_SIZE must be set together"),
        };

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got '{}'", key, other),
    }
}

fn parse_bbox(value: &str) -> Result<BoundingBox> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("GRID_BBOX is not a list of numbers: {}", value))?;

    match parts.as_slice() {
        [min_lon, min_lat, max_lon, max_lat] => {
            Ok(BoundingBox::new(*min_lon, *min_lat, *max_lon, *max_lat))
        }
        _ => bail!("GRID_BBOX needs 4 values, got {}", parts.len()),
    }
}
