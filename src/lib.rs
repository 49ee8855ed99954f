//! Q_OTU Scorer
//!
//! Composite ecological-resilience index for grid cells of a rocket
//! drop-zone study area.
//!
//! Module layout:
//! - `utils/`: Clamping and linear normalization helpers
//! - `indicators/`: The four indicator normalizers (q_vi, q_si, q_bi, q_relief)
//! - `payload`: Raw metrics → indicators with neutral defaults and missing-layer list
//! - `weights`: Index weights, normalization and advisory validation
//! - `scorer`: Q_OTU composite and the grid driver (sequential + Rayon)
//! - `grid`, `data`, `output`: Grid generation, raw metric loading (Polars), GeoJSON
//! - `run`, `config`, `batch`: Per-run accounting, env configuration, end-to-end batch

pub mod utils;
pub mod indicators;
pub mod payload;
pub mod weights;
pub mod scorer;
pub mod grid;
pub mod data;
pub mod output;
pub mod run;
pub mod config;
pub mod batch;

// Re-export commonly used types
pub use indicators::*;
pub use payload::{build_cell_payload, missing_metrics, CellIndicators, MetricKey, MissingData, RawMetrics};
pub use weights::{validate_weights, IndexWeights};
pub use scorer::{compute_q_otu, GridScorer, ScoredCell};
pub use grid::{generate_grid, BoundingBox, GridCell, GridError, MAX_GRID_CELLS};
pub use data::{attach_grid_bounds, load_cells, CellRecord, InputError};
pub use output::{to_feature_collection, write_geojson};
pub use run::{RunSummary, ScoringRun};
pub use config::BatchConfig;
pub use batch::run_batch;
