//! Batch Pipeline
//!
//! load → (optional grid footprints) → weight check → score → GeoJSON → summary

use crate::config::BatchConfig;
use crate::data::{attach_grid_bounds, load_cells};
use crate::grid::generate_grid;
use crate::output::write_geojson;
use crate::run::{RunSummary, ScoringRun};
use crate::scorer::GridScorer;
use crate::weights::{validate_weights, IndexWeights};
use anyhow::{bail, Result};
use tracing::{info, warn};

/// Run one scoring batch end to end
pub fn run_batch(config: &BatchConfig) -> Result<RunSummary> {
    let weights = match &config.weights_path {
        Some(path) => IndexWeights::load(path)?,
        None => IndexWeights::default(),
    };

    let messages = validate_weights(&weights);
    for message in &messages {
        warn!(%message, "Weight configuration");
    }
    if config.strict_weights && !messages.is_empty() {
        bail!("Weight validation failed: {}", messages.join("; "));
    }

    let mut cells = load_cells(&config.input_path)?;

    if let Some(grid_spec) = &config.grid {
        let grid = generate_grid(&grid_spec.bbox, grid_spec.cell_size_deg)?;
        let attached = attach_grid_bounds(&mut cells, &grid);
        info!(grid_cells = grid.len(), attached, "Attached grid footprints");
    }

    let label = config.input_path.display().to_string();
    let mut run = ScoringRun::start(&label);

    let scorer = GridScorer::new(weights);
    let scored = if config.parallel {
        scorer.score_cells_parallel(&cells)
    } else {
        scorer.score_cells(&cells)
    };
    run.record_all(&scored);

    write_geojson(&config.output_path, &scored)?;

    let summary = run.finish();
    if let Some(path) = &config.summary_path {
        summary.write_json(path)?;
    }

    Ok(summary)
}
