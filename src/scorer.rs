//! Q_OTU Scorer - composite index and grid driver
//!
//! Q_OTU = clamp((k_vi·q_vi + k_si·q_si + k_bi·q_bi) × q_relief, 0, 1)
//!
//! The composite is a pure function of four indicators and the weights.
//! `GridScorer` applies it to every cell of a grid, either sequentially or
//! with Rayon. Cells are independent, so both paths give identical results
//! in input order.

use crate::data::CellRecord;
use crate::grid::BoundingBox;
use crate::payload::{build_cell_payload, missing_metrics, CellIndicators, MissingData};
use crate::utils::clamp_unit;
use crate::weights::IndexWeights;
use rayon::prelude::*;
use tracing::debug;

/// Composite Q_OTU score for one cell
///
/// Algorithm:
/// 1. Normalize weights (every call; input weights need not sum to 1)
/// 2. linear = k_vi·q_vi + k_si·q_si + k_bi·q_bi
/// 3. result = linear × q_relief
/// 4. Clamp to [0, 1]
///
/// Negative weights are not rejected here (see `validate_weights`). A NaN
/// result, only reachable through NaN inputs, is reported as 0.0.
pub fn compute_q_otu(
    q_vi: f64,
    q_si: f64,
    q_bi: f64,
    q_relief: f64,
    weights: &IndexWeights,
) -> f64 {
    let w = weights.normalized();
    let linear_part = w.k_vi * q_vi + w.k_si * q_si + w.k_bi * q_bi;
    let result = clamp_unit(linear_part * q_relief);
    if result.is_nan() {
        0.0
    } else {
        result
    }
}

/// Scored grid cell: the final index plus everything written alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCell {
    pub cell_id: String,
    pub bounds: Option<BoundingBox>,
    pub indicators: CellIndicators,
    pub q_otu: f64,
    /// Raw layers that were absent and defaulted
    pub missing_data: MissingData,
}

impl ScoredCell {
    pub fn has_missing_data(&self) -> bool {
        !self.missing_data.is_empty()
    }
}

/// Applies the composite index across grid cells
///
/// Holds only the (immutable) weights, so one scorer can be shared by any
/// number of workers.
#[derive(Debug, Clone, Default)]
pub struct GridScorer {
    weights: IndexWeights,
}

impl GridScorer {
    pub fn new(weights: IndexWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &IndexWeights {
        &self.weights
    }

    /// Score one cell: raw metrics → indicators → Q_OTU, with missing-layer list
    pub fn score_cell(&self, cell: &CellRecord) -> ScoredCell {
        let indicators = build_cell_payload(&cell.raw);
        let missing_data = missing_metrics(&cell.raw);

        let q_otu = compute_q_otu(
            indicators.ndvi,
            indicators.soil_strength,
            indicators.soil_quality,
            indicators.relief_factor,
            &self.weights,
        );

        ScoredCell {
            cell_id: cell.cell_id.clone(),
            bounds: cell.bounds,
            indicators,
            q_otu,
            missing_data,
        }
    }

    /// Score all cells sequentially
    pub fn score_cells(&self, cells: &[CellRecord]) -> Vec<ScoredCell> {
        debug!(cells = cells.len(), "Scoring cells sequentially");
        cells.iter().map(|cell| self.score_cell(cell)).collect()
    }

    /// Score all cells in parallel (Rayon), preserving input order
    pub fn score_cells_parallel(&self, cells: &[CellRecord]) -> Vec<ScoredCell> {
        debug!(
            cells = cells.len(),
            threads = rayon::current_num_threads(),
            "Scoring cells in parallel"
        );
        cells.par_iter().map(|cell| self.score_cell(cell)).collect()
    }
}
