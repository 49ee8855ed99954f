//! Scoring Run Context
//!
//! Per-batch accounting passed explicitly through the pipeline: created
//! when the batch starts, fed every scored cell, finished into a
//! [`RunSummary`] when the batch ends. There is no global recorder.

use crate::payload::MetricKey;
use crate::scorer::ScoredCell;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Accumulates statistics for one batch
#[derive(Debug)]
pub struct ScoringRun {
    label: String,
    started_at: String,
    cells_scored: usize,
    cells_with_missing_data: usize,
    missing_by_metric: BTreeMap<MetricKey, usize>,
    q_sum: f64,
    q_min: f64,
    q_max: f64,
}

/// Final statistics of a finished batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub label: String,
    pub started_at: String,
    pub finished_at: String,
    pub cells_scored: usize,
    pub cells_with_missing_data: usize,
    pub missing_by_metric: BTreeMap<MetricKey, usize>,
    /// `None` when no cell was scored
    pub mean_q_otu: Option<f64>,
    pub min_q_otu: Option<f64>,
    pub max_q_otu: Option<f64>,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ScoringRun {
    pub fn start(label: &str) -> Self {
        info!(label, "Scoring run started");
        Self {
            label: label.to_string(),
            started_at: now_rfc3339(),
            cells_scored: 0,
            cells_with_missing_data: 0,
            missing_by_metric: BTreeMap::new(),
            q_sum: 0.0,
            q_min: f64::INFINITY,
            q_max: f64::NEG_INFINITY,
        }
    }

    pub fn record(&mut self, cell: &ScoredCell) {
        self.cells_scored += 1;
        if cell.has_missing_data() {
            self.cells_with_missing_data += 1;
        }
        for key in &cell.missing_data {
            *self.missing_by_metric.entry(*key).or_insert(0) += 1;
        }
        self.q_sum += cell.q_otu;
        self.q_min = self.q_min.min(cell.q_otu);
        self.q_max = self.q_max.max(cell.q_otu);
    }

    pub fn record_all<'a>(&mut self, cells: impl IntoIterator<Item = &'a ScoredCell>) {
        for cell in cells {
            self.record(cell);
        }
    }

    pub fn cells_scored(&self) -> usize {
        self.cells_scored
    }

    /// Close the run and log its summary
    pub fn finish(self) -> RunSummary {
        let scored = self.cells_scored > 0;
        let summary = RunSummary {
            label: self.label,
            started_at: self.started_at,
            finished_at: now_rfc3339(),
            cells_scored: self.cells_scored,
            cells_with_missing_data: self.cells_with_missing_data,
            missing_by_metric: self.missing_by_metric,
            mean_q_otu: scored.then(|| self.q_sum / self.cells_scored as f64),
            min_q_otu: scored.then_some(self.q_min),
            max_q_otu: scored.then_some(self.q_max),
        };

        info!(
            label = %summary.label,
            cells = summary.cells_scored,
            with_missing = summary.cells_with_missing_data,
            mean_q_otu = ?summary.mean_q_otu,
            "Scoring run finished"
        );

        summary
    }
}

impl RunSummary {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .with_context(|| "Failed to serialize run summary")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write run summary: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{CellIndicators, MissingData};
    use approx::assert_relative_eq;

    fn scored(q_otu: f64, missing: &[MetricKey]) -> ScoredCell {
        ScoredCell {
            cell_id: "c".to_string(),
            bounds: None,
            indicators: CellIndicators::default(),
            q_otu,
            missing_data: missing.iter().copied().collect::<MissingData>(),
        }
    }

    #[test]
    fn test_summary_statistics() {
        let mut run = ScoringRun::start("test");
        run.record_all(&[
            scored(0.2, &[]),
            scored(0.6, &[MetricKey::Ndvi]),
            scored(0.4, &[MetricKey::Ndvi, MetricKey::Bonitet]),
        ]);
        assert_eq!(run.cells_scored(), 3);

        let summary = run.finish();
        assert_eq!(summary.cells_with_missing_data, 2);
        assert_eq!(summary.missing_by_metric[&MetricKey::Ndvi], 2);
        assert_eq!(summary.missing_by_metric[&MetricKey::Bonitet], 1);
        assert_relative_eq!(summary.mean_q_otu.unwrap(), 0.4, epsilon = 1e-12);
        assert_eq!(summary.min_q_otu, Some(0.2));
        assert_eq!(summary.max_q_otu, Some(0.6));
    }

    #[test]
    fn test_empty_run() {
        let summary = ScoringRun::start("empty").finish();
        assert_eq!(summary.cells_scored, 0);
        assert_eq!(summary.mean_q_otu, None);
        assert!(summary.missing_by_metric.is_empty());
    }

    #[test]
    fn test_summary_json_uses_metric_names() {
        let mut run = ScoringRun::start("json");
        run.record(&scored(0.5, &[MetricKey::WaterFraction]));
        let value = serde_json::to_value(run.finish()).unwrap();
        assert_eq!(value["missing_by_metric"]["water_fraction"], 1);
    }
}
