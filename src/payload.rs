//! Cell Payload Construction
//!
//! Turns one cell's raw measurements into [`CellIndicators`].
//!
//! Absent inputs never fail the cell. They are replaced by neutral defaults
//! (ndvi 0.5, soil_strength 1.0, soil_quality 0.5, relief_factor 1.0) and
//! reported through [`missing_metrics`] so the caller can attach a
//! `missing_data` list to the output record.

use crate::indicators::{
    relief_indicator, soil_quality_indicator, soil_strength_indicator, vegetation_indicator,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Neutral defaults for absent layers
pub const DEFAULT_NDVI: f64 = 0.5;
pub const DEFAULT_SOIL_STRENGTH: f64 = 1.0;
pub const DEFAULT_SOIL_QUALITY: f64 = 0.5;
pub const DEFAULT_RELIEF_FACTOR: f64 = 1.0;

/// Raw metric layers supplied per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Ndvi,
    Protodyakonov,
    Bonitet,
    SlopeDeg,
    WaterFraction,
}

impl MetricKey {
    /// All keys in output order
    pub const ALL: [MetricKey; 5] = [
        MetricKey::Ndvi,
        MetricKey::Protodyakonov,
        MetricKey::Bonitet,
        MetricKey::SlopeDeg,
        MetricKey::WaterFraction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Ndvi => "ndvi",
            MetricKey::Protodyakonov => "protodyakonov",
            MetricKey::Bonitet => "bonitet",
            MetricKey::SlopeDeg => "slope_deg",
            MetricKey::WaterFraction => "water_fraction",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown metric key: {}", s))
    }
}

/// List of layers that were defaulted for one cell (at most 5 entries)
pub type MissingData = SmallVec<[MetricKey; 5]>;

/// Per-cell raw measurements, keyed by layer
///
/// Non-finite values (raster nodata) are stored as given but read back as
/// absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetrics {
    values: FxHashMap<MetricKey, f64>,
}

impl RawMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: MetricKey, value: f64) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: MetricKey, value: f64) {
        self.values.insert(key, value);
    }

    /// Value for `key`, or `None` when absent or non-finite
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        self.values.get(&key).copied().filter(|v| v.is_finite())
    }

    pub fn is_empty(&self) -> bool {
        MetricKey::ALL.iter().all(|&key| self.get(key).is_none())
    }
}

impl FromIterator<(MetricKey, f64)> for RawMetrics {
    fn from_iter<I: IntoIterator<Item = (MetricKey, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Normalized indicators for a single cell, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellIndicators {
    pub ndvi: f64,
    pub soil_strength: f64,
    pub soil_quality: f64,
    pub relief_factor: f64,
}

impl Default for CellIndicators {
    /// Fully-defaulted "neutral" record
    fn default() -> Self {
        Self {
            ndvi: DEFAULT_NDVI,
            soil_strength: DEFAULT_SOIL_STRENGTH,
            soil_quality: DEFAULT_SOIL_QUALITY,
            relief_factor: DEFAULT_RELIEF_FACTOR,
        }
    }
}

/// Build normalized indicators from raw metrics, defaulting absent layers
///
/// Relief needs both slope and water. When only one is present the other
/// contributes a neutral penalty (slope 0°, water 0); when both are absent
/// the relief factor is the 1.0 default.
pub fn build_cell_payload(raw: &RawMetrics) -> CellIndicators {
    let ndvi = raw
        .get(MetricKey::Ndvi)
        .map_or(DEFAULT_NDVI, vegetation_indicator);
    let soil_strength = raw
        .get(MetricKey::Protodyakonov)
        .map_or(DEFAULT_SOIL_STRENGTH, soil_strength_indicator);
    let soil_quality = raw
        .get(MetricKey::Bonitet)
        .map_or(DEFAULT_SOIL_QUALITY, soil_quality_indicator);

    let relief_factor = match (raw.get(MetricKey::SlopeDeg), raw.get(MetricKey::WaterFraction)) {
        (None, None) => DEFAULT_RELIEF_FACTOR,
        (slope, water) => relief_indicator(slope.unwrap_or(0.0), water.unwrap_or(0.0)),
    };

    CellIndicators {
        ndvi,
        soil_strength,
        soil_quality,
        relief_factor,
    }
}

/// Layers that [`build_cell_payload`] had to default, in [`MetricKey::ALL`] order
pub fn missing_metrics(raw: &RawMetrics) -> MissingData {
    MetricKey::ALL
        .iter()
        .copied()
        .filter(|&key| raw.get(key).is_none())
        .collect()
}
