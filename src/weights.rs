//! Index Weights
//!
//! Weights for the three additive Q_OTU components (vegetation, soil
//! strength, soil quality). Weights are loaded once per batch and shared
//! read-only across every cell.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tolerance for the "weights sum to 1.0" check
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights for q_vi, q_si and q_bi
///
/// Not required to be normalized; [`IndexWeights::normalized`] is applied
/// on every scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexWeights {
    pub k_vi: f64,
    pub k_si: f64,
    pub k_bi: f64,
}

impl Default for IndexWeights {
    fn default() -> Self {
        Self {
            k_vi: 0.35,
            k_si: 0.35,
            k_bi: 0.30,
        }
    }
}

impl IndexWeights {
    pub fn new(k_vi: f64, k_si: f64, k_bi: f64) -> Self {
        Self { k_vi, k_si, k_bi }
    }

    /// Load weights from a JSON file
    ///
    /// Fields absent from the file keep their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read weights file: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse weights JSON: {:?}", path))
    }

    pub fn sum(&self) -> f64 {
        self.k_vi + self.k_si + self.k_bi
    }

    /// Weights rescaled to sum to 1.0
    ///
    /// An exactly-zero sum falls back to the equal split (1/3, 1/3, 1/3).
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum == 0.0 {
            let third = 1.0 / 3.0;
            return Self::new(third, third, third);
        }
        Self::new(self.k_vi / sum, self.k_si / sum, self.k_bi / sum)
    }

    fn named(&self) -> [(&'static str, f64); 3] {
        [("k_vi", self.k_vi), ("k_si", self.k_si), ("k_bi", self.k_bi)]
    }
}

/// Advisory validation of a weight configuration
///
/// Returns human-readable messages; an empty list means the weights are
/// fine. Scoring never calls this: it is meant for a configuration check
/// before a batch starts, and the caller decides whether any message is
/// fatal.
pub fn validate_weights(weights: &IndexWeights) -> Vec<String> {
    let mut messages = Vec::new();

    for (name, value) in weights.named() {
        if !value.is_finite() {
            messages.push(format!("weight '{}' is not finite", name));
        } else if value < 0.0 {
            messages.push(format!("weight '{}' is negative", name));
        }
    }

    let sum = weights.sum();
    if !((sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE) {
        messages.push(format!("weights do not sum to 1.0 (sum = {:.6})", sum));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_weights_are_valid() {
        let w = IndexWeights::default();
        assert_relative_eq!(w.sum(), 1.0, epsilon = WEIGHT_SUM_TOLERANCE);
        assert!(validate_weights(&w).is_empty());
    }

    #[test]
    fn test_normalized_equal_weights() {
        let n = IndexWeights::new(0.1, 0.1, 0.1).normalized();
        assert_relative_eq!(n.k_vi, 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(n.k_si, 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(n.k_bi, 1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_sum_falls_back_to_equal_split() {
        let n = IndexWeights::new(0.0, 0.0, 0.0).normalized();
        assert_eq!(n, IndexWeights::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0));
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let n = IndexWeights::new(2.0, 5.0, 3.0).normalized();
        assert_relative_eq!(n.sum(), 1.0, epsilon = WEIGHT_SUM_TOLERANCE);
        assert_relative_eq!(n.k_si, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_validation_messages() {
        let messages = validate_weights(&IndexWeights::new(0.9, -0.2, 0.3));
        assert!(messages.contains(&"weight 'k_si' is negative".to_string()));
        assert!(messages.iter().all(|m| !m.starts_with("weights do not sum")));

        let messages = validate_weights(&IndexWeights::new(1.0, 1.0, 1.0));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("weights do not sum to 1.0"));

        let messages = validate_weights(&IndexWeights::new(f64::NAN, 0.5, 0.5));
        assert!(messages.contains(&"weight 'k_vi' is not finite".to_string()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let w: IndexWeights = serde_json::from_str(r#"{ "k_vi": 0.5 }"#).unwrap();
        assert_eq!(w.k_vi, 0.5);
        assert_eq!(w.k_si, 0.35);
        assert_eq!(w.k_bi, 0.30);
    }
}
