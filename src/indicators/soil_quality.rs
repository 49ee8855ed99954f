//! INDICATOR q_bi: SOIL QUALITY (BONITET)

use crate::utils::linear_normalize;

/// Bonitet ratings are scored on a 0-100 scale
pub const BONITET_MAX: f64 = 100.0;

/// q_bi = clamp(bonitet, 0, 100) / 100
pub fn soil_quality_indicator(bonitet_score: f64) -> f64 {
    linear_normalize(bonitet_score, 0.0, BONITET_MAX)
}
