//! INDICATOR q_si: SOIL STRENGTH (PROTODYAKONOV SCALE)
//!
//! The Protodyakonov strength coefficient runs from ~0.3 (loose soils) to
//! 20 (the strongest rock). The input is clamped to that physical range
//! first and then mapped linearly, so the output is always in [0, 1].

use crate::utils::linear_normalize;

/// Weakest value on the Protodyakonov scale
pub const PROTODYAKONOV_MIN: f64 = 0.3;
/// Strongest value on the Protodyakonov scale
pub const PROTODYAKONOV_MAX: f64 = 20.0;

/// q_si = (clamp(f, 0.3, 20) - 0.3) / (20 - 0.3)
pub fn soil_strength_indicator(protodyakonov_value: f64) -> f64 {
    linear_normalize(protodyakonov_value, PROTODYAKONOV_MIN, PROTODYAKONOV_MAX)
}
