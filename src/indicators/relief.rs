//! INDICATOR q_relief: RELIEF FACTOR (SLOPE × WATER)
//!
//! Unlike the other three indicators, relief does not enter the weighted
//! sum. It multiplies the whole linear part, so a steep cell (slope ≥ 30°)
//! or a cell fully covered by surface water scores zero regardless of how
//! good its vegetation and soils are.
//!
//! Formula:
//!   slope_penalty = max(1 - slope_deg / 30, 0)
//!   water_penalty = max(1 - water_fraction, 0)
//!   q_relief      = clamp(slope_penalty × water_penalty, 0, 1)
//!
//! Neither penalty is capped at 1 on its own (negative slope or water input
//! can push one above 1); the final clamp bounds the product.

use crate::utils::{clamp_unit, linear_penalty};

/// Slope (degrees) at which the slope penalty reaches zero
pub const CRITICAL_SLOPE_DEG: f64 = 30.0;

/// Relief gating multiplier in [0, 1]
pub fn relief_indicator(slope_deg: f64, water_fraction: f64) -> f64 {
    let slope_penalty = linear_penalty(slope_deg, CRITICAL_SLOPE_DEG);
    let water_penalty = linear_penalty(water_fraction, 1.0);
    clamp_unit(slope_penalty * water_penalty)
}
