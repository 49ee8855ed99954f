//! INDICATOR q_vi: VEGETATION (NDVI)
//!
//! NDVI lives in [-1, 1]; the indicator shifts and halves it onto [0, 1].
//! Input is not range-checked, values beyond the nominal range are clamped.

use crate::utils::clamp_unit;

/// Nominal NDVI range
pub const NDVI_MIN: f64 = -1.0;
pub const NDVI_MAX: f64 = 1.0;

/// q_vi = clamp((ndvi + 1) / 2, 0, 1)
pub fn vegetation_indicator(ndvi: f64) -> f64 {
    clamp_unit((ndvi - NDVI_MIN) / (NDVI_MAX - NDVI_MIN))
}
