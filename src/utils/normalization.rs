//! Normalization Utilities
//!
//! Shared clamping and linear rescaling used by every indicator.
//! All helpers clamp out-of-range input instead of failing, so a batch over
//! thousands of heterogeneous cells never aborts on a single bad pixel.

/// Clamp a value into the closed unit interval [0, 1]
///
/// NaN propagates unchanged (same as `f64::clamp`); callers that need a
/// guaranteed finite result handle it themselves.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Clamp to [min, max], then map linearly onto [0, 1]
///
/// Algorithm:
/// 1. clamped = clamp(value, min, max)
/// 2. normalized = (clamped - min) / (max - min)
///
/// A degenerate range (max <= min) returns 0.0 rather than dividing by zero.
pub fn linear_normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return 0.0;
    }
    let clamped = value.clamp(min, max);
    clamp_unit((clamped - min) / span)
}

/// Penalty that falls linearly from 1 at `value = 0` to 0 at `value = limit`
///
/// Floored at 0 but NOT capped at 1: negative input yields a penalty above 1,
/// which the caller caps after combining penalties.
#[inline]
pub fn linear_penalty(value: f64, limit: f64) -> f64 {
    (1.0 - value / limit).max(0.0)
}
