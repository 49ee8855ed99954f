//! Utility modules for Q_OTU scoring
//!
//! Contains shared functionality used across multiple indicators:
//! - Normalization: clamping and linear rescaling onto [0, 1]

pub mod normalization;

pub use normalization::{clamp_unit, linear_normalize, linear_penalty};
