//! Indicator modules for Q_OTU scoring
//!
//! Each indicator converts one raw physical measurement into [0, 1].
//! None of them fail: out-of-range input is clamped.

pub mod vegetation;
pub mod soil_strength;
pub mod soil_quality;
pub mod relief;

pub use vegetation::vegetation_indicator;
pub use soil_strength::soil_strength_indicator;
pub use soil_quality::soil_quality_indicator;
pub use relief::relief_indicator;
