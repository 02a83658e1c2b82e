//! Tolerance constants for meter testing.
//!
//! Different measurements require different precision levels.

/// Floating point rounding errors (exact sums, unity gain).
/// Use for operations that should be mathematically exact.
pub const FLOAT_EPSILON: f64 = 1e-9;

/// f32 accumulation over a full window of weighted samples.
pub const F32_EPSILON: f32 = 1e-3;

/// Weighted measurements: filter transients and shelf ripple.
pub const DSP_EPSILON: f64 = 1e-3;

/// Level comparisons in decibels.
pub const DB_EPSILON: f64 = 0.01;
