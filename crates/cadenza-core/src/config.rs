//! Meter configuration and validation helpers.

use crate::{Error, Result};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Timing and policy configuration for a loudness meter.
///
/// # Example
///
/// ```
/// use cadenza_core::MeterConfig;
///
/// let config = MeterConfig::default()
///     .window_seconds(1.0)
///     .update_seconds(0.05)
///     .reset_from_zero(false);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct MeterConfig {
    /// Measurement window length.
    pub window_seconds: f64,
    /// Interval between fresh estimates.
    pub update_seconds: f64,
    /// Skip near-silent blocks entirely.
    pub pause_on_silence: bool,
    /// Report zero until the first full window instead of a provisional estimate.
    pub reset_from_zero: bool,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            window_seconds: 3.0,
            update_seconds: 0.1,
            pause_on_silence: true,
            reset_from_zero: true,
        }
    }
}

impl MeterConfig {
    pub fn window_seconds(mut self, seconds: f64) -> Self {
        self.window_seconds = seconds;
        self
    }

    pub fn update_seconds(mut self, seconds: f64) -> Self {
        self.update_seconds = seconds;
        self
    }

    pub fn pause_on_silence(mut self, pause: bool) -> Self {
        self.pause_on_silence = pause;
        self
    }

    pub fn reset_from_zero(mut self, reset: bool) -> Self {
        self.reset_from_zero = reset;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_duration(self.window_seconds)?;
        validate_duration(self.update_seconds)?;
        Ok(())
    }
}

/// Accepts positive, finite sample rates.
pub fn validate_sample_rate(sample_rate: f64) -> Result<f64> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(Error::InvalidSampleRate(sample_rate))
    }
}

/// Accepts positive, finite durations in seconds.
pub fn validate_duration(seconds: f64) -> Result<f64> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(Error::InvalidDuration(seconds))
    }
}

/// Accepts a duration whose sample count at `sample_rate` fits the signed
/// counters used by the accumulator bank.
pub fn validate_duration_at(seconds: f64, sample_rate: f64) -> Result<f64> {
    validate_duration(seconds)?;
    if (seconds * sample_rate).round() >= MAX_DURATION_SAMPLES {
        return Err(Error::InvalidDuration(seconds));
    }
    Ok(seconds)
}

/// Upper bound (exclusive) on a duration expressed in samples.
const MAX_DURATION_SAMPLES: f64 = i64::MAX as f64;

/// Converts seconds to a whole number of samples, rounding to nearest.
#[inline]
pub fn seconds_to_samples(seconds: f64, sample_rate: f64) -> usize {
    (seconds * sample_rate).round().max(0.0) as usize
}
