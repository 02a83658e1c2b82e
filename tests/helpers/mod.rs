//! Test helpers and fixtures for cadenza integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-9): Exact sums in f64
//! - `F32_EPSILON` (1e-3): Window-length accumulation in f32
//! - `DSP_EPSILON` (1e-3): Weighted measurements
//! - `DB_EPSILON` (0.01): Decibel comparisons

#![allow(dead_code)]

pub mod tolerances;

use cadenza::prelude::*;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Standard buffer size for deterministic testing
pub const TEST_BUFFER_SIZE: usize = 480;

/// Installs a test-writer subscriber so reconfiguration logs show up under `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Unweighted meter at the test sample rate with the given timing.
pub fn test_meter(channels: usize, window_seconds: f64, update_seconds: f64) -> LoudnessMeter<f64, Unweighted> {
    let config = MeterConfig::default()
        .window_seconds(window_seconds)
        .update_seconds(update_seconds);

    let mut meter = LoudnessMeter::<f64, Unweighted>::with_config(config).expect("valid config");
    meter.set_sample_rate(TEST_SAMPLE_RATE).expect("valid sample rate");
    meter
        .set_buffer_size(TEST_BUFFER_SIZE, channels)
        .expect("valid buffer size");
    meter
}

/// Feeds `signal` to a mono meter in `TEST_BUFFER_SIZE` blocks.
pub fn feed_mono<T: Real, W: Weighting<T>>(meter: &mut LoudnessMeter<T, W>, signal: &[T]) {
    for block in signal.chunks(TEST_BUFFER_SIZE) {
        meter.process_mono(block).expect("configured meter");
    }
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, amplitude: f64, sample_rate: f64, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Generate a constant (DC) signal.
pub fn generate_dc(value: f64, num_samples: usize) -> Vec<f64> {
    vec![value; num_samples]
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f64> {
    vec![0.0; num_samples]
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f64> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 32) as u32 as f64 / u32::MAX as f64) * 2.0 - 1.0
        })
        .collect()
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f64]) -> f64 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f64, |a, b| a.max(b))
}
