//! Pre-weighting applied to the signal before it is measured.
//!
//! The meter is generic over [`Weighting`], so the filter chain is resolved at
//! compile time and the per-sample path has no dynamic dispatch.

use cadenza_core::Real;

use crate::filters::{FirstOrderFilter, FirstOrderMode, OnePoleShelf, ShelfMode};

/// Per-channel filter chain consumed by the loudness meter.
pub trait Weighting<T: Real> {
    fn set_sample_rate(&mut self, sample_rate: f64);

    /// Resizes per-channel state. Called only from configuration paths.
    fn set_num_channels(&mut self, channels: usize);

    fn reset(&mut self);

    fn process_sample(&mut self, sample: T, channel: usize) -> T;

    /// Flushes denormal feedback state. Called once per processed block.
    fn snap_to_zero(&mut self);

    #[inline]
    fn process_block(&mut self, block: &mut [T], channel: usize) {
        for sample in block.iter_mut() {
            *sample = self.process_sample(*sample, channel);
        }
    }
}

/// Approximate perceptual weighting: a highpass removing sub-audible content,
/// followed by a gentle high shelf for the ear's presence-range sensitivity.
#[derive(Debug, Clone)]
pub struct LoudnessWeighting<T: Real> {
    highpass: FirstOrderFilter<T>,
    shelf: OnePoleShelf<T>,
}

impl<T: Real> LoudnessWeighting<T> {
    pub const HIGHPASS_HZ: f64 = 37.5;
    pub const SHELF_HZ: f64 = 1500.0;
    pub const SHELF_GAIN_DB: f64 = 4.0;

    pub fn new() -> Self {
        Self::custom(Self::HIGHPASS_HZ, Self::SHELF_HZ, Self::SHELF_GAIN_DB)
    }

    pub fn custom(highpass_hz: f64, shelf_hz: f64, shelf_gain_db: f64) -> Self {
        let mut highpass = FirstOrderFilter::new(FirstOrderMode::Highpass);
        highpass.set_cutoff_frequency(highpass_hz);

        let mut shelf = OnePoleShelf::new(ShelfMode::HighShelf);
        shelf.set_frequency(shelf_hz);
        shelf.set_gain_db(shelf_gain_db);

        Self { highpass, shelf }
    }

    pub fn highpass(&self) -> &FirstOrderFilter<T> {
        &self.highpass
    }

    pub fn shelf(&self) -> &OnePoleShelf<T> {
        &self.shelf
    }
}

impl<T: Real> Default for LoudnessWeighting<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> Weighting<T> for LoudnessWeighting<T> {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.highpass.set_sample_rate(sample_rate);
        self.shelf.set_sample_rate(sample_rate);
    }

    fn set_num_channels(&mut self, channels: usize) {
        self.highpass.set_num_channels(channels);
        self.shelf.set_num_channels(channels);
    }

    fn reset(&mut self) {
        self.highpass.reset();
        self.shelf.reset();
    }

    #[inline]
    fn process_sample(&mut self, sample: T, channel: usize) -> T {
        let filtered = self.highpass.process_sample(sample, channel);
        filtered + self.shelf.process_sample(filtered, channel)
    }

    fn snap_to_zero(&mut self) {
        self.highpass.snap_to_zero();
        self.shelf.snap_to_zero();
    }
}

/// Identity weighting: measures the raw signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unweighted;

impl<T: Real> Weighting<T> for Unweighted {
    fn set_sample_rate(&mut self, _sample_rate: f64) {}

    fn set_num_channels(&mut self, _channels: usize) {}

    fn reset(&mut self) {}

    #[inline]
    fn process_sample(&mut self, sample: T, _channel: usize) -> T {
        sample
    }

    fn snap_to_zero(&mut self) {}

    #[inline]
    fn process_block(&mut self, _block: &mut [T], _channel: usize) {}
}
