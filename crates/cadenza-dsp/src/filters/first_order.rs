//! First-order (one-pole) filter with lowpass/highpass outputs.

use cadenza_core::{snap_to_zero, Real};

use super::{check_channel, DEFAULT_SAMPLE_RATE, MAX_CUTOFF_HZ};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstOrderMode {
    #[default]
    Lowpass,
    Highpass,
}

/// Topology-preserving one-pole filter with independent state per channel.
///
/// Both outputs come from the same integrator, so
/// [`process_crossover`](FirstOrderFilter::process_crossover) yields a
/// lowpass/highpass pair that sums back to the input.
#[derive(Debug, Clone)]
pub struct FirstOrderFilter<T: Real> {
    mode: FirstOrderMode,
    sample_rate: f64,
    requested_cutoff: f64,
    cutoff: f64,
    max_frequency: f64,
    g: T,
    state: Vec<T>,
}

impl<T: Real> FirstOrderFilter<T> {
    pub fn new(mode: FirstOrderMode) -> Self {
        let mut filter = Self {
            mode,
            sample_rate: DEFAULT_SAMPLE_RATE,
            requested_cutoff: 500.0,
            cutoff: 500.0,
            max_frequency: MAX_CUTOFF_HZ,
            g: T::ZERO,
            state: vec![T::ZERO; 1],
        };
        filter.update_coefficients();
        filter
    }

    pub fn lowpass(cutoff_hz: f64) -> Self {
        let mut filter = Self::new(FirstOrderMode::Lowpass);
        filter.set_cutoff_frequency(cutoff_hz);
        filter
    }

    pub fn highpass(cutoff_hz: f64) -> Self {
        let mut filter = Self::new(FirstOrderMode::Highpass);
        filter.set_cutoff_frequency(cutoff_hz);
        filter
    }

    pub fn mode(&self) -> FirstOrderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: FirstOrderMode) {
        self.mode = mode;
    }

    pub fn num_channels(&self) -> usize {
        self.state.len()
    }

    /// Resizes per-channel state and clears it.
    pub fn set_num_channels(&mut self, channels: usize) {
        self.state.resize(channels.max(1), T::ZERO);
        self.reset();
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.max_frequency = (sample_rate * 0.5).min(MAX_CUTOFF_HZ);
        self.cutoff = self.requested_cutoff.min(self.max_frequency);
        self.update_coefficients();
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Clamped to `min(sample_rate / 2, 20 kHz)`. The requested value is kept and
    /// re-applied when the sample rate changes.
    pub fn set_cutoff_frequency(&mut self, frequency: f64) {
        self.requested_cutoff = frequency;
        self.cutoff = frequency.min(self.max_frequency);
        self.update_coefficients();
    }

    fn update_coefficients(&mut self) {
        let w = (self.cutoff / self.sample_rate * core::f64::consts::PI).tan();
        self.g = T::from_f64(w / (w + 1.0));
    }

    #[inline]
    fn tick(&mut self, input: T, channel: usize) -> T {
        check_channel(channel, self.state.len());
        let s = self.state[channel];
        let v = (input - s) * self.g;
        let lowpass = s + v;
        self.state[channel] = lowpass + v;
        lowpass
    }

    #[inline]
    pub fn process_sample(&mut self, input: T, channel: usize) -> T {
        let lowpass = self.tick(input, channel);
        match self.mode {
            FirstOrderMode::Lowpass => lowpass,
            FirstOrderMode::Highpass => input - lowpass,
        }
    }

    /// Returns `(lowpass, highpass)` for one input sample.
    #[inline]
    pub fn process_crossover(&mut self, input: T, channel: usize) -> (T, T) {
        let lowpass = self.tick(input, channel);
        (lowpass, input - lowpass)
    }

    pub fn reset(&mut self) {
        self.state.fill(T::ZERO);
    }

    pub fn snap_to_zero(&mut self) {
        snap_to_zero(&mut self.state);
    }
}
