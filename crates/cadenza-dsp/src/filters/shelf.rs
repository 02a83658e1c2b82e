//! One-pole shelving EQ band.
//!
//! [`OnePoleShelf::process_sample`] returns only the shelf *band*; add it to the
//! dry signal to apply the EQ:
//!
//! ```
//! use cadenza_dsp::{OnePoleShelf, ShelfMode};
//!
//! let mut shelf = OnePoleShelf::<f32>::new(ShelfMode::HighShelf);
//! shelf.set_sample_rate(48000.0);
//! shelf.set_frequency(1500.0);
//! shelf.set_gain_db(4.0);
//!
//! let input = 0.25;
//! let output = input + shelf.process_sample(input, 0);
//! # assert!(output.is_finite());
//! ```
//!
//! Keeping the band separate lets callers shape it before mixing, e.g.
//! `input + band.tanh()`.

use cadenza_core::{snap_to_zero, Real};

use super::{check_channel, DEFAULT_SAMPLE_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShelfMode {
    LowShelf,
    #[default]
    HighShelf,
}

#[derive(Debug, Clone)]
pub struct OnePoleShelf<T: Real> {
    mode: ShelfMode,
    prepared: bool,
    sample_rate: f64,
    frequency: f64,
    gain_db: f64,

    boost: T,
    w: T,
    inv_a0: T,
    a1: T,

    state: Vec<T>,
}

impl<T: Real> OnePoleShelf<T> {
    pub fn new(mode: ShelfMode) -> Self {
        Self {
            mode,
            prepared: false,
            sample_rate: DEFAULT_SAMPLE_RATE,
            frequency: 500.0,
            gain_db: 0.0,
            boost: T::ZERO,
            w: T::ZERO,
            inv_a0: T::ZERO,
            a1: T::ZERO,
            state: vec![T::ZERO; 1],
        }
    }

    pub fn mode(&self) -> ShelfMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ShelfMode) {
        self.mode = mode;
        self.update();
    }

    pub fn num_channels(&self) -> usize {
        self.state.len()
    }

    pub fn set_num_channels(&mut self, channels: usize) {
        self.state.resize(channels.max(1), T::ZERO);
        self.reset();
    }

    /// The band is silent until a sample rate has been set.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.prepared = true;
        self.update();
        self.reset();
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
        self.update();
    }

    pub fn gain_db(&self) -> f64 {
        self.gain_db
    }

    pub fn set_gain_db(&mut self, gain_db: f64) {
        self.gain_db = gain_db;
        self.update();
    }

    fn update(&mut self) {
        if !self.prepared {
            return;
        }

        // Square root of the linear gain: the corner moves by half the boost
        let half_gain = 10.0f64.powf(self.gain_db / 40.0);
        let nyquist = self.sample_rate * 0.5;
        let corner = match self.mode {
            ShelfMode::LowShelf => (self.frequency / half_gain).min(nyquist),
            ShelfMode::HighShelf => (self.frequency * half_gain).min(nyquist),
        };

        let w = (corner * core::f64::consts::PI / self.sample_rate).tan();

        self.boost = T::from_f64(half_gain * half_gain - 1.0);
        self.w = T::from_f64(w);
        self.inv_a0 = T::from_f64(1.0 / (1.0 + w));
        self.a1 = T::from_f64(w - 1.0);
    }

    /// Returns the shelf band for `input`; the EQ'd signal is `input + band`.
    #[inline]
    pub fn process_sample(&mut self, input: T, channel: usize) -> T {
        check_channel(channel, self.state.len());

        if !self.prepared {
            return T::ZERO;
        }

        let y = self.state[channel];
        let x = (input - y * self.a1) * self.inv_a0;
        self.state[channel] = x;

        match self.mode {
            ShelfMode::LowShelf => (x + y) * self.w * self.boost,
            ShelfMode::HighShelf => (x - y) * self.boost,
        }
    }

    pub fn reset(&mut self) {
        self.state.fill(T::ZERO);
    }

    pub fn snap_to_zero(&mut self) {
        snap_to_zero(&mut self.state);
    }
}
