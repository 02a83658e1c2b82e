//! Smoothed values for zipper-free parameter changes and meter display.
//!
//! - [`LinearSmoother`]: fixed-duration linear ramp toward a target.
//! - [`GlideSmoother`]: exponential glide, fast at first and settling gently.
//! - [`OnePoleSmoother`]: one exponential step per call, independent of sample rate.
//!
//! # Example
//!
//! ```
//! use cadenza_core::LinearSmoother;
//!
//! // 10ms ramp at 44.1kHz
//! let mut gain = LinearSmoother::new(1.0f32, 0.010, 44100.0);
//! gain.set_target(0.5);
//!
//! # let mut buffer = [0.0f32; 512];
//! for sample in buffer.iter_mut() {
//!     *sample *= gain.next_value();
//! }
//! ```

use crate::Real;

/// Linear ramp toward a target over a configurable time.
///
/// Call [`next_value()`](LinearSmoother::next_value) once per sample.
#[derive(Debug, Clone)]
pub struct LinearSmoother<T: Real> {
    current: T,
    target: T,
    step: T,
    samples_remaining: u32,
    smooth_samples: u32,
    smooth_time_secs: f64,
    sample_rate: f64,
}

impl<T: Real> LinearSmoother<T> {
    pub fn new(initial: T, smooth_time_secs: f64, sample_rate: f64) -> Self {
        Self {
            current: initial,
            target: initial,
            step: T::ZERO,
            samples_remaining: 0,
            smooth_samples: Self::ramp_length(smooth_time_secs, sample_rate),
            smooth_time_secs,
            sample_rate,
        }
    }

    pub fn immediate(initial: T) -> Self {
        Self::new(initial, 0.0, 1.0)
    }

    fn ramp_length(smooth_time_secs: f64, sample_rate: f64) -> u32 {
        (smooth_time_secs * sample_rate).max(1.0) as u32
    }

    /// Takes effect on the next `set_target()` call.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.smooth_samples = Self::ramp_length(self.smooth_time_secs, sample_rate);
    }

    /// Takes effect on the next `set_target()` call.
    pub fn set_smooth_time(&mut self, smooth_time_secs: f64) {
        self.smooth_time_secs = smooth_time_secs;
        self.smooth_samples = Self::ramp_length(smooth_time_secs, self.sample_rate);
    }

    #[inline]
    pub fn set_target(&mut self, target: T) {
        if target == self.target {
            return;
        }

        self.target = target;

        if self.smooth_samples <= 1 {
            self.skip_to_target();
            return;
        }

        self.samples_remaining = self.smooth_samples;
        self.step = (self.target - self.current) / T::from_f64(self.smooth_samples as f64);
    }

    #[inline]
    pub fn set_immediate(&mut self, value: T) {
        self.current = value;
        self.target = value;
        self.step = T::ZERO;
        self.samples_remaining = 0;
    }

    #[inline]
    pub fn next_value(&mut self) -> T {
        if self.samples_remaining > 0 {
            self.current += self.step;
            self.samples_remaining -= 1;

            // Snap to target when done to avoid floating point drift
            if self.samples_remaining == 0 {
                self.current = self.target;
            }
        }

        self.current
    }

    #[inline]
    pub fn current(&self) -> T {
        self.current
    }

    #[inline]
    pub fn target(&self) -> T {
        self.target
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.samples_remaining > 0
    }

    #[inline]
    pub fn skip_to_target(&mut self) {
        self.current = self.target;
        self.step = T::ZERO;
        self.samples_remaining = 0;
    }

    #[inline]
    pub fn apply_gain(&mut self, buffer: &mut [T]) {
        for sample in buffer.iter_mut() {
            *sample *= self.next_value();
        }
    }
}

/// Exponential glide toward a target.
///
/// The per-sample factor is `ln 2 / (glide_time * sample_rate)`; a glide time of
/// zero jumps straight to the target.
#[derive(Debug, Clone)]
pub struct GlideSmoother<T: Real> {
    value: T,
    target: T,
    factor: T,
    glide_time_secs: f64,
    sample_rate: f64,
    smoothing: bool,
}

impl<T: Real> GlideSmoother<T> {
    pub fn new(initial: T, glide_time_secs: f64, sample_rate: f64) -> Self {
        let mut glide = Self {
            value: initial,
            target: initial,
            factor: T::ONE,
            glide_time_secs,
            sample_rate,
            smoothing: false,
        };
        glide.update_factor();
        glide
    }

    fn update_factor(&mut self) {
        let samples = self.glide_time_secs * self.sample_rate;
        self.factor = if samples <= 0.0 {
            T::ONE
        } else {
            T::from_f64((core::f64::consts::LN_2 / samples).min(1.0))
        };
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.update_factor();
    }

    pub fn set_glide_time(&mut self, glide_time_secs: f64) {
        self.glide_time_secs = glide_time_secs;
        self.update_factor();
    }

    #[inline]
    pub fn set_target(&mut self, target: T) {
        self.target = target;
        self.smoothing = !self.settled();
    }

    #[inline]
    pub fn set_immediate(&mut self, value: T) {
        self.value = value;
        self.target = value;
        self.smoothing = false;
    }

    #[inline]
    pub fn next_value(&mut self) -> T {
        if !self.smoothing {
            return self.target;
        }

        let previous = self.value;
        self.value += (self.target - self.value) * self.factor;

        // A step smaller than half an ulp stalls short of the target.
        if self.settled() || self.value == previous {
            self.value = self.target;
            self.smoothing = false;
        }

        self.value
    }

    #[inline]
    fn settled(&self) -> bool {
        let tolerance = T::from_f64(1.0e-6) * self.target.abs().max(T::ONE);
        (self.target - self.value).abs() <= tolerance
    }

    #[inline]
    pub fn current(&self) -> T {
        self.value
    }

    #[inline]
    pub fn target(&self) -> T {
        self.target
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.smoothing
    }

    pub fn reset(&mut self) {
        self.value = self.target;
        self.smoothing = false;
    }
}

/// One exponential step toward the target per call: `value += (target - value) * coeff`.
///
/// The step is taken per *call*, not per sample, so the effective time constant
/// depends on how often the caller polls.
#[derive(Debug, Clone, Copy)]
pub struct OnePoleSmoother<T: Real> {
    value: T,
    coeff: T,
}

impl<T: Real> OnePoleSmoother<T> {
    pub fn new(coeff: T) -> Self {
        Self {
            value: T::ZERO,
            coeff,
        }
    }

    #[inline]
    pub fn step(&mut self, target: T) -> T {
        self.value += (target - self.value) * self.coeff;
        self.value
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn coeff(&self) -> T {
        self.coeff
    }

    pub fn reset(&mut self, value: T) {
        self.value = value;
    }
}
