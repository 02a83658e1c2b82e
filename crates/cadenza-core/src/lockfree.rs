//! Lock-free level cell for publishing audio-thread measurements.

use core::sync::atomic::Ordering;

use atomic_float::AtomicF64;

use crate::amplitude_to_db;

/// Linear amplitude written by one thread and polled by others.
///
/// Stored as `f64` so either sample precision round-trips without loss. Padded
/// to a cache line so a busy reader never shares a line with audio-thread state.
#[derive(Debug, Default)]
#[repr(align(64))]
pub struct AtomicLevel {
    amplitude: AtomicF64,
}

impl AtomicLevel {
    pub fn new(amplitude: f64) -> Self {
        Self {
            amplitude: AtomicF64::new(amplitude),
        }
    }

    #[inline]
    pub fn load(&self) -> f64 {
        self.amplitude.load(Ordering::Acquire)
    }

    #[inline]
    pub fn store(&self, amplitude: f64) {
        self.amplitude.store(amplitude, Ordering::Release);
    }

    /// Current level in decibels, floored like [`amplitude_to_db`].
    #[inline]
    pub fn load_db(&self) -> f64 {
        amplitude_to_db(self.load())
    }
}
