//! Lock-free meter readout for display threads.

use cadenza_core::AtomicLevel;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Values published by the meter at the end of every processed block.
///
/// Obtained from [`LoudnessMeter::readout`](super::LoudnessMeter::readout) and
/// safe to poll from any thread while the audio thread keeps processing.
#[derive(Debug, Default)]
pub struct LoudnessReadout {
    loudness: AtomicLevel,
    paused: AtomicBool,
    windows: AtomicU64,
}

impl LoudnessReadout {
    /// Latest loudness as linear RMS amplitude.
    #[inline]
    pub fn loudness(&self) -> f64 {
        self.loudness.load()
    }

    #[inline]
    pub fn loudness_db(&self) -> f64 {
        self.loudness.load_db()
    }

    /// Whether the most recent block was skipped by the silence gate.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Full windows completed since the last reset.
    #[inline]
    pub fn windows_completed(&self) -> u64 {
        self.windows.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn publish(&self, loudness: f64, paused: bool, windows: u64) {
        self.loudness.store(loudness);
        self.paused.store(paused, Ordering::Release);
        self.windows.store(windows, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadenza_core::level::DB_FLOOR;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_default_readout_is_silent() {
        let readout = LoudnessReadout::default();
        assert_eq!(readout.loudness(), 0.0);
        assert_eq!(readout.loudness_db(), DB_FLOOR);
        assert!(!readout.is_paused());
        assert_eq!(readout.windows_completed(), 0);
    }

    #[test]
    fn test_publish_visible_from_reader_thread() {
        let readout = Arc::new(LoudnessReadout::default());
        readout.publish(0.5, true, 3);

        let reader = Arc::clone(&readout);
        let seen = thread::spawn(move || (reader.loudness(), reader.is_paused(), reader.windows_completed()))
            .join()
            .expect("reader thread panicked");

        assert_eq!(seen, (0.5, true, 3));
    }
}
