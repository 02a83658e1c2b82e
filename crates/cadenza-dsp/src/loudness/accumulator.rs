//! Staggered sum-of-squares accumulators.
//!
//! A window of `W` samples is covered by `N` accumulators whose start times are
//! spread `offset` samples apart. Each accumulator restarts as soon as it has
//! seen a full window, so one of them completes every `offset` samples and the
//! meter refreshes far more often than the window length while doing constant
//! work per sample.
//!
//! ```text
//! window = 8, offset = 2  ->  4 accumulators
//!
//! acc 0  |########|########|...
//! acc 1  ..|########|########|...
//! acc 2  ....|########|########|...
//! acc 3  ......|########|########|...
//!                ^ ^ ^ ^  one completion every 2 samples
//! ```

use cadenza_core::Real;

/// Upper bound on the number of accumulators in a bank.
pub const MAX_ACCUMULATORS: usize = 50;

const MAX_WINDOW_SAMPLES: usize = i64::MAX as usize;

/// Derived timing of an accumulator bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankLayout {
    /// Samples per measurement window.
    pub window_samples: usize,
    /// Samples between successive completions.
    pub offset_samples: usize,
    pub num_accumulators: usize,
    pub channels: usize,
    /// Accumulators the timing asked for before the cap was applied.
    pub requested_accumulators: usize,
}

impl BankLayout {
    /// Derives `ceil(window / offset)` accumulators, capped at `max_accumulators`.
    ///
    /// When capped, the offset is recomputed as `window / num_accumulators` so
    /// the phases stay evenly spaced. Zero inputs fall back to a single
    /// accumulator spanning the whole window. The window is clamped to
    /// `i64::MAX` samples so counters and start phases stay representable.
    pub fn derive(
        window_samples: usize,
        offset_samples: usize,
        max_accumulators: usize,
        channels: usize,
    ) -> Self {
        let window = window_samples.clamp(1, MAX_WINDOW_SAMPLES);
        let max = max_accumulators.max(1);
        let channels = channels.max(1);

        if offset_samples == 0 {
            return Self {
                window_samples: window,
                offset_samples: window,
                num_accumulators: 1,
                channels,
                requested_accumulators: 1,
            };
        }

        // An offset longer than the window still completes once per window
        let offset = offset_samples.min(window);
        let requested = window.div_ceil(offset);

        let (num_accumulators, offset_samples) = if requested > max {
            (max, window / max)
        } else {
            (requested, offset)
        };

        Self {
            window_samples: window,
            offset_samples,
            num_accumulators,
            channels,
            requested_accumulators: requested,
        }
    }

    #[inline]
    pub fn is_capped(&self) -> bool {
        self.requested_accumulators > self.num_accumulators
    }

    /// Initial counter of accumulator `index`; negative until its phase begins.
    #[inline]
    pub fn start_counter(&self, index: usize) -> i64 {
        -((index * self.offset_samples) as i64)
    }
}

/// Bank of staggered accumulators with per-channel sums.
///
/// Sums are stored accumulator-major: `sums[i * channels + c]`. Storage only
/// grows in [`reserve`](Self::reserve) or [`configure`](Self::configure), never
/// while ingesting.
#[derive(Debug, Clone)]
pub struct AccumulatorBank<T: Real> {
    layout: BankLayout,
    sums: Vec<T>,
    counters: Vec<i64>,
}

impl<T: Real> AccumulatorBank<T> {
    pub fn new() -> Self {
        let mut bank = Self {
            layout: BankLayout::derive(1, 1, 1, 1),
            sums: Vec::new(),
            counters: Vec::new(),
        };
        bank.reserve(1, 1);
        bank.reset();
        bank
    }

    /// Pre-allocates room for `max_accumulators` accumulators of `channels` channels.
    pub fn reserve(&mut self, max_accumulators: usize, channels: usize) {
        let accumulators = max_accumulators.max(1);
        let sums = accumulators * channels.max(1);
        if self.sums.len() < sums {
            self.sums.resize(sums, T::ZERO);
        }
        if self.counters.len() < accumulators {
            self.counters.resize(accumulators, 0);
        }
    }

    /// Derives a new layout and resets every accumulator to its start phase.
    pub fn configure(
        &mut self,
        window_samples: usize,
        offset_samples: usize,
        max_accumulators: usize,
        channels: usize,
    ) -> BankLayout {
        let layout = BankLayout::derive(window_samples, offset_samples, max_accumulators, channels);
        self.reserve(layout.num_accumulators, layout.channels);
        self.layout = layout;
        self.reset();
        layout
    }

    /// Zeroes all sums and re-derives the stagger phases.
    pub fn reset(&mut self) {
        let layout = self.layout;
        self.sums.fill(T::ZERO);
        for (index, counter) in self.counters[..layout.num_accumulators].iter_mut().enumerate() {
            *counter = layout.start_counter(index);
        }
    }

    #[inline]
    pub fn layout(&self) -> &BankLayout {
        &self.layout
    }

    #[inline]
    pub fn num_accumulators(&self) -> usize {
        self.layout.num_accumulators
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels
    }

    /// Active counters in stagger order.
    #[inline]
    pub fn counters(&self) -> &[i64] {
        &self.counters[..self.layout.num_accumulators]
    }

    /// Adds one squared sample per channel into every accumulator whose phase
    /// has begun.
    ///
    /// # Panics
    ///
    /// Panics if `squared.len()` differs from the configured channel count.
    #[inline]
    pub fn ingest(&mut self, squared: &[T]) {
        let channels = self.layout.channels;
        assert_eq!(
            squared.len(),
            channels,
            "ingested {} channels into a bank configured for {}",
            squared.len(),
            channels
        );

        let active = self.layout.num_accumulators;
        for (counter, sums) in self.counters[..active]
            .iter()
            .zip(self.sums.chunks_exact_mut(channels))
        {
            if *counter >= 0 {
                for (sum, &value) in sums.iter_mut().zip(squared) {
                    *sum += value;
                }
            }
        }
    }

    /// Running estimate from the first accumulator before it has filled:
    /// each channel's partial mean `sum / (counter + 1)`, summed, square-rooted.
    ///
    /// Valid between [`ingest`](Self::ingest) and [`advance`](Self::advance)
    /// for the same sample.
    #[inline]
    pub fn provisional_rms(&self) -> T {
        let channels = self.layout.channels;
        let count = T::from_f64((self.counters[0] + 1) as f64);
        self.sums[..channels]
            .iter()
            .map(|&sum| sum / count)
            .sum::<T>()
            .sqrt()
    }

    /// Advances every counter by one sample.
    ///
    /// Returns the combined RMS of an accumulator that just completed its
    /// window: per-channel means, summed, square-rooted. If more than one
    /// completes on the same sample the last in stagger order wins.
    #[inline]
    pub fn advance(&mut self) -> Option<T> {
        let BankLayout {
            window_samples,
            num_accumulators,
            channels,
            ..
        } = self.layout;
        let window = window_samples as i64;
        let inv_window = T::ONE / T::from_f64(window_samples as f64);

        let mut completed = None;
        for (counter, sums) in self.counters[..num_accumulators]
            .iter_mut()
            .zip(self.sums.chunks_exact_mut(channels))
        {
            *counter += 1;
            if *counter >= window {
                *counter = 0;
                let mut mean = T::ZERO;
                for sum in sums.iter_mut() {
                    mean += *sum * inv_window;
                    *sum = T::ZERO;
                }
                completed = Some(mean.sqrt());
            }
        }
        completed
    }
}

impl<T: Real> Default for AccumulatorBank<T> {
    fn default() -> Self {
        Self::new()
    }
}
