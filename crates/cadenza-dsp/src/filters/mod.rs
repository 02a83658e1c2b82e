//! Filters used for perceptual weighting.

mod first_order;
pub use first_order::{FirstOrderFilter, FirstOrderMode};

mod shelf;
pub use shelf::{OnePoleShelf, ShelfMode};

pub(crate) const DEFAULT_SAMPLE_RATE: f64 = 48000.0;

/// Upper bound for any corner frequency, regardless of sample rate.
pub(crate) const MAX_CUTOFF_HZ: f64 = 20000.0;

#[inline]
#[track_caller]
pub(crate) fn check_channel(channel: usize, channels: usize) {
    assert!(
        channel < channels,
        "channel {} out of range ({} channels configured)",
        channel,
        channels
    );
}
