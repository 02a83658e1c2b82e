//! Sliding-window loudness metering.
//!
//! [`LoudnessMeter`] estimates the RMS level of a stream over a window of
//! seconds while refreshing the estimate every update interval. The window is
//! covered by an [`AccumulatorBank`] of staggered partial sums, so the cost per
//! sample depends only on the channel count and the (capped) accumulator count.

mod accumulator;
mod meter;
mod readout;
mod state;

pub use accumulator::{AccumulatorBank, BankLayout, MAX_ACCUMULATORS};
pub use meter::{LoudnessMeter, SILENCE_THRESHOLD, SMOOTHING_COEFF};
pub use readout::LoudnessReadout;
pub use state::MeterState;
