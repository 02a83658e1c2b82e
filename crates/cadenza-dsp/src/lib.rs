//! Real-time DSP building blocks: weighting filters and sliding-window
//! loudness metering.
//!
//! All processors are generic over [`Real`](cadenza_core::Real) (`f32` or
//! `f64`), keep per-channel state sized at configuration time, and never
//! allocate while processing.
//!
//! # Primary API
//!
//! - [`LoudnessMeter`]: windowed RMS meter with staggered accumulators
//! - [`Weighting`]: filter chain applied before measurement
//!   ([`LoudnessWeighting`], [`Unweighted`])
//! - [`FirstOrderFilter`], [`OnePoleShelf`]: the filters behind the weighting

mod error;
pub use error::{Error, Result};

pub mod filters;
pub use filters::{FirstOrderFilter, FirstOrderMode, OnePoleShelf, ShelfMode};

mod weighting;
pub use weighting::{LoudnessWeighting, Unweighted, Weighting};

pub mod loudness;
pub use loudness::{
    AccumulatorBank, BankLayout, LoudnessMeter, LoudnessReadout, MeterState, MAX_ACCUMULATORS,
    SILENCE_THRESHOLD, SMOOTHING_COEFF,
};
