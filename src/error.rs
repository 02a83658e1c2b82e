//! Centralized error type for the cadenza umbrella crate.
//!
//! Wraps the member crates' errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] cadenza_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] cadenza_dsp::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
