//! Error types for cadenza-core.

use thiserror::Error;

/// Configuration errors shared by all processors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid sample rate: {0}. Must be positive and finite")]
    InvalidSampleRate(f64),

    #[error("Invalid duration: {0} seconds. Must be positive and finite")]
    InvalidDuration(f64),

    #[error("Invalid channel count: {0}. At least one channel is required")]
    InvalidChannelCount(usize),

    #[error("Invalid block size: {0}. Must hold at least one sample")]
    InvalidBlockSize(usize),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
