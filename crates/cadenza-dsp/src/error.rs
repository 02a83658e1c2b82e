//! Error types for cadenza-dsp

use thiserror::Error;

/// Processing and configuration errors.
///
/// Variants returned from the audio path carry only `Copy` data, so reporting
/// them never allocates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] cadenza_core::Error),

    #[error("Meter is not configured: set a sample rate and buffer size first")]
    Unconfigured,

    #[error("Channel count mismatch: expected {expected}, got {got}")]
    ChannelCountMismatch { expected: usize, got: usize },

    #[error("Block of {len} samples exceeds the configured maximum of {max}")]
    BlockTooLarge { len: usize, max: usize },

    #[error("Channel {channel} holds {len} samples, expected {expected}")]
    RaggedBlock {
        channel: usize,
        len: usize,
        expected: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
