//! # Cadenza - Real-time Audio DSP Toolkit
//!
//! Allocation-free processors for the audio thread.
//!
//! ## Architecture
//!
//! Cadenza is an umbrella crate over:
//! - **cadenza-core** - Precision trait, denormal flushing, smoothing, configuration
//! - **cadenza-dsp** - Weighting filters and the sliding-window loudness meter
//!
//! ## Quick Start
//!
//! ```
//! use cadenza::prelude::*;
//!
//! let config = MeterConfig::default().window_seconds(1.0).update_seconds(0.05);
//! let mut meter = LoudnessMeter::<f32>::with_config(config)?;
//! meter.set_sample_rate(48000.0)?;
//! meter.set_buffer_size(256, 1)?;
//!
//! let block = [0.5f32; 256];
//! meter.process_mono(&block)?;
//!
//! // Poll from the UI thread
//! let readout = meter.readout();
//! let level_db = readout.loudness_db();
//! # assert!(level_db <= 0.0);
//! # Ok::<(), cadenza::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serialization` - serde support for [`MeterConfig`]

/// Re-export of cadenza-core for direct access
pub use cadenza_core as core;

/// Re-export of cadenza-dsp for direct access
pub use cadenza_dsp as dsp;

pub use cadenza_core::{
    amplitude_to_db, db_to_amplitude, flush_denormal, snap_to_zero, GlideSmoother,
    LinearSmoother, MeterConfig, OnePoleSmoother, Real,
};

pub use cadenza_dsp::{
    FirstOrderFilter, FirstOrderMode, LoudnessMeter, LoudnessReadout, LoudnessWeighting,
    MeterState, OnePoleShelf, ShelfMode, Unweighted, Weighting,
};

mod error;
pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Error, Result};

    pub use cadenza_core::{amplitude_to_db, db_to_amplitude, MeterConfig, Real};

    pub use cadenza_dsp::{
        LoudnessMeter, LoudnessReadout, LoudnessWeighting, MeterState, Unweighted, Weighting,
    };
}
