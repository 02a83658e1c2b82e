//! Numeric foundation shared by cadenza processors.
//!
//! # Primary API
//!
//! - [`Real`]: precision abstraction implemented for `f32` and `f64`
//! - [`flush_denormal`] / [`snap_to_zero`]: denormal flushing for feedback state
//! - [`LinearSmoother`], [`GlideSmoother`], [`OnePoleSmoother`]: value smoothing
//! - [`MeterConfig`]: loudness meter timing and policy
//! - [`AtomicLevel`]: lock-free level published to reader threads

pub mod error;
pub use error::{Error, Result};

mod real;
pub use real::Real;

pub mod denormal;
pub use denormal::{flush_denormal, snap_to_zero};

pub mod level;
pub use level::{amplitude_to_db, db_to_amplitude};

pub mod smooth;
pub use smooth::{GlideSmoother, LinearSmoother, OnePoleSmoother};

pub mod config;
pub use config::{
    seconds_to_samples, validate_duration, validate_duration_at, validate_sample_rate, MeterConfig,
};

mod lockfree;
pub use lockfree::AtomicLevel;
