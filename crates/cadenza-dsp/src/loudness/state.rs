/// Lifecycle of a [`LoudnessMeter`](super::LoudnessMeter).
///
/// ```text
/// Unconfigured --set_sample_rate--> Idle --first sample--> Filling --first window--> Steady
///                                    ^                                                  |
///                                    +------------- any reconfiguration or reset -------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeterState {
    /// No valid sample rate yet. Processing is rejected.
    #[default]
    Unconfigured,
    /// Configured and zeroed; no sample ingested since the last reset.
    Idle,
    /// Ingesting, no accumulator has completed a full window yet.
    Filling,
    /// At least one full window has completed since the last reset.
    Steady,
}

impl MeterState {
    #[inline]
    pub fn is_configured(self) -> bool {
        self != MeterState::Unconfigured
    }
}
