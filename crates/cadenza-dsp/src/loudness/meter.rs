//! Sliding-window loudness meter.

use std::sync::Arc;

use cadenza_core::{
    amplitude_to_db, seconds_to_samples, validate_duration, validate_duration_at, validate_sample_rate,
    Error as CoreError,
    MeterConfig, OnePoleSmoother, Real,
};

use super::accumulator::{AccumulatorBank, BankLayout, MAX_ACCUMULATORS};
use super::{LoudnessReadout, MeterState};
use crate::weighting::{LoudnessWeighting, Unweighted, Weighting};
use crate::{Error, Result};

/// Peak level at or below which a block counts as silent (about -192 dBFS).
pub const SILENCE_THRESHOLD: f64 = 2.51e-10;

/// Per-call coefficient of the output smoother.
pub const SMOOTHING_COEFF: f64 = 0.25;

/// Windowed RMS meter refreshed every update interval.
///
/// Each block is weighted, squared and fed into a staggered
/// [`AccumulatorBank`], so a window of seconds is refreshed every few
/// milliseconds with constant work per sample. All buffers are sized by the
/// configuration calls; [`process_buffer`](Self::process_buffer) never
/// allocates.
///
/// # Example
///
/// ```
/// use cadenza_dsp::LoudnessMeter;
///
/// let mut meter = LoudnessMeter::<f32>::new();
/// meter.set_sample_rate(48000.0)?;
/// meter.set_buffer_size(512, 2)?;
/// meter.set_window_size(1.0)?;
///
/// let left = vec![0.25f32; 512];
/// let right = vec![-0.25f32; 512];
/// meter.process_buffer(&[&left[..], &right[..]])?;
///
/// let display = meter.smoothed_loudness();
/// # assert!(display >= 0.0);
/// # Ok::<(), cadenza_dsp::Error>(())
/// ```
#[derive(Debug)]
pub struct LoudnessMeter<T: Real, W: Weighting<T> = LoudnessWeighting<T>> {
    weighting: W,
    bank: AccumulatorBank<T>,
    staging: Vec<Vec<T>>,
    squared: Vec<T>,

    sample_rate: Option<f64>,
    num_channels: usize,
    max_block_size: usize,
    window_seconds: f64,
    update_seconds: f64,

    pause_on_silence: bool,
    reset_from_zero: bool,
    use_unfilled: bool,

    last_value: T,
    smoother: OnePoleSmoother<T>,
    state: MeterState,
    paused_by_silence: bool,
    windows_completed: u64,
    readout: Arc<LoudnessReadout>,
}

impl<T: Real> LoudnessMeter<T> {
    /// Meter with the default perceptual weighting.
    pub fn new() -> Self {
        Self::with_weighting(LoudnessWeighting::new())
    }
}

impl<T: Real> LoudnessMeter<T, Unweighted> {
    /// Meter measuring the raw signal.
    pub fn unweighted() -> Self {
        Self::with_weighting(Unweighted)
    }
}

impl<T: Real, W: Weighting<T> + Default> Default for LoudnessMeter<T, W> {
    fn default() -> Self {
        Self::with_weighting(W::default())
    }
}

impl<T: Real, W: Weighting<T> + Default> LoudnessMeter<T, W> {
    pub fn with_config(config: MeterConfig) -> Result<Self> {
        let mut meter = Self::default();
        meter.apply_config(&config)?;
        Ok(meter)
    }
}

impl<T: Real, W: Weighting<T>> LoudnessMeter<T, W> {
    pub fn with_weighting(mut weighting: W) -> Self {
        let config = MeterConfig::default();
        weighting.set_num_channels(1);

        Self {
            weighting,
            bank: AccumulatorBank::new(),
            staging: vec![Vec::new()],
            squared: vec![T::ZERO],
            sample_rate: None,
            num_channels: 1,
            max_block_size: 0,
            window_seconds: config.window_seconds,
            update_seconds: config.update_seconds,
            pause_on_silence: config.pause_on_silence,
            reset_from_zero: config.reset_from_zero,
            use_unfilled: false,
            last_value: T::ZERO,
            smoother: OnePoleSmoother::new(T::from_f64(SMOOTHING_COEFF)),
            state: MeterState::Unconfigured,
            paused_by_silence: false,
            windows_completed: 0,
            readout: Arc::new(LoudnessReadout::default()),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Applies a whole configuration with a single reset.
    ///
    /// An invalid configuration is rejected without touching the current one.
    pub fn apply_config(&mut self, config: &MeterConfig) -> Result<()> {
        config.validate()?;
        self.check_duration(config.window_seconds)?;
        self.check_duration(config.update_seconds)?;
        self.window_seconds = config.window_seconds;
        self.update_seconds = config.update_seconds;
        self.pause_on_silence = config.pause_on_silence;
        self.reset_from_zero = config.reset_from_zero;
        self.reconfigure();
        Ok(())
    }

    pub fn config(&self) -> MeterConfig {
        MeterConfig {
            window_seconds: self.window_seconds,
            update_seconds: self.update_seconds,
            pause_on_silence: self.pause_on_silence,
            reset_from_zero: self.reset_from_zero,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f64) -> Result<()> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        validate_duration_at(self.window_seconds, sample_rate)?;
        validate_duration_at(self.update_seconds, sample_rate)?;
        self.sample_rate = Some(sample_rate);
        self.weighting.set_sample_rate(sample_rate);
        self.reconfigure();
        Ok(())
    }

    /// Allocates staging buffers and accumulator storage for blocks of up to
    /// `max_block_size` samples on `channels` channels.
    pub fn set_buffer_size(&mut self, max_block_size: usize, channels: usize) -> Result<()> {
        if channels == 0 {
            return Err(CoreError::InvalidChannelCount(channels).into());
        }
        if max_block_size == 0 {
            return Err(CoreError::InvalidBlockSize(max_block_size).into());
        }

        self.num_channels = channels;
        self.max_block_size = max_block_size;

        self.staging.resize_with(channels, Vec::new);
        for buffer in &mut self.staging {
            buffer.resize(max_block_size, T::ZERO);
        }
        self.squared.resize(channels, T::ZERO);
        self.bank.reserve(MAX_ACCUMULATORS, channels);
        self.weighting.set_num_channels(channels);

        self.reconfigure();
        Ok(())
    }

    /// Sets the measurement window length in seconds.
    pub fn set_window_size(&mut self, seconds: f64) -> Result<()> {
        self.window_seconds = self.check_duration(seconds)?;
        self.reconfigure();
        Ok(())
    }

    /// Sets the interval between fresh estimates in seconds.
    pub fn set_update_rate(&mut self, seconds: f64) -> Result<()> {
        self.update_seconds = self.check_duration(seconds)?;
        self.reconfigure();
        Ok(())
    }

    /// Durations must also fit the signed sample counters once a rate is known.
    fn check_duration(&self, seconds: f64) -> Result<f64> {
        let seconds = match self.sample_rate {
            Some(sample_rate) => validate_duration_at(seconds, sample_rate)?,
            None => validate_duration(seconds)?,
        };
        Ok(seconds)
    }

    /// Takes effect from the next processed block.
    pub fn set_pause_on_silence(&mut self, pause: bool) {
        self.pause_on_silence = pause;
    }

    /// Takes effect on the next reset or reconfiguration.
    pub fn set_reset_from_zero(&mut self, reset: bool) {
        self.reset_from_zero = reset;
    }

    fn reconfigure(&mut self) {
        self.reset();

        if !self.state.is_configured() {
            return;
        }

        let layout = *self.bank.layout();
        if layout.is_capped() {
            tracing::warn!(
                "Loudness meter needs {} accumulators, capped at {} (update offset now {} samples)",
                layout.requested_accumulators,
                layout.num_accumulators,
                layout.offset_samples
            );
        }
        tracing::debug!(
            "Loudness meter configured: window {} samples, offset {} samples, {} accumulators, {} channels",
            layout.window_samples,
            layout.offset_samples,
            layout.num_accumulators,
            layout.channels
        );
    }

    /// Zeroes accumulators, staging buffers and filter state, and re-derives
    /// the stagger phases.
    ///
    /// With `reset_from_zero` the reported loudness drops to zero until the
    /// first window completes; otherwise the previous value is held and
    /// replaced by provisional estimates as samples arrive. Does nothing
    /// before a sample rate has been set.
    pub fn reset(&mut self) {
        let Some(sample_rate) = self.sample_rate else {
            return;
        };

        let window = seconds_to_samples(self.window_seconds, sample_rate);
        let offset = seconds_to_samples(self.update_seconds, sample_rate);
        self.bank
            .configure(window, offset, MAX_ACCUMULATORS, self.num_channels);

        for buffer in &mut self.staging {
            buffer.fill(T::ZERO);
        }
        self.squared.fill(T::ZERO);
        self.weighting.reset();

        if self.reset_from_zero {
            self.last_value = T::ZERO;
            self.smoother.reset(T::ZERO);
            self.use_unfilled = false;
        } else {
            self.use_unfilled = true;
        }

        self.state = MeterState::Idle;
        self.paused_by_silence = false;
        self.windows_completed = 0;
        self.publish();
    }

    // =========================================================================
    // Processing
    // =========================================================================

    /// Ingests one block, one slice per channel.
    ///
    /// All channels must hold the same number of samples, at most the
    /// configured maximum block size. A block whose peak is at or below
    /// [`SILENCE_THRESHOLD`] is skipped entirely while `pause_on_silence` is on.
    pub fn process_buffer<C: AsRef<[T]>>(&mut self, channels: &[C]) -> Result<()> {
        if !self.state.is_configured() || self.max_block_size == 0 {
            return Err(Error::Unconfigured);
        }
        if channels.len() != self.num_channels {
            return Err(Error::ChannelCountMismatch {
                expected: self.num_channels,
                got: channels.len(),
            });
        }

        let len = channels[0].as_ref().len();
        if len > self.max_block_size {
            return Err(Error::BlockTooLarge {
                len,
                max: self.max_block_size,
            });
        }
        if let Some((channel, ragged)) = channels
            .iter()
            .map(|c| c.as_ref().len())
            .enumerate()
            .find(|&(_, n)| n != len)
        {
            return Err(Error::RaggedBlock {
                channel,
                len: ragged,
                expected: len,
            });
        }
        if len == 0 {
            return Ok(());
        }

        let peak = channels
            .iter()
            .flat_map(|c| c.as_ref().iter())
            .fold(T::ZERO, |peak, &x| peak.max(x.abs()));

        if self.pause_on_silence && peak <= T::from_f64(SILENCE_THRESHOLD) {
            self.paused_by_silence = true;
            self.publish();
            return Ok(());
        }
        self.paused_by_silence = false;

        for (channel, (buffer, input)) in self.staging.iter_mut().zip(channels).enumerate() {
            let block = &mut buffer[..len];
            block.copy_from_slice(input.as_ref());
            self.weighting.process_block(block, channel);
        }
        self.weighting.snap_to_zero();

        if self.state == MeterState::Idle {
            self.state = MeterState::Filling;
        }

        for s in 0..len {
            for (squared, buffer) in self.squared.iter_mut().zip(&self.staging) {
                let x = buffer[s];
                *squared = x * x;
            }
            self.bank.ingest(&self.squared);

            if self.use_unfilled {
                self.last_value = self.bank.provisional_rms();
            }

            if let Some(rms) = self.bank.advance() {
                self.last_value = rms;
                self.use_unfilled = false;
                self.windows_completed += 1;
                self.state = MeterState::Steady;
            }
        }

        self.publish();
        Ok(())
    }

    /// Single-channel convenience for [`process_buffer`](Self::process_buffer).
    pub fn process_mono(&mut self, samples: &[T]) -> Result<()> {
        self.process_buffer(&[samples])
    }

    #[inline]
    fn publish(&self) {
        self.readout.publish(
            self.last_value.to_f64(),
            self.paused_by_silence,
            self.windows_completed,
        );
    }

    // =========================================================================
    // Readout
    // =========================================================================

    /// Latest windowed RMS as linear amplitude.
    #[inline]
    pub fn loudness(&self) -> T {
        self.last_value
    }

    #[inline]
    pub fn loudness_db(&self) -> T {
        amplitude_to_db(self.last_value)
    }

    /// Steps the display smoother once toward [`loudness`](Self::loudness).
    ///
    /// One step per call, so the smoothing time depends on how often this is
    /// polled.
    #[inline]
    pub fn smoothed_loudness(&mut self) -> T {
        self.smoother.step(self.last_value)
    }

    /// Shared handle for reading the meter from another thread.
    pub fn readout(&self) -> Arc<LoudnessReadout> {
        Arc::clone(&self.readout)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    #[inline]
    pub fn state(&self) -> MeterState {
        self.state
    }

    pub fn sample_rate(&self) -> Option<f64> {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Derived accumulator layout, `None` before a sample rate is set.
    pub fn layout(&self) -> Option<&BankLayout> {
        self.state.is_configured().then(|| self.bank.layout())
    }

    pub fn num_accumulators(&self) -> usize {
        self.layout().map_or(0, |l| l.num_accumulators)
    }

    pub fn window_size_samples(&self) -> usize {
        self.layout().map_or(0, |l| l.window_samples)
    }

    pub fn update_offset_samples(&self) -> usize {
        self.layout().map_or(0, |l| l.offset_samples)
    }

    /// Accumulator counters in stagger order.
    pub fn accumulator_counters(&self) -> &[i64] {
        self.bank.counters()
    }

    /// Whether the last block was skipped by the silence gate.
    pub fn is_paused_by_silence(&self) -> bool {
        self.paused_by_silence
    }

    pub fn windows_completed(&self) -> u64 {
        self.windows_completed
    }

    pub fn weighting(&self) -> &W {
        &self.weighting
    }

    /// Direct access to the weighting chain. Changing its sample rate or
    /// channel count here bypasses the meter; use the meter's setters instead.
    pub fn weighting_mut(&mut self) -> &mut W {
        &mut self.weighting
    }
}
