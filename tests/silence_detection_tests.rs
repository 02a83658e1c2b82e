//! Silence gate: near-silent blocks freeze the meter exactly where it was.

mod helpers;

use approx::assert_abs_diff_eq;
use cadenza::dsp::SILENCE_THRESHOLD;
use cadenza::prelude::*;
use helpers::tolerances::FLOAT_EPSILON;
use helpers::*;

#[test]
fn test_silent_block_freezes_everything() {
    let mut meter = test_meter(1, 1.0, 0.1);
    feed_mono(&mut meter, &generate_sine(440.0, 0.5, TEST_SAMPLE_RATE, 60000));

    let loudness = meter.loudness();
    let counters = meter.accumulator_counters().to_vec();
    let windows = meter.windows_completed();
    let state = meter.state();

    feed_mono(&mut meter, &generate_silence(48000 * 3));

    assert!(meter.is_paused_by_silence());
    assert_eq!(meter.loudness(), loudness);
    assert_eq!(meter.accumulator_counters(), counters.as_slice());
    assert_eq!(meter.windows_completed(), windows);
    assert_eq!(meter.state(), state);
}

#[test]
fn test_threshold_is_inclusive() {
    let mut meter = test_meter(1, 1.0, 0.1);
    let counters = meter.accumulator_counters().to_vec();

    feed_mono(&mut meter, &generate_dc(SILENCE_THRESHOLD, TEST_BUFFER_SIZE));
    assert!(meter.is_paused_by_silence());
    assert_eq!(meter.accumulator_counters(), counters.as_slice());
    assert_eq!(meter.state(), MeterState::Idle);

    feed_mono(&mut meter, &generate_dc(-SILENCE_THRESHOLD * 2.0, TEST_BUFFER_SIZE));
    assert!(!meter.is_paused_by_silence());
    assert_eq!(meter.state(), MeterState::Filling);
}

#[test]
fn test_one_loud_channel_keeps_meter_running() {
    let mut meter = test_meter(2, 1.0, 0.1);
    let quiet = generate_silence(TEST_BUFFER_SIZE);
    let mut loud = generate_silence(TEST_BUFFER_SIZE);
    loud[100] = -0.01;

    meter.process_buffer(&[&quiet, &loud]).unwrap();
    assert!(!meter.is_paused_by_silence());
    assert_eq!(meter.accumulator_counters()[0], TEST_BUFFER_SIZE as i64);
}

#[test]
fn test_gate_disabled_measures_silence() {
    let mut meter = test_meter(1, 0.5, 0.1);
    feed_mono(&mut meter, &generate_dc(1.0, 24000));
    assert_abs_diff_eq!(meter.loudness(), 1.0, epsilon = FLOAT_EPSILON);

    meter.set_pause_on_silence(false);
    feed_mono(&mut meter, &generate_silence(24000));

    assert!(!meter.is_paused_by_silence());
    assert_eq!(meter.loudness(), 0.0);
}

#[test]
fn test_gate_reenabled_takes_effect_immediately() {
    let mut meter = test_meter(1, 0.5, 0.1);
    meter.set_pause_on_silence(false);
    feed_mono(&mut meter, &generate_silence(TEST_BUFFER_SIZE));
    assert!(!meter.is_paused_by_silence());

    meter.set_pause_on_silence(true);
    feed_mono(&mut meter, &generate_silence(TEST_BUFFER_SIZE));
    assert!(meter.is_paused_by_silence());
    assert!(meter.readout().is_paused());
}

#[test]
fn test_weighting_state_frozen_during_silence() {
    // A gated block must not tick the filters: resuming after silence gives
    // the same result as never having been silent.
    let signal = generate_sine(60.0, 0.5, TEST_SAMPLE_RATE, 48000);

    let mut reference = LoudnessMeter::<f64>::new();
    let mut gated = LoudnessMeter::<f64>::new();
    for meter in [&mut reference, &mut gated] {
        meter.set_sample_rate(TEST_SAMPLE_RATE).unwrap();
        meter.set_buffer_size(TEST_BUFFER_SIZE, 1).unwrap();
        meter.set_window_size(1.0).unwrap();
    }

    let (first, second) = signal.split_at(24000);
    feed_mono(&mut reference, first);
    feed_mono(&mut gated, first);
    feed_mono(&mut gated, &generate_silence(4800));
    feed_mono(&mut reference, second);
    feed_mono(&mut gated, second);

    assert_eq!(gated.windows_completed(), 1);
    assert_eq!(gated.loudness(), reference.loudness());
}
