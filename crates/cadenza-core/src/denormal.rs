//! Denormal flushing for feedback state.
//!
//! Recursive filters decaying toward silence eventually produce subnormal
//! numbers, which are very slow on most CPUs. Processors call these helpers once
//! per block on their feedback state.

use crate::Real;

/// Magnitude at or below which feedback state is snapped to zero.
pub const SNAP_THRESHOLD: f64 = 1.0e-8;

/// Returns zero if `value` is within [`SNAP_THRESHOLD`] of zero (or NaN).
#[inline]
pub fn flush_denormal<T: Real>(value: T) -> T {
    if value.abs() > T::from_f64(SNAP_THRESHOLD) {
        value
    } else {
        T::ZERO
    }
}

/// Flushes every element of a state slice in place.
#[inline]
pub fn snap_to_zero<T: Real>(state: &mut [T]) {
    for s in state.iter_mut() {
        *s = flush_denormal(*s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_small_values() {
        assert_eq!(flush_denormal(1.0e-9f32), 0.0);
        assert_eq!(flush_denormal(-1.0e-9f64), 0.0);
        assert_eq!(flush_denormal(1.0e-8f64), 0.0);
        assert_eq!(flush_denormal(f64::NAN), 0.0);
    }

    #[test]
    fn test_keeps_audible_values() {
        assert_eq!(flush_denormal(1.0e-6f32), 1.0e-6);
        assert_eq!(flush_denormal(-0.5f64), -0.5);
    }

    #[test]
    fn test_snap_slice() {
        let mut state = [0.3f32, 1.0e-12, -2.0e-9, -0.1];
        snap_to_zero(&mut state);
        assert_eq!(state, [0.3, 0.0, 0.0, -0.1]);
    }
}
