//! Amplitude/decibel conversion.

use crate::Real;

/// Floor returned for non-positive amplitudes.
pub const DB_FLOOR: f64 = -96.0;

/// Convert linear amplitude to decibels
#[inline]
pub fn amplitude_to_db<T: Real>(amp: T) -> T {
    if amp <= T::ZERO {
        T::from_f64(DB_FLOOR)
    } else {
        T::from_f64(20.0) * amp.log10()
    }
}

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_amplitude<T: Real>(db: T) -> T {
    T::from_f64(10.0).powf(db / T::from_f64(20.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_amplitude_db_conversion() {
        assert_abs_diff_eq!(amplitude_to_db(1.0f32), 0.0, epsilon = 0.001);
        assert_abs_diff_eq!(amplitude_to_db(0.5f64), -6.0206, epsilon = 0.001);
        assert_abs_diff_eq!(db_to_amplitude(0.0f32), 1.0, epsilon = 0.001);
        assert_abs_diff_eq!(db_to_amplitude(-6.0f64), 0.501, epsilon = 0.01);
    }

    #[test]
    fn test_silence_hits_floor() {
        assert_eq!(amplitude_to_db(0.0f64), DB_FLOOR);
        assert_eq!(amplitude_to_db(-1.0f32), DB_FLOOR as f32);
    }
}
