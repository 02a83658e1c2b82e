//! Floating-point precision abstraction.
//!
//! Every processor in cadenza is generic over [`Real`], so the same code runs in
//! single or double precision without duplication.

use core::fmt::Debug;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Sample/coefficient type used by all processors. Implemented for `f32` and `f64`.
pub trait Real:
    Copy
    + Debug
    + Default
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
{
    const ZERO: Self;
    const ONE: Self;

    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn powf(self, exponent: Self) -> Self;
    fn log10(self) -> Self;
    fn max(self, other: Self) -> Self;
}

macro_rules! impl_real {
    ($t:ident) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn abs(self) -> Self {
                $t::abs(self)
            }

            #[inline]
            fn sqrt(self) -> Self {
                $t::sqrt(self)
            }

            #[inline]
            fn powf(self, exponent: Self) -> Self {
                $t::powf(self, exponent)
            }

            #[inline]
            fn log10(self) -> Self {
                $t::log10(self)
            }

            #[inline]
            fn max(self, other: Self) -> Self {
                $t::max(self, other)
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn hypot<T: Real>(a: T, b: T) -> T {
        (a * a + b * b).sqrt()
    }

    #[test]
    fn test_generic_math_matches_native() {
        assert_eq!(hypot(3.0f32, 4.0f32), 5.0);
        assert_eq!(hypot(3.0f64, 4.0f64), 5.0);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(<f32 as Real>::from_f64(0.25), 0.25f32);
        assert_eq!(<f64 as Real>::from_f64(48000.0), 48000.0);
        assert_eq!(Real::to_f64(0.5f32), 0.5);
    }
}
