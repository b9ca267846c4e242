//! Scalar abstraction so the cloth runs in `f32` or `f64`.

use core::ops::{Add, Sub, Mul, Div, Neg};

/// Scalar type the cloth is simulated in.
///
/// Implemented for `f32` and `f64` on top of `libm`, so it works without `std`.
pub trait Float:
    Copy
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    fn zero() -> Self;
    fn one() -> Self;
    fn half() -> Self;
    fn two() -> Self;
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    /// Angle of `(x, y)` from +x, in `(-pi, pi]`.
    fn atan2(y: Self, x: Self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    /// Lossless for both impls; used for constants and slider values.
    fn from_f32(v: f32) -> Self;
    fn to_f32(self) -> f32;
    /// False for NaN and infinities.
    fn is_finite(self) -> bool;

    /// Truncate to a grid count. Negative and NaN values map to 0.
    fn to_count(self) -> usize {
        let v = self.to_f32();
        if v.is_nan() || v <= 0.0 {
            0
        } else {
            v as usize
        }
    }

    fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

macro_rules! impl_float {
    ($t:ident, $sqrt:ident, $sin:ident, $cos:ident, $abs:ident, $floor:ident, $atan2:ident) => {
        impl Float for $t {
            fn zero() -> Self { 0.0 }
            fn one() -> Self { 1.0 }
            fn half() -> Self { 0.5 }
            fn two() -> Self { 2.0 }
            fn sqrt(self) -> Self { libm::$sqrt(self) }
            fn sin(self) -> Self { libm::$sin(self) }
            fn cos(self) -> Self { libm::$cos(self) }
            fn abs(self) -> Self { libm::$abs(self) }
            fn floor(self) -> Self { libm::$floor(self) }
            fn atan2(y: Self, x: Self) -> Self { libm::$atan2(y, x) }
            fn min(self, other: Self) -> Self { if self < other { self } else { other } }
            fn max(self, other: Self) -> Self { if self > other { self } else { other } }
            fn from_f32(v: f32) -> Self { v as $t }
            fn to_f32(self) -> f32 { self as f32 }
            fn is_finite(self) -> bool { $t::is_finite(self) }
        }
    };
}

impl_float!(f32, sqrtf, sinf, cosf, fabsf, floorf, atan2f);
impl_float!(f64, sqrt, sin, cos, fabs, floor, atan2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_count_truncates() {
        assert_eq!(Float::to_count(10.9f32), 10);
        assert_eq!(Float::to_count(0.4f64), 0);
        assert_eq!(Float::to_count(-3.0f32), 0);
        assert_eq!(Float::to_count(f32::NAN), 0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(Float::clamp(5.0f32, 1.0, 3.0), 3.0);
        assert_eq!(Float::clamp(-5.0f64, 1.0, 3.0), 1.0);
    }
}
