//! Planar vector type used throughout the cloth core.

use crate::float::Float;
use core::ops::{Add, Sub, Neg};

/// 2D vector for planar physics.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// Zero vector.
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    /// Unit vector pointing along `angle` (radians, measured from +x).
    pub fn from_angle(angle: F) -> Self {
        Vec2 { x: angle.cos(), y: angle.sin() }
    }

    pub fn dot(self, other: Self) -> F { self.x * other.x + self.y * other.y }

    /// Scale both components by a scalar.
    pub fn scale(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> F { self.dot(self) }

    pub fn length(self) -> F { self.length_sq().sqrt() }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F { (self - other).length() }

    pub fn distance_sq(self, other: Self) -> F { (self - other).length_sq() }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        (self + other).scale(F::half())
    }

    /// Angle of this vector measured from +x, in radians.
    pub fn angle(self) -> F { F::atan2(self.y, self.x) }

    /// Rotate this point by `angle` radians around `center`.
    pub fn rotate_about(self, center: Self, angle: F) -> Self {
        let (sin, cos) = (angle.sin(), angle.cos());
        let rel = self - center;
        Vec2 {
            x: center.x + rel.x * cos - rel.y * sin,
            y: center.y + rel.x * sin + rel.y * cos,
        }
    }

    /// Normalize to unit length. Returns zero vector if length is near zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(F::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(F::one() / len)
        }
    }

    pub fn is_finite(self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vec2_length() {
        let v = Vec2::new(3.0f32, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector() {
        let v = Vec2::<f32>::zero();
        assert_eq!(v.normalize(), Vec2::zero());
    }

    #[test]
    fn midpoint_of_segment() {
        let mid = Vec2::new(0.0f32, 0.0).midpoint(Vec2::new(250.0, 10.0));
        assert_relative_eq!(mid.x, 125.0);
        assert_relative_eq!(mid.y, 5.0);
    }

    #[test]
    fn quarter_turn_about_center() {
        let center = Vec2::new(10.0f64, 10.0);
        let p = Vec2::new(20.0, 10.0).rotate_about(center, core::f64::consts::FRAC_PI_2);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_preserves_distance() {
        let center = Vec2::new(3.0f64, -2.0);
        let p = Vec2::new(7.0, 1.0);
        let r = p.rotate_about(center, 1.234);
        assert_relative_eq!(p.distance(center), r.distance(center), epsilon = 1e-9);
    }
}
