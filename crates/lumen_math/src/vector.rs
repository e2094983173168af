//! Point and direction types built on top of `glam::DVec3`.
//!
//! `Point3` is a plain location in space. `Vector3` is a direction that can
//! never be the zero vector: every operation that could collapse it to zero
//! is fallible and reports [`MathError::ZeroVector`].

use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::MathError;
use glam::DVec3;

/// An immutable point in 3D space.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point3(DVec3);

impl Point3 {
    /// The origin (0, 0, 0).
    pub const ORIGIN: Point3 = Point3(DVec3::ZERO);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Coordinate along axis `n` (0=X, 1=Y, 2=Z).
    #[inline]
    pub fn coord(&self, n: usize) -> f64 {
        self.0[n.min(2)]
    }

    /// The raw coordinates.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    /// The vector from `from` to this point.
    ///
    /// Fails if both points coincide.
    pub fn subtract(&self, from: Point3) -> Result<Vector3, MathError> {
        Vector3::try_from(self.0 - from.0)
    }

    pub fn distance_squared(&self, other: Point3) -> f64 {
        self.0.distance_squared(other.0)
    }

    pub fn distance(&self, other: Point3) -> f64 {
        self.0.distance(other.0)
    }

    /// Componentwise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: Point3, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl From<DVec3> for Point3 {
    fn from(v: DVec3) -> Self {
        Self(v)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Vector3) -> Point3 {
        Point3(self.0 + rhs.0)
    }
}

/// Offsetting by a raw displacement (which may be zero).
impl Add<DVec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: DVec3) -> Point3 {
        Point3(self.0 + rhs)
    }
}

/// Raw displacement between two points; use [`Point3::subtract`] for a `Vector3`.
impl Sub for Point3 {
    type Output = DVec3;

    #[inline]
    fn sub(self, rhs: Point3) -> DVec3 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

/// A non-zero 3D vector.
///
/// The squared length is always a normal float, so normalizing never
/// overflows to zero or underflows to a division by zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector3(DVec3);

impl Vector3 {
    pub const X: Vector3 = Vector3(DVec3::X);
    pub const Y: Vector3 = Vector3(DVec3::Y);
    pub const Z: Vector3 = Vector3(DVec3::Z);

    /// Create a new vector, failing on the zero vector.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, MathError> {
        Self::try_from(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    pub fn add(&self, other: Vector3) -> Result<Vector3, MathError> {
        Self::try_from(self.0 + other.0)
    }

    pub fn subtract(&self, other: Vector3) -> Result<Vector3, MathError> {
        Self::try_from(self.0 - other.0)
    }

    /// Scale by `c`; fails when `c` is zero.
    pub fn scale(&self, c: f64) -> Result<Vector3, MathError> {
        Self::try_from(self.0 * c)
    }

    #[inline]
    pub fn dot(&self, other: Vector3) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product; fails for parallel vectors.
    pub fn cross(&self, other: Vector3) -> Result<Vector3, MathError> {
        Self::try_from(self.0.cross(other.0))
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Unit vector in the same direction.
    pub fn normalize(&self) -> Vector3 {
        Vector3(self.0 / self.0.length())
    }

    /// Componentwise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: Vector3, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl TryFrom<DVec3> for Vector3 {
    type Error = MathError;

    fn try_from(v: DVec3) -> Result<Self, Self::Error> {
        if !v.is_finite() || !v.length_squared().is_normal() {
            return Err(MathError::ZeroVector);
        }
        Ok(Self(v))
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    #[inline]
    fn neg(self) -> Vector3 {
        Vector3(-self.0)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_vector_rejected() {
        assert_eq!(Vector3::new(0.0, 0.0, 0.0), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_extreme_magnitudes_rejected() {
        assert_eq!(Vector3::new(1e200, 1e200, 0.0), Err(MathError::ZeroVector));
        assert_eq!(Vector3::new(1e-200, 0.0, 0.0), Err(MathError::ZeroVector));
        assert_eq!(Vector3::new(f64::NAN, 0.0, 0.0), Err(MathError::ZeroVector));
        assert!(Vector3::X.scale(1e300).is_err());
    }

    #[test]
    fn test_normalize_large_and_small_vectors() {
        for v in [Vector3::new(1e150, 1e150, 0.0), Vector3::new(1e-150, 0.0, 1e-150)] {
            let u = v.unwrap().normalize();
            assert!((u.length() - 1.0).abs() < 1e-12, "{u} is not a unit vector");
        }

        let ray = crate::Ray::new(Point3::ORIGIN, Vector3::new(0.0, 1e150, 0.0).unwrap());
        assert!(ray.direction().abs_diff_eq(Vector3::Y, 1e-12));
    }

    #[test]
    fn test_vector_add_subtract() {
        let v1 = Vector3::new(1.0, 2.0, 3.0).unwrap();
        let v2 = Vector3::new(-2.0, -4.0, -6.0).unwrap();

        assert_eq!(v1.add(v2).unwrap(), Vector3::new(-1.0, -2.0, -3.0).unwrap());
        assert_eq!(v1.subtract(v2).unwrap(), Vector3::new(3.0, 6.0, 9.0).unwrap());

        // Opposite vectors sum to zero
        assert!(v1.add(-v1).is_err());
        assert!(v1.subtract(v1).is_err());
    }

    #[test]
    fn test_vector_scale() {
        let v = Vector3::new(1.0, 2.0, 3.0).unwrap();
        assert_eq!(v.scale(2.0).unwrap(), Vector3::new(2.0, 4.0, 6.0).unwrap());
        assert!(v.scale(0.0).is_err());
    }

    #[test]
    fn test_dot_product() {
        let v1 = Vector3::new(1.0, 2.0, 3.0).unwrap();
        let v2 = Vector3::new(-2.0, -4.0, -6.0).unwrap();
        let v3 = Vector3::new(0.0, 3.0, -2.0).unwrap();

        assert_eq!(v1.dot(v2), -28.0);
        assert_eq!(v1.dot(v3), 0.0);
    }

    #[test]
    fn test_cross_product() {
        let v1 = Vector3::new(1.0, 2.0, 3.0).unwrap();
        let v3 = Vector3::new(0.0, 3.0, -2.0).unwrap();
        let vr = v1.cross(v3).unwrap();

        assert!((vr.length() - v1.length() * v3.length()).abs() < 1e-10);
        assert!(vr.dot(v1).abs() < 1e-10);
        assert!(vr.dot(v3).abs() < 1e-10);

        // Parallel vectors have no cross product
        let v2 = Vector3::new(-2.0, -4.0, -6.0).unwrap();
        assert_eq!(v1.cross(v2), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_length_and_normalize() {
        let v = Vector3::new(0.0, 3.0, 4.0).unwrap();
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);

        let u = v.normalize();
        assert!((u.length() - 1.0).abs() < 1e-12);
        assert!(u.dot(v) > 0.0);
    }

    #[test]
    fn test_point_subtract() {
        let p1 = Point3::new(1.0, 2.0, 3.0);
        let p2 = Point3::new(2.0, 3.0, 4.0);

        assert_eq!(p2.subtract(p1).unwrap(), Vector3::new(1.0, 1.0, 1.0).unwrap());
        assert_eq!(p1.subtract(p1), Err(MathError::ZeroVector));
        assert_eq!(p2 - p1, DVec3::ONE);
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point3::new(1.0, 2.0, 3.0);
        let p2 = Point3::new(1.0, 2.0, 7.0);

        assert_eq!(p1.distance_squared(p2), 16.0);
        assert_eq!(p1.distance(p2), 4.0);
    }

    #[test]
    fn test_point_copy_is_immutable() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let q = p + Vector3::X;
        assert_eq!(p, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(q, Point3::new(2.0, 1.0, 1.0));
    }
}
