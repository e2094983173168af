use crate::{Point3, Vector3};
use glam::DVec3;

/// Distance a ray origin is pushed off a surface to avoid self-intersection.
pub const RAY_OFFSET: f64 = 0.1;

/// A ray in 3D space with an origin and a unit direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray leaving a surface point.
    ///
    /// The origin is moved by [`RAY_OFFSET`] along `normal`, toward the side
    /// of the surface that `direction` points into.
    pub fn with_normal_offset(point: Point3, direction: Vector3, normal: Vector3) -> Self {
        let nd = normal.dot(direction);
        let delta = if nd > 0.0 { RAY_OFFSET } else { -RAY_OFFSET };
        let origin = point + normal.as_dvec3() * delta;
        Self::new(origin, direction)
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// The unit direction.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction.as_dvec3() * t
    }

    /// Parametric distance of the projection of `p` onto the ray.
    #[inline]
    pub fn project(&self, p: Point3) -> f64 {
        (p - self.origin).dot(self.direction.as_dvec3())
    }

    /// The point in `points` nearest to the ray origin.
    pub fn find_closest_point(&self, points: &[Point3]) -> Option<Point3> {
        points
            .iter()
            .copied()
            .min_by(|a, b| {
                self.origin
                    .distance_squared(*a)
                    .total_cmp(&self.origin.distance_squared(*b))
            })
    }

    /// Direction as a raw vector, for numeric code.
    #[inline]
    pub(crate) fn dir(&self) -> DVec3 {
        self.direction.as_dvec3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_direction_is_normalized() {
        let ray = Ray::new(Point3::ORIGIN, Vector3::new(0.0, 3.0, 4.0).unwrap());
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
        assert!(ray
            .direction()
            .abs_diff_eq(Vector3::new(0.0, 0.6, 0.8).unwrap(), 1e-12));
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::ORIGIN, Vector3::X);

        assert_eq!(ray.at(0.0), Point3::ORIGIN);
        assert_eq!(ray.at(1.0), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Point3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_normal_offset_follows_direction() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let n = Vector3::Z;

        // Leaving the surface on the normal side
        let up = Ray::with_normal_offset(p, Vector3::new(1.0, 0.0, 1.0).unwrap(), n);
        assert_eq!(up.origin(), Point3::new(0.0, 0.0, RAY_OFFSET));

        // Going through the surface
        let down = Ray::with_normal_offset(p, Vector3::new(1.0, 0.0, -1.0).unwrap(), n);
        assert_eq!(down.origin(), Point3::new(0.0, 0.0, -RAY_OFFSET));
    }

    #[test]
    fn test_find_closest_point() {
        let ray = Ray::new(Point3::ORIGIN, Vector3::X);
        let points = [
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];

        assert_eq!(ray.find_closest_point(&points), Some(Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(ray.find_closest_point(&[]), None);
    }

    #[test]
    fn test_ray_copy() {
        let ray1 = Ray::new(Point3::ORIGIN, Vector3::Y);
        let ray2 = ray1;

        assert_eq!(ray1.origin(), ray2.origin());
        assert_eq!(ray1.at(1.0), ray2.at(1.0));
    }
}
