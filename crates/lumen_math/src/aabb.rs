use crate::{is_zero, Interval, MathError, Point3, Ray};

/// Padding added on every side of a box, so flat primitives still get volume.
pub const AABB_PADDING: f64 = 0.1;

/// A coordinate axis, used to pick the split direction of a tree node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of the axis (0=X, 1=Y, 2=Z).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis-Aligned Bounding Box for the acceleration tree.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Boxes built from corners are inflated by [`AABB_PADDING`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a padded box from its minimal and maximal corners.
    ///
    /// Fails if `max` is smaller than `min` on any axis.
    pub fn from_corners(min: Point3, max: Point3) -> Result<Self, MathError> {
        for (axis, name) in [(0, 'x'), (1, 'y'), (2, 'z')] {
            if max.coord(axis) < min.coord(axis) {
                return Err(MathError::InvalidBounds { axis: name });
            }
        }

        Ok(Self {
            x: Interval::new(min.x(), max.x()).pad(AABB_PADDING),
            y: Interval::new(min.y(), max.y()).pad(AABB_PADDING),
            z: Interval::new(min.z(), max.z()).pad(AABB_PADDING),
        })
    }

    /// Create a padded box enclosing every point in `points`.
    ///
    /// Returns `None` for an empty slice.
    pub fn enclosing(points: &[Point3]) -> Option<Self> {
        let first = points.first()?.as_dvec3();
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(p.as_dvec3()), hi.max(p.as_dvec3())));
        Self::from_corners(min.into(), max.into()).ok()
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// The minimal corner.
    pub fn min(&self) -> Point3 {
        Point3::new(self.x.min, self.y.min, self.z.min)
    }

    /// The maximal corner.
    pub fn max(&self) -> Point3 {
        Point3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Get the interval for a specific axis.
    pub fn axis_interval(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Test if the line of a ray crosses this box.
    ///
    /// Uses the slab method. An axis along which the ray does not move
    /// cannot narrow the parametric range, so it only rejects the ray when
    /// the origin lies outside that slab.
    pub fn hit(&self, ray: &Ray) -> bool {
        let origin = ray.origin();
        let dir = ray.dir();
        let mut range = Interval::UNIVERSE;

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let slab = self.axis_interval(axis);
            let o = origin.coord(axis.index());
            let d = dir[axis.index()];

            if is_zero(d) {
                if !slab.contains(o) {
                    return false;
                }
                continue;
            }

            let t0 = (slab.min - o) / d;
            let t1 = (slab.max - o) / d;
            range = range.intersect(&Interval::new(t0.min(t1), t0.max(t1)));
        }

        range.max >= range.min
    }

    /// Returns the axis with the longest extent. Ties prefer X, then Y.
    pub fn longest_axis(&self) -> Axis {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();
        let longest = x_size.max(y_size).max(z_size);

        if longest == x_size {
            Axis::X
        } else if longest == y_size {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &Aabb) -> bool {
        [Axis::X, Axis::Y, Axis::Z].into_iter().all(|axis| {
            let outer = self.axis_interval(axis);
            let inner = other.axis_interval(axis);
            outer.contains(inner.min) && outer.contains(inner.max)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector3;

    fn assert_point_eq(a: Point3, b: Point3) {
        assert!(a.abs_diff_eq(b, 1e-9), "{a} != {b}");
    }

    #[test]
    fn test_aabb_padding() {
        let p = Point3::new(3.0, 3.0, 1.0);
        let aabb = Aabb::from_corners(p, p).unwrap();

        assert_point_eq(aabb.min(), Point3::new(2.9, 2.9, 0.9));
        assert_point_eq(aabb.max(), Point3::new(3.1, 3.1, 1.1));
    }

    #[test]
    fn test_aabb_invalid_bounds() {
        let result = Aabb::from_corners(Point3::new(4.0, 2.0, 0.0), Point3::new(3.0, 3.0, 1.0));
        assert_eq!(result, Err(MathError::InvalidBounds { axis: 'x' }));

        let result = Aabb::from_corners(Point3::new(0.0, 4.0, 0.0), Point3::new(1.0, 3.0, 1.0));
        assert_eq!(result, Err(MathError::InvalidBounds { axis: 'y' }));
    }

    #[test]
    fn test_aabb_hit() {
        let p = Point3::new(3.0, 3.0, 1.0);
        let aabb = Aabb::from_corners(p, p).unwrap();
        let dir = Vector3::new(3.0, 3.0, 1.0).unwrap();

        assert!(aabb.hit(&Ray::new(Point3::ORIGIN, dir)));
        assert!(!aabb.hit(&Ray::new(Point3::new(1000.0, 1000.0, 1000.0), dir)));
    }

    #[test]
    fn test_aabb_hit_axis_parallel() {
        let aabb = Aabb::from_corners(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)).unwrap();

        // Moving only along Z, inside the X and Y slabs
        assert!(aabb.hit(&Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::Z)));

        // Moving only along Z, outside the X slab
        assert!(!aabb.hit(&Ray::new(Point3::new(10.0, 0.0, -5.0), Vector3::Z)));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_corners(Point3::ORIGIN, Point3::new(5.0, 5.0, 5.0)).unwrap();
        let box2 = Aabb::from_corners(Point3::new(3.0, 3.0, 3.0), Point3::new(10.0, 10.0, 10.0)).unwrap();
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert!((surrounding.x.min + 0.1).abs() < 1e-12);
        assert!((surrounding.x.max - 10.1).abs() < 1e-12);
        assert!(surrounding.contains_box(&box1));
        assert!(surrounding.contains_box(&box2));
        assert!(!box1.contains_box(&surrounding));
    }

    #[test]
    fn test_aabb_enclosing() {
        let aabb = Aabb::enclosing(&[
            Point3::new(0.0, 1.0, -2.0),
            Point3::new(1.0, -1.0, -2.0),
            Point3::new(-1.0, -1.0, -2.0),
        ])
        .unwrap();

        assert_point_eq(aabb.min(), Point3::new(-1.1, -1.1, -2.1));
        assert_point_eq(aabb.max(), Point3::new(1.1, 1.1, -1.9));
        assert!(Aabb::enclosing(&[]).is_none());
    }

    #[test]
    fn test_aabb_longest_axis() {
        let aabb_x = Aabb::from_corners(Point3::ORIGIN, Point3::new(10.0, 1.0, 1.0)).unwrap();
        assert_eq!(aabb_x.longest_axis(), Axis::X);

        let aabb_y = Aabb::from_corners(Point3::ORIGIN, Point3::new(1.0, 10.0, 1.0)).unwrap();
        assert_eq!(aabb_y.longest_axis(), Axis::Y);

        let aabb_z = Aabb::from_corners(Point3::ORIGIN, Point3::new(1.0, 1.0, 10.0)).unwrap();
        assert_eq!(aabb_z.longest_axis(), Axis::Z);

        let cube = Aabb::from_corners(Point3::ORIGIN, Point3::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(cube.longest_axis(), Axis::X);
    }
}
