//! Infinite plane primitive.

use crate::geometry::{GeoPoint, Geometry, Intersectable, Surface};
use crate::GeometryError;
use lumen_math::{align_zero, is_zero, Aabb, Point3, Ray, Vector3};

/// An infinite plane through `q0` with unit normal `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    q0: Point3,
    normal: Vector3,
    surface: Surface,
}

impl Plane {
    /// Create a plane from a point on it and a normal (normalized here).
    pub fn new(q0: Point3, normal: Vector3) -> Self {
        Self {
            q0,
            normal: normal.normalize(),
            surface: Surface::default(),
        }
    }

    /// Create the plane through three points.
    ///
    /// Fails if the first two points coincide or all three are collinear.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3) -> Result<Self, GeometryError> {
        let u = p2
            .subtract(p1)
            .map_err(|_| GeometryError::CoincidentVertices(0, 1))?;
        let v = p3
            .subtract(p1)
            .map_err(|_| GeometryError::CollinearVertices)?;
        let normal = u.cross(v).map_err(|_| GeometryError::CollinearVertices)?;

        Ok(Self::new(p1, normal))
    }

    pub fn point(&self) -> Point3 {
        self.q0
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// The single crossing point of the ray with the plane, if any.
    ///
    /// A ray starting on the plane, or parallel to it (including lying in
    /// it), has no crossing point.
    pub(crate) fn intersect_point(&self, ray: &Ray) -> Option<Point3> {
        let n = self.normal.as_dvec3();
        let to_plane = self.q0 - ray.origin();

        let numerator = align_zero(n.dot(to_plane));
        if numerator == 0.0 {
            return None;
        }

        let nv = n.dot(ray.direction().as_dvec3());
        if is_zero(nv) {
            return None;
        }

        let t = align_zero(numerator / nv);
        (t > 0.0).then(|| ray.at(t))
    }
}

impl Intersectable for Plane {
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        self.intersect_point(ray)
            .map(|p| vec![GeoPoint::new(self, p)])
    }

    /// Planes are unbounded.
    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

impl Geometry for Plane {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn normal_at(&self, _p: Point3) -> Vector3 {
        self.normal
    }
}
