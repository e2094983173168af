//! Sphere primitive.

use crate::geometry::{GeoPoint, Geometry, Intersectable, Surface};
use crate::GeometryError;
use lumen_math::{align_zero, Aabb, DVec3, Point3, Ray, Vector3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    surface: Surface,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point3, radius: f64) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }

        let rvec = DVec3::splat(radius);
        let bbox = Aabb::from_corners(center + -rvec, center + rvec)?;

        Ok(Self {
            center,
            radius,
            surface: Surface::default(),
            bbox,
        })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let origin = ray.origin();

        // Ray starts at the center: exactly one hit, one radius away
        if origin == self.center {
            return Some(vec![GeoPoint::new(self, ray.at(self.radius))]);
        }

        let u = self.center - origin;
        let tm = align_zero(ray.direction().as_dvec3().dot(u));
        let d_squared = align_zero(u.length_squared() - tm * tm);
        let r_squared = self.radius * self.radius;
        if d_squared >= r_squared {
            return None;
        }

        let th = align_zero((r_squared - d_squared).sqrt());
        let hits: Vec<GeoPoint<'_>> = [tm - th, tm + th]
            .into_iter()
            .filter(|t| align_zero(*t) > 0.0)
            .map(|t| GeoPoint::new(self, ray.at(t)))
            .collect();

        (!hits.is_empty()).then_some(hits)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Sphere {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn normal_at(&self, p: Point3) -> Vector3 {
        p.subtract(self.center)
            .map(|n| n.normalize())
            .unwrap_or(Vector3::Z)
    }
}
