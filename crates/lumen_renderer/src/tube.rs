//! Tube (infinite cylinder) and capped Cylinder primitives.

use crate::geometry::{GeoPoint, Geometry, Intersectable, Surface};
use crate::GeometryError;
use lumen_math::{align_zero, is_zero, Aabb, DVec3, Point3, Ray, Vector3};

/// An infinite circular tube of `radius` around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
    surface: Surface,
}

impl Tube {
    /// Create a tube; the radius must be positive.
    pub fn new(axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            axis,
            radius,
            surface: Surface::default(),
        })
    }

    pub fn axis(&self) -> Ray {
        self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ray parameters of the crossings with the tube wall, positive only.
    ///
    /// Solves `|oc_perp + t*d_perp|^2 = r^2` on the components perpendicular
    /// to the axis. Tangent rays and rays parallel to the axis do not cross.
    fn wall_hits(&self, ray: &Ray) -> Vec<f64> {
        let a = self.axis.direction().as_dvec3();
        let d = ray.direction().as_dvec3();
        let oc = ray.origin() - self.axis.origin();

        let d_perp = d - d.dot(a) * a;
        let oc_perp = oc - oc.dot(a) * a;

        let qa = d_perp.length_squared();
        if is_zero(qa) {
            return Vec::new();
        }
        let qb = 2.0 * oc_perp.dot(d_perp);
        let qc = oc_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(qb * qb - 4.0 * qa * qc);
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let root = discriminant.sqrt();
        [(-qb - root) / (2.0 * qa), (-qb + root) / (2.0 * qa)]
            .into_iter()
            .map(align_zero)
            .filter(|t| *t > 0.0)
            .collect()
    }

    /// Normal of the wall at `p`: from the projection of `p` on the axis to `p`.
    fn wall_normal(&self, p: Point3) -> Vector3 {
        let o = self.axis.at(self.axis.project(p));
        p.subtract(o).map(|n| n.normalize()).unwrap_or(Vector3::Z)
    }
}

impl Intersectable for Tube {
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let hits: Vec<GeoPoint<'_>> = self
            .wall_hits(ray)
            .into_iter()
            .map(|t| GeoPoint::new(self, ray.at(t)))
            .collect();

        (!hits.is_empty()).then_some(hits)
    }

    /// Tubes are unbounded.
    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

impl Geometry for Tube {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn normal_at(&self, p: Point3) -> Vector3 {
        self.wall_normal(p)
    }
}

/// A tube cut to `height` along its axis and closed by two disk caps.
///
/// The base cap is centered on the axis origin, the top cap `height` units
/// along the axis direction.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    bbox: Aabb,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, GeometryError> {
        let tube = Tube::new(axis, radius)?;
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height));
        }

        // Each cap disk spans r*sqrt(1 - a_i^2) along axis i
        let a = axis.direction().as_dvec3();
        let rim = |c: f64| radius * (1.0 - c * c).max(0.0).sqrt();
        let extent = DVec3::new(rim(a.x), rim(a.y), rim(a.z));
        let base = axis.origin().as_dvec3();
        let top = axis.at(height).as_dvec3();
        let bbox = Aabb::from_corners(
            (base.min(top) - extent).into(),
            (base.max(top) + extent).into(),
        )?;

        Ok(Self { tube, height, bbox })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius
    }

    /// Crossing of the ray with the cap centered at `center`, strictly inside the rim.
    fn cap_hit(&self, ray: &Ray, center: Point3) -> Option<Point3> {
        let a = self.tube.axis.direction().as_dvec3();
        let nv = a.dot(ray.direction().as_dvec3());
        if is_zero(nv) {
            return None;
        }

        let t = align_zero(a.dot(center - ray.origin()) / nv);
        if t <= 0.0 {
            return None;
        }

        let p = ray.at(t);
        let r2 = self.tube.radius * self.tube.radius;
        (align_zero(r2 - p.distance_squared(center)) > 0.0).then_some(p)
    }
}

impl Intersectable for Cylinder {
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let axis = self.tube.axis;

        let mut hits: Vec<GeoPoint<'_>> = self
            .tube
            .wall_hits(ray)
            .into_iter()
            .map(|t| ray.at(t))
            .filter(|p| {
                let h = align_zero(axis.project(*p));
                h > 0.0 && align_zero(h - self.height) < 0.0
            })
            .map(|p| GeoPoint::new(self, p))
            .collect();

        for center in [axis.origin(), axis.at(self.height)] {
            if let Some(p) = self.cap_hit(ray, center) {
                hits.push(GeoPoint::new(self, p));
            }
        }

        (!hits.is_empty()).then_some(hits)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Cylinder {
    fn surface(&self) -> &Surface {
        &self.tube.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.tube.surface
    }

    fn normal_at(&self, p: Point3) -> Vector3 {
        let axis = self.tube.axis;
        let h = axis.project(p);

        if is_zero(h) {
            -axis.direction()
        } else if is_zero(h - self.height) {
            axis.direction()
        } else {
            self.tube.wall_normal(p)
        }
    }
}
