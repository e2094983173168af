//! Convex planar polygon primitive.

use crate::geometry::{GeoPoint, Geometry, Intersectable, Surface};
use crate::{GeometryError, Plane};
use lumen_math::{align_zero, is_zero, Aabb, DVec3, Point3, Ray, Vector3};

/// A convex polygon given by its vertices in winding order.
///
/// All vertices lie in one plane. Edges and vertices are not part of the
/// polygon for intersection purposes.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
    bbox: Aabb,
}

impl Polygon {
    /// Create a polygon, validating that it is planar, convex and consistently ordered.
    pub fn new(vertices: Vec<Point3>) -> Result<Self, GeometryError> {
        let count = vertices.len();
        if count < 3 {
            return Err(GeometryError::TooFewVertices(count));
        }

        for i in 0..count {
            let j = (i + 1) % count;
            if vertices[i] == vertices[j] {
                return Err(GeometryError::CoincidentVertices(i, j));
            }
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if count > 3 {
            Self::check_convex(&vertices, plane.normal().as_dvec3())?;
        }

        let bbox = Aabb::enclosing(&vertices).ok_or(GeometryError::TooFewVertices(count))?;
        Ok(Self { vertices, plane, bbox })
    }

    fn check_convex(vertices: &[Point3], n: DVec3) -> Result<(), GeometryError> {
        let count = vertices.len();

        for (i, v) in vertices.iter().enumerate().skip(1) {
            if !is_zero((*v - vertices[0]).dot(n)) {
                return Err(GeometryError::NonPlanarVertices(i));
            }
        }

        // Every turn between consecutive edges must have the same handedness
        // relative to the plane normal.
        let mut positive = None;
        for i in 0..count {
            let prev = vertices[(i + count - 1) % count];
            let edge1 = vertices[i] - prev;
            let edge2 = vertices[(i + 1) % count] - vertices[i];

            let turn = align_zero(edge1.cross(edge2).dot(n));
            if turn == 0.0 {
                return Err(GeometryError::CollinearVertices);
            }
            match positive {
                None => positive = Some(turn > 0.0),
                Some(sign) if sign != (turn > 0.0) => return Err(GeometryError::NonConvexPolygon),
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn normal(&self) -> Vector3 {
        self.plane.normal()
    }

    /// The crossing point with the polygon interior, if any.
    pub(crate) fn intersect_point(&self, ray: &Ray) -> Option<Point3> {
        let hit = self.plane.intersect_point(ray)?;

        let origin = ray.origin();
        let dir = ray.direction().as_dvec3();
        let count = self.vertices.len();

        // The ray must pass on the same side of every edge's fan plane.
        let mut sign = None;
        for i in 0..count {
            let a = self.vertices[i] - origin;
            let b = self.vertices[(i + 1) % count] - origin;
            let product = align_zero(dir.dot(a.cross(b)));
            if product == 0.0 {
                return None;
            }
            match sign {
                None => sign = Some(product > 0.0),
                Some(s) if s != (product > 0.0) => return None,
                Some(_) => {}
            }
        }

        Some(hit)
    }
}

impl Intersectable for Polygon {
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        self.intersect_point(ray)
            .map(|p| vec![GeoPoint::new(self, p)])
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Polygon {
    fn surface(&self) -> &Surface {
        self.plane.surface()
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self.plane.surface_mut()
    }

    fn normal_at(&self, _p: Point3) -> Vector3 {
        self.plane.normal()
    }
}
