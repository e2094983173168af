//! Triangle primitive, a three-vertex polygon.

use crate::geometry::{GeoPoint, Geometry, Intersectable, Surface};
use crate::{GeometryError, Polygon};
use lumen_math::{Aabb, Point3, Ray, Vector3};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    polygon: Polygon,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Fails if two vertices coincide or all three are collinear.
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Result<Self, GeometryError> {
        Ok(Self {
            polygon: Polygon::new(vec![v0, v1, v2])?,
        })
    }

    pub fn vertices(&self) -> [Point3; 3] {
        let v = self.polygon.vertices();
        [v[0], v[1], v[2]]
    }
}

impl Intersectable for Triangle {
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        self.polygon
            .intersect_point(ray)
            .map(|p| vec![GeoPoint::new(self, p)])
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.polygon.bounding_box()
    }
}

impl Geometry for Triangle {
    fn surface(&self) -> &Surface {
        self.polygon.surface()
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self.polygon.surface_mut()
    }

    fn normal_at(&self, p: Point3) -> Vector3 {
        self.polygon.normal_at(p)
    }
}
