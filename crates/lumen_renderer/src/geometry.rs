//! Intersectable and Geometry traits, and the GeoPoint intersection record.

use std::fmt;

use lumen_core::{Color, Material};
use lumen_math::{Aabb, Point3, Ray, Vector3};

/// Emission and material shared by every geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub emission: Color,
    pub material: Material,
}

/// An intersection point tagged with the geometry it lies on.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    pub geometry: &'a dyn Geometry,
    pub point: Point3,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: Point3) -> Self {
        Self { geometry, point }
    }

    /// Surface normal of the owning geometry at this point.
    pub fn normal(&self) -> Vector3 {
        self.geometry.normal_at(self.point)
    }
}

/// Two GeoPoints are equal when they lie on the same geometry instance at
/// the same point.
impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.geometry, other.geometry) && self.point == other.point
    }
}

impl fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoPoint")
            .field("geometry", &self.geometry)
            .field("point", &self.point)
            .finish()
    }
}

/// Trait for anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// All intersections of the ray with this object, in no particular order.
    ///
    /// Returns `None` when there is no intersection, never an empty vector.
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>>;

    /// The axis-aligned bounding box, or `None` for unbounded shapes.
    fn bounding_box(&self) -> Option<Aabb>;

    /// Intersection points without their geometry.
    fn find_intersections(&self, ray: &Ray) -> Option<Vec<Point3>> {
        self.find_geo_intersections(ray)
            .map(|points| points.into_iter().map(|gp| gp.point).collect())
    }
}

/// A renderable shape: an intersectable surface with emission and material.
pub trait Geometry: Intersectable + fmt::Debug {
    fn surface(&self) -> &Surface;

    fn surface_mut(&mut self) -> &mut Surface;

    /// Unit normal at a point on the surface.
    fn normal_at(&self, p: Point3) -> Vector3;

    fn emission(&self) -> Color {
        self.surface().emission
    }

    fn material(&self) -> &Material {
        &self.surface().material
    }

    /// Set the emitted color.
    fn with_emission(mut self, emission: Color) -> Self
    where
        Self: Sized,
    {
        self.surface_mut().emission = emission;
        self
    }

    /// Set the material.
    fn with_material(mut self, material: Material) -> Self
    where
        Self: Sized,
    {
        self.surface_mut().material = material;
        self
    }
}

/// The GeoPoint nearest to the ray origin.
pub fn find_closest_geo_point<'a>(ray: &Ray, points: &[GeoPoint<'a>]) -> Option<GeoPoint<'a>> {
    let origin = ray.origin();
    points.iter().copied().min_by(|a, b| {
        origin
            .distance_squared(a.point)
            .total_cmp(&origin.distance_squared(b.point))
    })
}

/// A flat list of geometries, queried by brute force.
///
/// This is the aggregate the acceleration tree is built from.
#[derive(Default)]
pub struct GeometryList {
    objects: Vec<Box<dyn Geometry>>,
}

impl GeometryList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Add a geometry to the list.
    pub fn add(&mut self, object: Box<dyn Geometry>) {
        self.objects.push(object);
    }

    /// Get the number of geometries.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Geometry> {
        self.objects.iter().map(|o| o.as_ref())
    }

    pub fn into_vec(self) -> Vec<Box<dyn Geometry>> {
        self.objects
    }
}

impl From<Vec<Box<dyn Geometry>>> for GeometryList {
    fn from(objects: Vec<Box<dyn Geometry>>) -> Self {
        Self { objects }
    }
}

impl Intersectable for GeometryList {
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let hits: Vec<GeoPoint<'_>> = self
            .objects
            .iter()
            .filter_map(|o| o.find_geo_intersections(ray))
            .flatten()
            .collect();

        (!hits.is_empty()).then_some(hits)
    }

    /// Union of the members' boxes; `None` if any member is unbounded.
    fn bounding_box(&self) -> Option<Aabb> {
        let mut boxes = self.objects.iter().map(|o| o.bounding_box());
        let first = boxes.next()??;
        boxes.try_fold(first, |acc, b| Some(Aabb::surrounding(&acc, &b?)))
    }
}
