//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary median-split tree over the scene geometries. Queries return
//! exactly what a brute-force pass over every primitive would return; the
//! tree only prunes subtrees whose box the ray misses.
//!
//! Unbounded primitives (planes, tubes) have no box. Any node holding one
//! is itself unbounded and is always visited.

use crate::geometry::{GeoPoint, Geometry, GeometryList, Intersectable};
use lumen_math::{Aabb, Axis, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 2;

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Option<Aabb>,
    },
    /// Leaf node, queried by brute force.
    Leaf {
        objects: Vec<Box<dyn Geometry>>,
        bbox: Option<Aabb>,
    },
    /// Empty node (no geometries at all).
    Empty,
}

impl BvhNode {
    /// Build a BVH over a list of geometries.
    pub fn new(objects: Vec<Box<dyn Geometry>>) -> Self {
        if objects.is_empty() {
            log::info!("BVH built over an empty scene");
            return BvhNode::Empty;
        }

        let count = objects.len();
        let root = Self::build(objects);
        log::info!(
            "BVH built: {} primitives, depth {}, {} leaves",
            count,
            root.depth(),
            root.leaf_count()
        );
        root
    }

    /// Recursive construction.
    ///
    /// Sorts by the max corner of each member's box along the longest axis
    /// of the bounded members, then splits into halves of ceil(n/2) and
    /// floor(n/2).
    fn build(mut objects: Vec<Box<dyn Geometry>>) -> Self {
        let n = objects.len();
        let bbox = union_box(&objects);

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf { objects, bbox };
        }

        let axis = objects
            .iter()
            .filter_map(|o| o.bounding_box())
            .reduce(|acc, b| Aabb::surrounding(&acc, &b))
            .map_or(Axis::X, |b| b.longest_axis());

        objects.sort_by(|a, b| split_key(a.as_ref(), axis).total_cmp(&split_key(b.as_ref(), axis)));

        let mid = (n + 1) / 2;
        let right_objects = objects.split_off(mid);
        let left_objects = objects;

        let left = Self::build(left_objects);
        let right = Self::build(right_objects);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    /// Whether the ray can reach anything under this node.
    fn box_hit(&self, ray: &Ray) -> bool {
        match self {
            BvhNode::Empty => false,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => {
                bbox.map_or(true, |b| b.hit(ray))
            }
        }
    }

    /// Number of levels, a single leaf being depth 1.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// All primitives stored in the leaves.
    pub fn primitives(&self) -> Vec<&dyn Geometry> {
        match self {
            BvhNode::Empty => Vec::new(),
            BvhNode::Leaf { objects, .. } => objects.iter().map(|o| o.as_ref()).collect(),
            BvhNode::Branch { left, right, .. } => {
                let mut all = left.primitives();
                all.extend(right.primitives());
                all
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { objects, .. } => objects.len(),
            BvhNode::Branch { left, right, .. } => left.len() + right.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BvhNode::Empty)
    }
}

/// Union of the members' boxes, or `None` if any member is unbounded.
fn union_box(objects: &[Box<dyn Geometry>]) -> Option<Aabb> {
    let mut boxes = objects.iter().map(|o| o.bounding_box());
    let first = boxes.next()??;
    boxes.try_fold(first, |acc, b| Some(Aabb::surrounding(&acc, &b?)))
}

/// Sort key along `axis`; unbounded members go last.
fn split_key(object: &dyn Geometry, axis: Axis) -> f64 {
    object
        .bounding_box()
        .map_or(f64::INFINITY, |b| b.axis_interval(axis).max)
}

impl From<GeometryList> for BvhNode {
    fn from(list: GeometryList) -> Self {
        BvhNode::new(list.into_vec())
    }
}

impl Intersectable for BvhNode {
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        if !self.box_hit(ray) {
            return None;
        }

        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { objects, .. } => {
                let hits: Vec<GeoPoint<'_>> = objects
                    .iter()
                    .filter_map(|o| o.find_geo_intersections(ray))
                    .flatten()
                    .collect();
                (!hits.is_empty()).then_some(hits)
            }

            BvhNode::Branch { left, right, .. } => {
                let mut hits = Vec::new();
                for child in [left, right] {
                    if !child.box_hit(ray) {
                        continue;
                    }
                    if let Some(child_hits) = child.find_geo_intersections(ray) {
                        hits.extend(child_hits);
                    }
                }
                (!hits.is_empty()).then_some(hits)
            }
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        match self {
            BvhNode::Empty => None,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Plane, Sphere, Triangle};
    use lumen_math::{Point3, Vector3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_point(rng: &mut StdRng, extent: f64) -> Point3 {
        Point3::new(
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
        )
    }

    fn random_scene(rng: &mut StdRng, count: usize) -> Vec<Box<dyn Geometry>> {
        let mut objects: Vec<Box<dyn Geometry>> = Vec::new();
        while objects.len() < count {
            if rng.gen_bool(0.5) {
                let radius = rng.gen_range(0.2..2.0);
                if let Ok(sphere) = Sphere::new(random_point(rng, 10.0), radius) {
                    objects.push(Box::new(sphere));
                }
            } else {
                let a = random_point(rng, 10.0);
                let b = a + (random_point(rng, 2.0) - Point3::ORIGIN);
                let c = a + (random_point(rng, 2.0) - Point3::ORIGIN);
                if let Ok(triangle) = Triangle::new(a, b, c) {
                    objects.push(Box::new(triangle));
                }
            }
        }
        objects
    }

    fn same_hits(a: &[GeoPoint<'_>], b: &[GeoPoint<'_>]) -> bool {
        a.len() == b.len() && a.iter().all(|gp| b.contains(gp))
    }

    fn check_containment(node: &BvhNode) {
        if let BvhNode::Branch { left, right, bbox } = node {
            if let Some(parent) = bbox {
                for child in [left, right] {
                    let child_box = child.bounding_box().expect("bounded parent has bounded children");
                    assert!(parent.contains_box(&child_box));
                }
            }
            check_containment(left);
            check_containment(right);
        }
    }

    fn check_leaf_sizes(node: &BvhNode) {
        match node {
            BvhNode::Empty => {}
            BvhNode::Leaf { objects, .. } => {
                assert!(!objects.is_empty() && objects.len() <= LEAF_MAX_SIZE);
            }
            BvhNode::Branch { left, right, .. } => {
                check_leaf_sizes(left);
                check_leaf_sizes(right);
            }
        }
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::new(vec![]);
        assert!(bvh.is_empty());

        let ray = Ray::new(Point3::ORIGIN, -Vector3::Z);
        assert!(bvh.find_geo_intersections(&ray).is_none());
    }

    #[test]
    fn test_bvh_single_sphere() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5).unwrap();
        let bvh = BvhNode::new(vec![Box::new(sphere)]);

        assert!(matches!(bvh, BvhNode::Leaf { .. }));

        let ray = Ray::new(Point3::ORIGIN, -Vector3::Z);
        assert_eq!(bvh.find_geo_intersections(&ray).map(|h| h.len()), Some(2));
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let spheres: Vec<Box<dyn Geometry>> = (0..10)
            .map(|i| {
                let sphere = Sphere::new(Point3::new(i as f64 * 2.0, 0.0, -5.0), 0.5).unwrap();
                Box::new(sphere) as Box<dyn Geometry>
            })
            .collect();

        let bvh = BvhNode::new(spheres);
        assert_eq!(bvh.len(), 10);
        assert_eq!(bvh.leaf_count(), 6);
        check_leaf_sizes(&bvh);

        // Ray hitting the sphere at x=10
        let ray = Ray::new(Point3::new(10.0, 0.0, 0.0), -Vector3::Z);
        let hits = bvh.find_intersections(&ray).unwrap();
        assert_eq!(hits.len(), 2);

        let closest = ray.find_closest_point(&hits).unwrap();
        assert!((closest.z() - (-4.5)).abs() < 1e-9);

        // Ray passing between spheres
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), -Vector3::Z);
        assert!(bvh.find_geo_intersections(&ray).is_none());
    }

    #[test]
    fn test_bvh_split_sizes() {
        let spheres: Vec<Box<dyn Geometry>> = (0..5)
            .map(|i| Box::new(Sphere::new(Point3::new(i as f64 * 3.0, 0.0, 0.0), 1.0).unwrap()) as Box<dyn Geometry>)
            .collect();

        let bvh = BvhNode::new(spheres);
        match &bvh {
            BvhNode::Branch { left, right, .. } => {
                assert_eq!(left.len(), 3);
                assert_eq!(right.len(), 2);
            }
            _ => panic!("expected a branch"),
        }
    }

    #[test]
    fn test_bvh_unbounded_members() {
        let mut objects = random_scene(&mut StdRng::seed_from_u64(7), 6);
        objects.push(Box::new(Plane::new(Point3::new(0.0, -50.0, 0.0), Vector3::Y)));

        let bvh = BvhNode::new(objects);
        assert!(bvh.bounding_box().is_none());

        // A ray far from every bounded primitive still finds the plane
        let ray = Ray::new(Point3::new(500.0, 0.0, 500.0), -Vector3::Y);
        let hits = bvh.find_intersections(&ray).unwrap();
        assert_eq!(hits, vec![Point3::new(500.0, -50.0, 500.0)]);
    }

    #[test]
    fn test_bvh_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut objects = random_scene(&mut rng, 40);
        objects.push(Box::new(Plane::new(Point3::new(0.0, 0.0, -30.0), Vector3::Z)));

        let bvh = BvhNode::new(objects);
        let primitives = bvh.primitives();
        assert_eq!(primitives.len(), 41);

        let axis_rays = [Vector3::X, Vector3::Y, Vector3::Z, -Vector3::X, -Vector3::Y, -Vector3::Z];

        for i in 0..500 {
            let origin = random_point(&mut rng, 20.0);
            let direction = if i % 5 == 0 {
                axis_rays[i % axis_rays.len()]
            } else {
                match Vector3::try_from(random_point(&mut rng, 1.0) - Point3::ORIGIN) {
                    Ok(d) => d,
                    Err(_) => continue,
                }
            };
            let ray = Ray::new(origin, direction);

            let accelerated = bvh.find_geo_intersections(&ray).unwrap_or_default();
            let brute_force: Vec<GeoPoint<'_>> = primitives
                .iter()
                .filter_map(|p| p.find_geo_intersections(&ray))
                .flatten()
                .collect();

            assert!(
                same_hits(&accelerated, &brute_force),
                "ray {i}: {} accelerated vs {} brute force hits",
                accelerated.len(),
                brute_force.len()
            );
        }
    }

    #[test]
    fn test_bvh_box_containment() {
        let mut rng = StdRng::seed_from_u64(3);
        let bvh = BvhNode::new(random_scene(&mut rng, 64));

        check_containment(&bvh);
        check_leaf_sizes(&bvh);
        assert_eq!(bvh.len(), 64);
        assert!(bvh.depth() >= 6);
    }
}
