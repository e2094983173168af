//! Lumen renderer - recursive ray tracing
//!
//! Geometries and the intersection protocol, the BVH built over them, the
//! Whitted-style shading engine with glossy/diffuse cone sampling, and the
//! camera/bucket/image plumbing that drives it over a whole image.

mod error;
mod geometry;
mod sphere;
mod plane;
mod polygon;
mod triangle;
mod tube;
mod bvh;
mod scene;
mod tracer;
mod camera;
mod image_writer;
mod bucket;
mod renderer;

pub use error::{CameraError, GeometryError, RenderError};
pub use geometry::{find_closest_geo_point, GeoPoint, Geometry, GeometryList, Intersectable, Surface};
pub use sphere::Sphere;
pub use plane::Plane;
pub use polygon::Polygon;
pub use triangle::Triangle;
pub use tube::{Cylinder, Tube};
pub use bvh::BvhNode;
pub use scene::{SamplingConfig, Scene, SceneBuilder};
pub use tracer::{RayTracer, TraceStats, Tracer, TracerConfig};
pub use camera::Camera;
pub use image_writer::ImageWriter;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use renderer::{Render, RenderConfig};

/// Re-export the data model and math types used throughout the API
pub use lumen_core::{
    AmbientLight, Color, CoreError, DirectionalLight, LightSource, Material, MaterialBuilder,
    PointLight, SpotLight,
};
pub use lumen_math::{Aabb, Point3, Ray, Vector3};
