//! Error types for scene construction and rendering.
//!
//! Tracing itself never fails: misses and numeric edge cases simply produce
//! no contribution. Everything here is raised before the first ray is cast.

use lumen_math::MathError;
use thiserror::Error;

/// Errors raised while constructing geometries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("Height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("A polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("Consecutive vertices {0} and {1} coincide")]
    CoincidentVertices(usize, usize),

    #[error("Vertices are collinear")]
    CollinearVertices,

    #[error("Vertex {0} does not lie in the polygon plane")]
    NonPlanarVertices(usize),

    #[error("Vertices must be ordered and the polygon must be convex")]
    NonConvexPolygon,

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Errors raised while configuring or using the camera.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("Camera forward and up vectors are not orthogonal")]
    NotOrthogonal,

    #[error("View plane size must be positive, got {width}x{height}")]
    NonPositiveViewPlane { width: f64, height: f64 },

    #[error("View plane distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("Pixel grid is degenerate: {nx}x{ny}")]
    DegenerateGrid { nx: u32, ny: u32 },

    #[error("Pixel ({j}, {i}) is outside the {nx}x{ny} grid")]
    PixelOutOfRange { j: u32, i: u32, nx: u32, ny: u32 },

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Errors raised by the render driver.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render is missing a camera")]
    MissingCamera,

    #[error("Render is missing an image writer")]
    MissingImageWriter,

    #[error("Render is missing a ray tracer")]
    MissingTracer,

    #[error("Grid interval must be positive")]
    InvalidGridInterval,

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
