// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod error;
mod interval;
mod ray;
mod tolerance;
mod vector;

pub use aabb::{Aabb, Axis, AABB_PADDING};
pub use error::MathError;
pub use interval::Interval;
pub use ray::{Ray, RAY_OFFSET};
pub use tolerance::{align_zero, is_zero, EPSILON};
pub use vector::{Point3, Vector3};
