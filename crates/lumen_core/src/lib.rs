//! Lumen Core - light and material data model.
//!
//! This crate provides:
//!
//! - **Color**: linear RGB radiance values
//! - **Materials**: reflectance coefficients and glossy/diffuse radii
//! - **Lights**: ambient fill plus directional, point and spot light sources

pub mod color;
pub mod error;
pub mod light;
pub mod material;

// Re-export commonly used types
pub use color::Color;
pub use error::CoreError;
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{Material, MaterialBuilder};
