//! Scene description: geometry tree, lights, background and sampling settings.

use crate::bvh::BvhNode;
use crate::geometry::{Geometry, GeometryList};
use lumen_core::{AmbientLight, Color, LightSource};

/// Cone sampling settings shared by every glossy and diffuse material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Rays around each ring, split between the outer and inner ring.
    /// Zero traces the primary ray only.
    pub samples: u32,
    /// Blur reflections of materials with a glossy radius.
    pub glossy_enabled: bool,
    /// Blur refractions of materials with a diffuse radius.
    pub diffuse_enabled: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: 10,
            glossy_enabled: true,
            diffuse_enabled: true,
        }
    }
}

impl SamplingConfig {
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_glossy(mut self, enabled: bool) -> Self {
        self.glossy_enabled = enabled;
        self
    }

    pub fn with_diffuse(mut self, enabled: bool) -> Self {
        self.diffuse_enabled = enabled;
        self
    }
}

/// A fully assembled, read-only scene.
pub struct Scene {
    name: String,
    background: Color,
    ambient: AmbientLight,
    geometries: BvhNode,
    lights: Vec<Box<dyn LightSource>>,
    sampling: SamplingConfig,
}

impl Scene {
    /// Start assembling a scene.
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient(&self) -> &AmbientLight {
        &self.ambient
    }

    /// Root of the acceleration tree.
    pub fn geometries(&self) -> &BvhNode {
        &self.geometries
    }

    pub fn lights(&self) -> &[Box<dyn LightSource>] {
        &self.lights
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }
}

/// Collects geometries and lights; the BVH is built once in [`build`](SceneBuilder::build).
pub struct SceneBuilder {
    name: String,
    background: Color,
    ambient: AmbientLight,
    geometries: GeometryList,
    lights: Vec<Box<dyn LightSource>>,
    sampling: SamplingConfig,
}

impl SceneBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::BLACK,
            ambient: AmbientLight::default(),
            geometries: GeometryList::new(),
            lights: Vec::new(),
            sampling: SamplingConfig::default(),
        }
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn ambient(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn geometry(mut self, geometry: impl Geometry + 'static) -> Self {
        self.geometries.add(Box::new(geometry));
        self
    }

    pub fn geometries(mut self, geometries: GeometryList) -> Self {
        for geometry in geometries.into_vec() {
            self.geometries.add(geometry);
        }
        self
    }

    pub fn light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    /// Build the acceleration tree and freeze the scene.
    pub fn build(self) -> Scene {
        log::info!(
            "Building scene '{}': {} geometries, {} lights",
            self.name,
            self.geometries.len(),
            self.lights.len()
        );

        Scene {
            name: self.name,
            background: self.background,
            ambient: self.ambient,
            geometries: BvhNode::from(self.geometries),
            lights: self.lights,
            sampling: self.sampling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Intersectable;
    use crate::{Plane, Sphere};
    use lumen_core::PointLight;
    use lumen_math::{Point3, Ray, Vector3};

    #[test]
    fn test_scene_defaults() {
        let scene = Scene::builder("empty").build();

        assert_eq!(scene.name(), "empty");
        assert_eq!(scene.background(), Color::BLACK);
        assert_eq!(scene.ambient().intensity(), Color::BLACK);
        assert!(scene.geometries().is_empty());
        assert!(scene.lights().is_empty());
        assert_eq!(*scene.sampling(), SamplingConfig::default());
    }

    #[test]
    fn test_scene_builder() {
        let mut extra = GeometryList::new();
        extra.add(Box::new(Plane::new(Point3::new(0.0, -1.0, 0.0), Vector3::Y)));

        let scene = Scene::builder("test")
            .background(Color::new(10.0, 20.0, 30.0))
            .ambient(AmbientLight::new(Color::WHITE, 0.1))
            .geometry(Sphere::new(Point3::new(0.0, 0.0, -3.0), 1.0).unwrap())
            .geometries(extra)
            .light(PointLight::new(Color::WHITE, Point3::new(0.0, 5.0, 0.0)))
            .sampling(SamplingConfig::default().with_samples(0).with_glossy(false))
            .build();

        assert_eq!(scene.geometries().len(), 2);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.sampling().samples, 0);
        assert!(!scene.sampling().glossy_enabled);
        assert!(scene.sampling().diffuse_enabled);

        let ray = Ray::new(Point3::ORIGIN, -Vector3::Z);
        assert_eq!(scene.geometries().find_intersections(&ray).map(|h| h.len()), Some(2));
    }
}
