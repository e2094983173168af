//! Surface material coefficients.

use crate::CoreError;

/// Reflectance coefficients of a surface.
///
/// - `kd`: diffuse
/// - `ks`: specular
/// - `kt`: transparency
/// - `kr`: reflectivity
///
/// The coefficients are not required to sum to 1 or less; that is left to
/// the scene author.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    kd: f64,
    ks: f64,
    kt: f64,
    kr: f64,
    shininess: u32,
    glossy_radius: f64,
    diffuse_radius: f64,
}

impl Material {
    /// Start building a material. Everything defaults to zero.
    pub fn builder() -> MaterialBuilder {
        MaterialBuilder::default()
    }

    #[inline]
    pub fn kd(&self) -> f64 {
        self.kd
    }

    #[inline]
    pub fn ks(&self) -> f64 {
        self.ks
    }

    #[inline]
    pub fn kt(&self) -> f64 {
        self.kt
    }

    #[inline]
    pub fn kr(&self) -> f64 {
        self.kr
    }

    #[inline]
    pub fn shininess(&self) -> u32 {
        self.shininess
    }

    /// Cone radius used to blur reflections.
    #[inline]
    pub fn glossy_radius(&self) -> f64 {
        self.glossy_radius
    }

    /// Cone radius used to blur refractions.
    #[inline]
    pub fn diffuse_radius(&self) -> f64 {
        self.diffuse_radius
    }
}

/// Builder for [`Material`], validated on [`build`](MaterialBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct MaterialBuilder {
    material: Material,
}

impl MaterialBuilder {
    pub fn kd(mut self, kd: f64) -> Self {
        self.material.kd = kd;
        self
    }

    pub fn ks(mut self, ks: f64) -> Self {
        self.material.ks = ks;
        self
    }

    pub fn kt(mut self, kt: f64) -> Self {
        self.material.kt = kt;
        self
    }

    pub fn kr(mut self, kr: f64) -> Self {
        self.material.kr = kr;
        self
    }

    pub fn shininess(mut self, shininess: u32) -> Self {
        self.material.shininess = shininess;
        self
    }

    pub fn glossy_radius(mut self, radius: f64) -> Self {
        self.material.glossy_radius = radius;
        self
    }

    pub fn diffuse_radius(mut self, radius: f64) -> Self {
        self.material.diffuse_radius = radius;
        self
    }

    /// Validate and produce the material.
    pub fn build(self) -> Result<Material, CoreError> {
        let m = self.material;

        for (name, value) in [("kD", m.kd), ("kS", m.ks), ("kT", m.kt), ("kR", m.kr)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidCoefficient { name, value });
            }
        }
        for (name, value) in [("glossy", m.glossy_radius), ("diffuse", m.diffuse_radius)] {
            if value < 0.0 || value.is_nan() {
                return Err(CoreError::NegativeRadius { name, value });
            }
        }

        let total = m.kd + m.ks + m.kt + m.kr;
        if total > 1.0 {
            log::debug!("Material coefficients sum to {:.3}, surface may gain energy", total);
        }

        Ok(m)
    }
}
