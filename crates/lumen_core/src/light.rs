//! Light sources.
//!
//! Ambient light is a scene-wide constant and is kept apart from the
//! positional sources, which all implement [`LightSource`].

use lumen_math::{Point3, Vector3};

use crate::{Color, CoreError};

/// A light that illuminates points from a direction.
pub trait LightSource: Send + Sync {
    /// Light intensity arriving at `p`.
    fn intensity_at(&self, p: Point3) -> Color;

    /// Unit vector from the light toward `p`.
    ///
    /// `None` when the direction is undefined (`p` sits on the light).
    fn direction_from(&self, p: Point3) -> Option<Vector3>;

    /// Distance from `p` to the light, infinite for directional lights.
    fn distance_to(&self, p: Point3) -> f64;
}

/// Constant fill light added to every visible point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// Ambient light of `color` scaled by the strength factor `ka`.
    pub fn new(color: Color, ka: f64) -> Self {
        Self {
            intensity: color.scale(ka),
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

/// A light infinitely far away, shining in a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector3) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _p: Point3) -> Color {
        self.intensity
    }

    fn direction_from(&self, _p: Point3) -> Option<Vector3> {
        Some(self.direction)
    }

    fn distance_to(&self, _p: Point3) -> f64 {
        f64::INFINITY
    }
}

/// An omnidirectional light with distance attenuation.
///
/// Intensity at distance `d` is `color / (kc + kl*d + kq*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Point3,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light with no attenuation (`kc = 1`).
    pub fn new(intensity: Color, position: Point3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Set the constant, linear and quadratic attenuation factors.
    ///
    /// All factors must be non-negative and at least one must be positive.
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Result<Self, CoreError> {
        let valid = [kc, kl, kq].iter().all(|k| *k >= 0.0 && k.is_finite()) && kc + kl + kq > 0.0;
        if !valid {
            return Err(CoreError::InvalidAttenuation { kc, kl, kq });
        }
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        Ok(self)
    }

    pub fn position(&self) -> Point3 {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, p: Point3) -> Color {
        let d = self.position.distance(p);
        self.intensity.reduce(self.kc + self.kl * d + self.kq * d * d)
    }

    fn direction_from(&self, p: Point3) -> Option<Vector3> {
        p.subtract(self.position).ok().map(|l| l.normalize())
    }

    fn distance_to(&self, p: Point3) -> f64 {
        self.position.distance(p)
    }
}

/// A point light restricted to a cone around `axis`, with cosine falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    axis: Vector3,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point3, axis: Vector3) -> Self {
        Self {
            point: PointLight::new(intensity, position),
            axis: axis.normalize(),
        }
    }

    /// Set the constant, linear and quadratic attenuation factors.
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Result<Self, CoreError> {
        self.point = self.point.with_attenuation(kc, kl, kq)?;
        Ok(self)
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, p: Point3) -> Color {
        let falloff = match self.direction_from(p) {
            Some(l) => l.dot(self.axis).max(0.0),
            None => 0.0,
        };
        self.point.intensity_at(p).scale(falloff)
    }

    fn direction_from(&self, p: Point3) -> Option<Vector3> {
        self.point.direction_from(p)
    }

    fn distance_to(&self, p: Point3) -> f64 {
        self.point.distance_to(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_light() {
        let ambient = AmbientLight::new(Color::new(255.0, 191.0, 191.0), 0.1);
        assert!(ambient.intensity().abs_diff_eq(Color::new(25.5, 19.1, 19.1), 1e-9));
        assert_eq!(AmbientLight::default().intensity(), Color::BLACK);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::new(100.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -2.0).unwrap());
        let p = Point3::new(5.0, 5.0, 5.0);

        assert_eq!(light.intensity_at(p), Color::new(100.0, 0.0, 0.0));
        assert_eq!(light.direction_from(p), Some(Vector3::new(0.0, 0.0, -1.0).unwrap()));
        assert_eq!(light.distance_to(p), f64::INFINITY);
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Color::new(100.0, 100.0, 100.0), Point3::ORIGIN)
            .with_attenuation(1.0, 1.0, 1.0)
            .unwrap();
        let p = Point3::new(0.0, 0.0, 2.0);

        // 100 / (1 + 2 + 4)
        assert!(light.intensity_at(p).abs_diff_eq(Color::new(100.0 / 7.0, 100.0 / 7.0, 100.0 / 7.0), 1e-9));
        assert_eq!(light.direction_from(p), Some(Vector3::Z));
        assert_eq!(light.distance_to(p), 2.0);
    }

    #[test]
    fn test_attenuation_validation() {
        let light = PointLight::new(Color::WHITE, Point3::ORIGIN);

        assert_eq!(
            light.with_attenuation(0.0, 0.0, 0.0),
            Err(CoreError::InvalidAttenuation { kc: 0.0, kl: 0.0, kq: 0.0 })
        );
        assert!(light.with_attenuation(1.0, -0.5, 0.0).is_err());

        // Purely quadratic falloff is fine
        let quadratic = light.with_attenuation(0.0, 0.0, 1.0).unwrap();
        assert!(quadratic
            .intensity_at(Point3::new(0.0, 0.0, 5.0))
            .abs_diff_eq(Color::WHITE.reduce(25.0), 1e-9));

        let spot = SpotLight::new(Color::WHITE, Point3::ORIGIN, Vector3::Z);
        assert!(spot.with_attenuation(0.0, 0.0, 0.0).is_err());
        assert!(spot.with_attenuation(1.0, 0.1, 0.0).is_ok());
    }

    #[test]
    fn test_point_light_at_its_own_position() {
        let light = PointLight::new(Color::WHITE, Point3::ORIGIN);
        assert_eq!(light.direction_from(Point3::ORIGIN), None);
    }

    #[test]
    fn test_spot_light_falloff() {
        let light = SpotLight::new(Color::new(100.0, 100.0, 100.0), Point3::ORIGIN, Vector3::Z);

        // On the axis: full intensity
        let on_axis = light.intensity_at(Point3::new(0.0, 0.0, 3.0));
        assert!(on_axis.abs_diff_eq(Color::new(100.0, 100.0, 100.0), 1e-9));

        // 60 degrees off the axis: half intensity
        let p = Point3::new(3f64.sqrt(), 0.0, 1.0);
        assert!(light.intensity_at(p).abs_diff_eq(Color::new(50.0, 50.0, 50.0), 1e-9));

        // Behind the light: nothing
        assert_eq!(light.intensity_at(Point3::new(0.0, 0.0, -3.0)), Color::BLACK);
    }
}
