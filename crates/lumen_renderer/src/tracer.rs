//! Recursive shading engine.
//!
//! Colors are computed Whitted-style: emission plus direct diffuse/specular
//! lighting (attenuated by transparent occluders), plus reflection and
//! refraction traced recursively while the recursion budget and the running
//! attenuation `k` remain significant. Reflections and refractions of
//! materials with a glossy/diffuse radius are averaged over two concentric
//! rings of extra rays.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::geometry::{find_closest_geo_point, GeoPoint, Intersectable};
use crate::scene::Scene;
use lumen_core::{Color, LightSource};
use lumen_math::{align_zero, is_zero, DVec3, Point3, Ray, Vector3};

/// Recursion limits of the shading engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerConfig {
    /// Recursion levels available to a camera ray (1 = local lighting only).
    pub max_level: u32,
    /// Contributions whose attenuation drops below this are skipped.
    pub min_k: f64,
    /// Attenuation of a camera ray.
    pub initial_k: f64,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_level: 10,
            min_k: 0.001,
            initial_k: 1.0,
        }
    }
}

impl TracerConfig {
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_min_k(mut self, min_k: f64) -> Self {
        self.min_k = min_k;
        self
    }
}

/// Anything that can turn a camera ray into a color.
pub trait Tracer: Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;

    /// Counters gathered while tracing, if the tracer keeps any.
    fn stats(&self) -> Option<&TraceStats> {
        None
    }
}

/// Lock-free ray counters, shared by all render threads.
#[derive(Debug, Default)]
pub struct TraceStats {
    primary: AtomicU64,
    secondary: AtomicU64,
    shadow: AtomicU64,
    max_depth: AtomicU32,
}

impl TraceStats {
    pub fn primary_rays(&self) -> u64 {
        self.primary.load(Ordering::Relaxed)
    }

    /// Reflection, refraction and cone sample rays.
    pub fn secondary_rays(&self) -> u64 {
        self.secondary.load(Ordering::Relaxed)
    }

    pub fn shadow_rays(&self) -> u64 {
        self.shadow.load(Ordering::Relaxed)
    }

    /// Deepest recursion level reached, a camera ray hit being depth 1.
    pub fn max_depth(&self) -> u32 {
        self.max_depth.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.primary.store(0, Ordering::Relaxed);
        self.secondary.store(0, Ordering::Relaxed);
        self.shadow.store(0, Ordering::Relaxed);
        self.max_depth.store(0, Ordering::Relaxed);
    }
}

/// The recursive ray tracer over a read-only scene.
pub struct RayTracer<'s> {
    scene: &'s Scene,
    config: TracerConfig,
    stats: TraceStats,
}

impl<'s> RayTracer<'s> {
    pub fn new(scene: &'s Scene) -> Self {
        Self {
            scene,
            config: TracerConfig::default(),
            stats: TraceStats::default(),
        }
    }

    pub fn with_config(mut self, config: TracerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    fn find_closest(&self, ray: &Ray) -> Option<GeoPoint<'s>> {
        let hits = self.scene.geometries().find_geo_intersections(ray)?;
        find_closest_geo_point(ray, &hits)
    }

    /// Emission plus local lighting, plus global effects while `level > 1`.
    fn color_at(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: f64) -> Color {
        let depth = self.config.max_level.saturating_sub(level) + 1;
        self.stats.max_depth.fetch_max(depth, Ordering::Relaxed);

        let color = gp.geometry.emission() + self.local_effects(gp, ray, k);
        if level <= 1 {
            return color;
        }
        color + self.global_effects(gp, ray.direction(), level, k)
    }

    fn local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, k: f64) -> Color {
        let v = ray.direction();
        let n = gp.normal();
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return Color::BLACK;
        }

        let material = gp.geometry.material();
        let mut color = Color::BLACK;

        for light in self.scene.lights() {
            let Some(l) = light.direction_from(gp.point) else {
                continue;
            };

            // Light and viewer must be on the same side of the surface
            let nl = align_zero(n.dot(l));
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(light.as_ref(), l, n, gp);
            if ktr * k <= self.config.min_k {
                continue;
            }

            let intensity = light.intensity_at(gp.point).scale(ktr);
            color += diffuse(material.kd(), l, n, intensity);
            color += specular(material.ks(), l, n, v, material.shininess(), intensity);
        }

        color
    }

    /// Fraction of the light reaching `gp` through the occluders in between.
    ///
    /// 1.0 is fully lit, 0.0 fully shadowed.
    fn transparency(&self, light: &dyn LightSource, l: Vector3, n: Vector3, gp: &GeoPoint<'_>) -> f64 {
        self.stats.shadow.fetch_add(1, Ordering::Relaxed);

        let light_ray = Ray::with_normal_offset(gp.point, -l, n);
        let Some(hits) = self.scene.geometries().find_geo_intersections(&light_ray) else {
            return 1.0;
        };

        let light_distance = light.distance_to(gp.point);
        let mut ktr = 1.0;
        for hit in hits {
            if align_zero(hit.point.distance(gp.point) - light_distance) <= 0.0 {
                ktr *= hit.geometry.material().kt();
                if ktr < self.config.min_k {
                    return 0.0;
                }
            }
        }
        ktr
    }

    fn global_effects(&self, gp: &GeoPoint<'_>, v: Vector3, level: u32, k: f64) -> Color {
        let n = gp.normal();
        let material = gp.geometry.material();
        let sampling = self.scene.sampling();
        let mut color = Color::BLACK;

        let kr = material.kr();
        let kkr = k * kr;
        if kkr > self.config.min_k {
            if let Some(reflected) = reflected_ray(gp.point, v, n) {
                let radius = material.glossy_radius();
                color += if !sampling.glossy_enabled || is_zero(radius) {
                    self.global_effect(&reflected, level, kr, kkr)
                } else {
                    self.cone_sample(&reflected, radius, level, kr, kkr)
                };
            }
        }

        let kt = material.kt();
        let kkt = k * kt;
        if kkt > self.config.min_k {
            let refracted = refracted_ray(gp.point, v, n);
            let radius = material.diffuse_radius();
            color += if !sampling.diffuse_enabled || is_zero(radius) {
                self.global_effect(&refracted, level, kt, kkt)
            } else {
                self.cone_sample(&refracted, radius, level, kt, kkt)
            };
        }

        color
    }

    /// Color carried back by one secondary ray, scaled by its coefficient `kx`.
    fn global_effect(&self, ray: &Ray, level: u32, kx: f64, kkx: f64) -> Color {
        self.stats.secondary.fetch_add(1, Ordering::Relaxed);

        let color = match self.find_closest(ray) {
            Some(gp) => self.color_at(&gp, ray, level - 1, kkx),
            None => self.scene.background(),
        };
        color.scale(kx)
    }

    /// Average of the primary secondary ray and rays aimed at two rings of
    /// `radius` and `radius / 2` around its hit point.
    fn cone_sample(&self, ray: &Ray, radius: f64, level: u32, kx: f64, kkx: f64) -> Color {
        let mut color = self.global_effect(ray, level, kx, kkx);

        let Some(target) = self.find_closest(ray) else {
            return color;
        };

        let vertex_count = self.scene.sampling().samples.div_ceil(2);
        let origin = ray.origin();
        let mut samples = 1u32;

        for vertex in ring_vertices(target.point, radius, vertex_count, ray.direction()) {
            let Ok(direction) = vertex.subtract(origin) else {
                continue;
            };
            color += self.global_effect(&Ray::new(origin, direction), level, kx, kkx);
            samples += 1;
        }

        color.reduce(samples as f64)
    }
}

impl Tracer for RayTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> Color {
        self.stats.primary.fetch_add(1, Ordering::Relaxed);

        match self.find_closest(ray) {
            Some(gp) => {
                self.color_at(&gp, ray, self.config.max_level, self.config.initial_k)
                    + self.scene.ambient().intensity()
            }
            None => self.scene.background(),
        }
    }

    fn stats(&self) -> Option<&TraceStats> {
        Some(&self.stats)
    }
}

fn diffuse(kd: f64, l: Vector3, n: Vector3, intensity: Color) -> Color {
    intensity.scale(kd * l.dot(n).abs())
}

/// Phong highlight: `ks * max(0, -v.r)^shininess` with `r = l - 2(l.n)n`.
fn specular(ks: f64, l: Vector3, n: Vector3, v: Vector3, shininess: u32, intensity: Color) -> Color {
    let r = (l.as_dvec3() - n.as_dvec3() * (2.0 * l.dot(n))).normalize_or_zero();
    let vr = (-v.as_dvec3().dot(r)).max(0.0);
    intensity.scale(ks * vr.powf(f64::from(shininess)))
}

/// Mirror reflection of `v` about `n`, leaving from the side `v` came from.
fn reflected_ray(point: Point3, v: Vector3, n: Vector3) -> Option<Ray> {
    let direction = v.as_dvec3() - n.as_dvec3() * (2.0 * v.dot(n));
    let direction = Vector3::try_from(direction).ok()?;
    Some(Ray::with_normal_offset(point, direction.normalize(), n))
}

/// Straight-through continuation of `v`, leaving from the far side of the surface.
fn refracted_ray(point: Point3, v: Vector3, n: Vector3) -> Ray {
    Ray::with_normal_offset(point, v, n)
}

/// A unit vector perpendicular to `axis`.
///
/// Solves `a*x + b*y + c*z = 0` around whichever component is zero, or
/// fixes `a = b = 1` when none is.
fn find_perpendicular(axis: Vector3) -> DVec3 {
    let (x, y, z) = (axis.x(), axis.y(), axis.z());

    let perpendicular = if is_zero(x) {
        DVec3::new(1.0, z, -y)
    } else if is_zero(y) {
        DVec3::new(z, 1.0, -x)
    } else if is_zero(z) {
        DVec3::new(y, -x, 1.0)
    } else {
        DVec3::new(1.0, 1.0, -(x + y) / z)
    };
    perpendicular.normalize()
}

/// Vertices of two regular polygons around `center` in the plane normal to
/// `axis`: `count` on the outer ring of `radius`, `count` on the inner ring
/// of half that radius.
fn ring_vertices(center: Point3, radius: f64, count: u32, axis: Vector3) -> Vec<Point3> {
    if count == 0 {
        return Vec::new();
    }

    let to_rotate = find_perpendicular(axis);
    let cross = axis.as_dvec3().cross(to_rotate);
    let step = TAU / count as f64;

    let mut vertices = Vec::with_capacity(2 * count as usize);
    for i in 0..count {
        let angle = step * i as f64;
        let spoke = to_rotate * align_zero(angle.cos()) + cross * align_zero(angle.sin());
        vertices.push(center + spoke * radius);
        vertices.push(center + spoke * (radius / 2.0));
    }
    vertices
}
