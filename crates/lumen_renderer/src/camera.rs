//! Pinhole camera for ray generation.

use crate::CameraError;
use lumen_math::{is_zero, Point3, Ray, Vector3};

/// Camera with an eye point, an orthonormal basis and a view plane.
///
/// The view plane is centered on the forward axis at `distance` from the
/// eye. Rays go from the eye through pixel centers of an `nx` by `ny` grid
/// laid over the view plane, row `i = 0` at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Point3,
    v_to: Vector3,
    v_up: Vector3,
    v_right: Vector3,

    // View plane
    width: f64,
    height: f64,
    distance: f64,
}

impl Camera {
    /// Create a camera at `position` looking along `v_to`.
    ///
    /// `v_to` and `v_up` must be orthogonal. The view plane defaults to
    /// 1x1 at distance 1.
    pub fn new(position: Point3, v_to: Vector3, v_up: Vector3) -> Result<Self, CameraError> {
        if !is_zero(v_to.dot(v_up)) {
            return Err(CameraError::NotOrthogonal);
        }

        let v_to = v_to.normalize();
        let v_up = v_up.normalize();
        let v_right = v_to.cross(v_up)?.normalize();

        Ok(Self {
            position,
            v_to,
            v_up,
            v_right,
            width: 1.0,
            height: 1.0,
            distance: 1.0,
        })
    }

    /// Set the view plane size.
    pub fn with_view_plane(mut self, width: f64, height: f64) -> Result<Self, CameraError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(CameraError::NonPositiveViewPlane { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Set the distance from the eye to the view plane.
    pub fn with_distance(mut self, distance: f64) -> Result<Self, CameraError> {
        if !(distance > 0.0) {
            return Err(CameraError::NonPositiveDistance(distance));
        }
        self.distance = distance;
        Ok(self)
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn v_to(&self) -> Vector3 {
        self.v_to
    }

    pub fn v_up(&self) -> Vector3 {
        self.v_up
    }

    pub fn v_right(&self) -> Vector3 {
        self.v_right
    }

    /// Ray from the eye through the center of pixel `(j, i)` (column, row).
    pub fn construct_ray(&self, nx: u32, ny: u32, j: u32, i: u32) -> Result<Ray, CameraError> {
        if nx == 0 || ny == 0 {
            return Err(CameraError::DegenerateGrid { nx, ny });
        }
        if j >= nx || i >= ny {
            return Err(CameraError::PixelOutOfRange { j, i, nx, ny });
        }

        let center = self.position + self.v_to.as_dvec3() * self.distance;

        let pixel_width = self.width / nx as f64;
        let pixel_height = self.height / ny as f64;
        let x = (j as f64 - (nx - 1) as f64 / 2.0) * pixel_width;
        let y = -(i as f64 - (ny - 1) as f64 / 2.0) * pixel_height;

        let pixel = center + self.v_right.as_dvec3() * x + self.v_up.as_dvec3() * y;
        Ok(Ray::new(self.position, pixel.subtract(self.position)?))
    }
}
