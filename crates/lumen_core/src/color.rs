//! Linear RGB color.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use lumen_math::DVec3;

/// A non-negative linear RGB triple.
///
/// Channels use 255 as full intensity. Colors are unbounded while tracing;
/// clamping to the displayable range happens only when a pixel is written out.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color(DVec3);

impl Color {
    pub const BLACK: Color = Color(DVec3::ZERO);
    pub const WHITE: Color = Color(DVec3::splat(255.0));

    /// Create a new color. Negative components are raised to zero.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self(DVec3::new(r, g, b).max(DVec3::ZERO))
    }

    /// Create a color from 8-bit channels (0-255).
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64, g as f64, b as f64)
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    /// Uniformly scale every channel by `k` (negative factors give black).
    pub fn scale(&self, k: f64) -> Color {
        Color((self.0 * k).max(DVec3::ZERO))
    }

    /// Divide every channel by `k`.
    pub fn reduce(&self, k: f64) -> Color {
        self.scale(1.0 / k)
    }

    /// Componentwise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: Color, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }

    /// Convert to 8-bit RGB, treating 255 as full intensity.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.0.clamp(DVec3::ZERO, DVec3::splat(255.0));
        [c.x as u8, c.y as u8, c.z as u8]
    }
}

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, k: f64) -> Color {
        self.scale(k)
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::BLACK, |acc, c| acc + c)
    }
}
