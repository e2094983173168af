//! In-memory image buffer with PNG output.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgb, RgbImage};
use lumen_core::Color;

use crate::RenderError;

/// A named `nx` by `ny` image of linear colors.
///
/// Colors are stored unclamped and converted to 8-bit only when the
/// image is encoded.
#[derive(Debug, Clone)]
pub struct ImageWriter {
    name: String,
    nx: u32,
    ny: u32,
    pixels: Vec<Color>,
    output_dir: PathBuf,
}

impl ImageWriter {
    /// Create a black image. It is written to `<name>.png` in the current directory.
    pub fn new(name: impl Into<String>, nx: u32, ny: u32) -> Self {
        Self {
            name: name.into(),
            nx,
            ny,
            pixels: vec![Color::BLACK; (nx as usize) * (ny as usize)],
            output_dir: PathBuf::from("."),
        }
    }

    /// Write the image into `dir` instead of the current directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nx(&self) -> u32 {
        self.nx
    }

    pub fn ny(&self) -> u32 {
        self.ny
    }

    /// Set pixel `(x, y)`; writes outside the image are ignored.
    pub fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.nx && y < self.ny).then(|| y as usize * self.nx as usize + x as usize)
    }

    /// Convert to an 8-bit RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.nx, self.ny, |x, y| {
            let color = self.pixels[y as usize * self.nx as usize + x as usize];
            Rgb(color.to_rgb8())
        })
    }

    /// Full path of the output file.
    pub fn path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.png", self.name))
    }

    /// Encode the image as PNG and write it out. Returns the path written.
    pub fn write_to_image(&self) -> Result<PathBuf, RenderError> {
        let path = self.path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.save(&path)?;
        log::info!("Wrote {}x{} image to {}", self.nx, self.ny, path.display());
        Ok(path)
    }

    fn save(&self, path: &Path) -> Result<(), RenderError> {
        self.to_rgb_image().save(path)?;
        Ok(())
    }
}
