//! Render driver: owns the pixel loop and the output image.
//!
//! The image is split into spiral-ordered buckets which are traced in
//! parallel with rayon. Every bucket covers a disjoint set of pixels, so
//! results are copied into the image once all buckets finish.

use std::path::PathBuf;
use std::time::Instant;

use lumen_core::Color;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Camera, CameraError, ImageWriter, RenderError, Tracer};

/// Render driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Trace buckets on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

impl RenderConfig {
    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Ties a camera, a tracer and an image writer together.
///
/// Parts are set with the `with_*` methods; each operation fails with a
/// `Missing*` error if a part it needs has not been set.
#[derive(Default)]
pub struct Render<'a> {
    camera: Option<Camera>,
    image_writer: Option<ImageWriter>,
    tracer: Option<&'a dyn Tracer>,
    config: RenderConfig,
}

impl<'a> Render<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_image_writer(mut self, image_writer: ImageWriter) -> Self {
        self.image_writer = Some(image_writer);
        self
    }

    pub fn with_tracer(mut self, tracer: &'a dyn Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn image_writer(&self) -> Option<&ImageWriter> {
        self.image_writer.as_ref()
    }

    /// Trace one ray per pixel and store the colors in the image writer.
    pub fn render_image(&mut self) -> Result<(), RenderError> {
        let image_writer = self.image_writer.as_mut().ok_or(RenderError::MissingImageWriter)?;
        let camera = self.camera.as_ref().ok_or(RenderError::MissingCamera)?;
        let tracer = self.tracer.ok_or(RenderError::MissingTracer)?;

        let (nx, ny) = (image_writer.nx(), image_writer.ny());
        if nx == 0 || ny == 0 {
            return Err(CameraError::DegenerateGrid { nx, ny }.into());
        }

        let buckets = generate_buckets(nx, ny, self.config.bucket_size);
        log::info!(
            "Rendering '{}' at {}x{} in {} buckets ({})",
            image_writer.name(),
            nx,
            ny,
            buckets.len(),
            if self.config.parallel { "parallel" } else { "serial" }
        );

        if let Some(stats) = tracer.stats() {
            stats.reset();
        }

        let start = Instant::now();
        let trace = |bucket: &Bucket| {
            let result = render_bucket(bucket, camera, tracer, nx, ny);
            if let Ok(done) = &result {
                log::debug!("Bucket {} done ({} pixels)", done.bucket.index, done.pixels.len());
            }
            result
        };

        let results: Vec<BucketResult> = if self.config.parallel {
            buckets.par_iter().map(trace).collect::<Result<_, _>>()?
        } else {
            buckets.iter().map(trace).collect::<Result<_, _>>()?
        };

        for result in &results {
            for (x, y, color) in result.iter_pixels() {
                image_writer.write_pixel(x, y, color);
            }
        }

        log::info!("Render finished in {:.2?}", start.elapsed());
        if let Some(stats) = tracer.stats() {
            log::info!(
                "Rays: {} primary, {} secondary, {} shadow; deepest level {}",
                stats.primary_rays(),
                stats.secondary_rays(),
                stats.shadow_rays(),
                stats.max_depth()
            );
        }
        Ok(())
    }

    /// Draw grid lines every `interval` pixels, skipping the first row and column.
    pub fn print_grid(&mut self, interval: u32, color: Color) -> Result<(), RenderError> {
        let image_writer = self.image_writer.as_mut().ok_or(RenderError::MissingImageWriter)?;
        if interval == 0 {
            return Err(RenderError::InvalidGridInterval);
        }

        for y in 0..image_writer.ny() {
            for x in 0..image_writer.nx() {
                if (x % interval == 0 && x != 0) || (y % interval == 0 && y != 0) {
                    image_writer.write_pixel(x, y, color);
                }
            }
        }
        Ok(())
    }

    /// Encode the image. Returns the path written.
    pub fn write_to_image(&self) -> Result<PathBuf, RenderError> {
        self.image_writer
            .as_ref()
            .ok_or(RenderError::MissingImageWriter)?
            .write_to_image()
    }
}
