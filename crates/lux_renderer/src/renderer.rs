//! Headless render driver.
//!
//! Averages several jittered camera samples per pixel and renders buckets
//! in parallel with rayon. Every bucket seeds its own generator from the
//! render seed and its index, so the image does not depend on scheduling.

use crate::{
    bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE},
    trace_primary, Camera, Color, Scene,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Base seed for every bucket's generator
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 16,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to 8-bit RGBA, clamping to the displayable range.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

/// Render a single pixel with multi-sampling.
///
/// Samples that come back non-finite are dropped from the average.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let mut kept = 0u32;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        let radiance = trace_primary(scene, &ray, rng).radiance();
        if !radiance.is_finite() {
            log::warn!("Dropping non-finite sample {:?} at pixel ({}, {})", radiance, x, y);
            continue;
        }
        pixel_color += radiance;
        kept += 1;
    }

    if kept == 0 {
        return Color::ZERO;
    }
    pixel_color / kept as f32
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

/// Generator for the bucket at `index`.
fn bucket_rng(seed: u64, index: usize) -> StdRng {
    let salt = (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(seed ^ salt)
}

/// Render the entire scene to an image buffer.
///
/// The camera must already be initialized.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = (camera.image_width, camera.image_height);
    let buckets = generate_buckets(width, height, config.bucket_size.max(1));
    log::info!(
        "Rendering {}x{} at {} spp in {} buckets ({} shapes, {} lights)",
        width,
        height,
        config.samples_per_pixel,
        buckets.len(),
        scene.shapes().len(),
        scene.lights().len()
    );
    let start = std::time::Instant::now();

    let results: Vec<_> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = bucket_rng(config.seed, bucket.index);
            render_bucket(bucket, camera, scene, config, &mut rng)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let x = bucket.x + i as u32 % bucket.width;
            let y = bucket.y + i as u32 / bucket.width;
            image.set(x, y, color);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
