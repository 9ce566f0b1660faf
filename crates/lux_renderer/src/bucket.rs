//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::renderer::render_pixel;
use crate::{Camera, Color, RenderConfig, Scene};
use rand::RngCore;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets near the middle of the frame come first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let dist = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order between equidistant buckets.
    buckets.sort_by(|a, b| dist(a).total_cmp(&dist(b)));
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                scene,
                bucket.x + local_x,
                bucket.y + local_y,
                config,
                rng,
            );
            pixels.push(color);
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}
