//! Pinhole camera for primary ray generation.

use crate::sample_square;
use lux_math::{Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    /// Vertical field of view in degrees
    vfov: f32,

    // Cached computed values (set by initialize())
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    w: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, 1.0),
            vup: Vec3::Y,
            vfov: 75.0,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            w: Vec3::NEG_Z,
        }
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width.max(1);
        self.image_height = height.max(1);
        self
    }

    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    pub fn with_vfov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        let theta = self.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Right-handed basis with w pointing back toward the viewer
        self.w = (self.look_from - self.look_at)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let u = self
            .vup
            .cross(self.w)
            .try_normalize()
            .unwrap_or_else(|| self.w.any_orthonormal_vector());
        let v = self.w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left = self.look_from - self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Generate a ray through a random point of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let (dx, dy) = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + (i as f32 + dx) * self.pixel_delta_u
            + (j as f32 + dy) * self.pixel_delta_v;

        Ray::new(self.look_from, pixel_sample - self.look_from)
    }

    /// Eye position shared by every primary ray.
    pub fn origin(&self) -> Vec3 {
        self.look_from
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> Vec3 {
        -self.w
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
