//! Lux renderer - recursive CPU ray tracing
//!
//! A Whitted-style tracer extended with stochastic diffuse bouncing and a
//! refraction stack that tracks nested transparent media.
//!
//! Shapes and lights are collected in a [`Scene`]; [`trace_primary`]
//! shades a single camera ray and [`render`] drives a whole image through
//! the [`Camera`] in parallel buckets.

mod aabb;
mod bucket;
mod camera;
mod error;
mod hemisphere;
mod hittable;
mod light;
mod material;
mod medium;
mod obb;
mod plane;
mod renderer;
mod sampling;
mod scene;
mod shape;
mod sphere;
mod tracer;
mod triangle;

pub use aabb::Aabb;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use error::{GeometryError, SceneError};
pub use hemisphere::Hemisphere;
pub use hittable::{Hit, Intersect, Intersection, ShapeId, SURFACE_EPSILON};
pub use light::{Light, LightKind};
pub use material::{Color, Material, IOR_AIR, IOR_GLASS, IOR_VACUUM, IOR_WATER};
pub use medium::{Medium, RefractionStack};
pub use obb::Obb;
pub use plane::Plane;
pub use renderer::{color_to_rgba, render, render_pixel, ImageBuffer, RenderConfig};
pub use sampling::{gen_f32, random_unit_vector, sample_square};
pub use scene::{LightingMode, Scene, ShadingConfig, Sky};
pub use shape::{Geometry, Shape};
pub use sphere::Sphere;
pub use tracer::{cast_ray, trace_primary, PathState, SurfaceHitInfo, Trace};
pub use triangle::Triangle;

/// Re-export the math types from lux_math
pub use lux_math::{Interval, Optics, Ray, Vec3};
