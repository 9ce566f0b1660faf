//! Recursive light transport.
//!
//! [`cast_ray`] finds what a ray hits, gathers direct light from the scene's
//! lights and then recurses for bounced light:
//! - a reflection branch weighted by opacity, blending a diffuse direction
//!   with the mirror direction by reflectivity
//! - a refraction branch weighted by transparency, bending the ray with
//!   Snell's law using the media recorded in the ray's [`RefractionStack`]
//!
//! Every branch owns its own copy of the stack.

use crate::{
    hittable::{Hit, SURFACE_EPSILON},
    random_unit_vector, Color, Material, RefractionStack, Scene, ShadingConfig,
};
use lux_math::{Optics, Ray, Vec3};
use rand::RngCore;

/// Shading terms of a single ray.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceHitInfo {
    pub surface_color: Color,
    pub surface_emission: Color,
    /// Light arriving at the surface, before tinting by `surface_color`
    pub cumulative_light: Color,
}

impl SurfaceHitInfo {
    /// Final color: `surface_color * cumulative_light + surface_emission`.
    #[inline]
    pub fn radiance(&self) -> Color {
        self.surface_color * self.cumulative_light + self.surface_emission
    }

    /// Clamp every component to be non-negative.
    fn floored(self) -> Self {
        Self {
            surface_color: self.surface_color.max(Color::ZERO),
            surface_emission: self.surface_emission.max(Color::ZERO),
            cumulative_light: self.cumulative_light.max(Color::ZERO),
        }
    }
}

/// Result of tracing one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    pub surface: SurfaceHitInfo,
    /// The surface hit, if any
    pub hit: Option<Hit>,
}

impl Trace {
    #[inline]
    pub fn radiance(&self) -> Color {
        self.surface.radiance()
    }
}

/// Per-ray recursion state.
#[derive(Debug, Clone, PartialEq)]
pub struct PathState {
    /// Depth counter; transmissive surfaces advance it faster
    pub bounce: u32,
    /// Media the ray is travelling through
    pub media: RefractionStack,
    /// Facing normal of the surface the ray left, `None` for primary rays
    pub leaving_normal: Option<Vec3>,
}

impl PathState {
    pub fn primary(media: RefractionStack) -> Self {
        Self {
            bounce: 0,
            media,
            leaving_normal: None,
        }
    }
}

/// Trace a camera ray, seeding the media from what contains its origin.
pub fn trace_primary(scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Trace {
    let state = PathState::primary(scene.refraction_stack_at(ray.origin()));
    cast_ray(scene, ray, &state, rng)
}

/// Compute the shading terms seen along `ray`.
pub fn cast_ray(scene: &Scene, ray: &Ray, state: &PathState, rng: &mut dyn RngCore) -> Trace {
    let ray = if state.bounce > 0 {
        ray.advanced(SURFACE_EPSILON)
    } else {
        *ray
    };
    let config = scene.config();

    let Some(hit) = scene.nearest_hit(&ray) else {
        let surface = SurfaceHitInfo {
            surface_emission: sky_radiance(config, &ray, state),
            ..Default::default()
        };
        return Trace {
            surface: surface.floored(),
            hit: None,
        };
    };

    let material = &scene.shape(hit.shape).material;
    let mut surface = SurfaceHitInfo {
        surface_color: material.color,
        surface_emission: material.emitted(),
        cumulative_light: Color::ZERO,
    };

    if config.disable_lighting {
        surface.cumulative_light = Color::ONE;
    } else {
        if config.lighting.direct() {
            surface.cumulative_light += scene.direct_light(&hit);
        }
        if config.lighting.indirect() && state.bounce <= config.max_bounces {
            surface.cumulative_light += indirect_light(scene, &ray, &hit, material, state, rng);
        }
    }

    Trace {
        surface: surface.floored(),
        hit: Some(hit),
    }
}

fn sky_radiance(config: &ShadingConfig, ray: &Ray, state: &PathState) -> Color {
    let Some(sky) = config.sky else {
        return Color::ZERO;
    };
    let radiance = sky.radiance(ray.direction());
    match state.leaving_normal {
        Some(normal) => radiance * normal.dot(ray.direction()).abs(),
        None => radiance,
    }
}

/// How far one bounce off `material` advances the depth counter.
fn bounce_step(material: &Material, config: &ShadingConfig) -> u32 {
    if material.opacity <= config.transmissive_threshold {
        2
    } else {
        1
    }
}

fn indirect_light(
    scene: &Scene,
    ray: &Ray,
    hit: &Hit,
    material: &Material,
    state: &PathState,
    rng: &mut dyn RngCore,
) -> Color {
    let config = scene.config();
    let bounce = state.bounce.saturating_add(bounce_step(material, config));
    let samples = config.ray_splits.saturating_add(1);
    let mut total = Color::ZERO;

    for _ in 0..samples {
        if material.opacity > 0.0 {
            let dir = bounce_direction(ray.direction(), hit.normal, material.reflectivity, rng);
            let next = PathState {
                bounce,
                media: state.media.clone(),
                leaving_normal: Some(hit.normal),
            };
            let bounced = cast_ray(scene, &Ray::new(hit.point, dir), &next, rng);
            total += bounced.radiance() * material.opacity;
        }

        if material.is_transmissive() {
            let (refracted_ray, next) = refracted_path(ray, hit, material, state, bounce);
            let refracted = cast_ray(scene, &refracted_ray, &next, rng);
            total += refracted.radiance() * (1.0 - material.opacity);
        }
    }

    total / samples as f32
}

/// Ray and state continuing through a transmissive surface.
///
/// The ray starts on the surface; [`cast_ray`] lifts it off once.
fn refracted_path(
    ray: &Ray,
    hit: &Hit,
    material: &Material,
    state: &PathState,
    bounce: u32,
) -> (Ray, PathState) {
    let (dir, media) = refract_branch(ray.direction(), hit, material.refract_index, &state.media);
    let next = PathState {
        bounce,
        media,
        leaving_normal: Some(hit.normal),
    };
    (Ray::new(hit.point, dir), next)
}

/// Blend of a random diffuse direction and the mirror direction.
fn bounce_direction(incoming: Vec3, normal: Vec3, reflectivity: f32, rng: &mut dyn RngCore) -> Vec3 {
    let diffuse = (normal + random_unit_vector(rng))
        .try_normalize()
        .unwrap_or(normal);
    let mirror = incoming.reflect_about(normal);
    let dir = diffuse.lerp(mirror, reflectivity);

    // Opposite diffuse and mirror directions can cancel out.
    if dir.length_squared() < 1e-12 {
        normal
    } else {
        dir
    }
}

/// Direction and media for the ray transmitted through `hit`.
///
/// Falls back to mirror reflection, with the media unchanged, under total
/// internal reflection.
pub(crate) fn refract_branch(
    incoming: Vec3,
    hit: &Hit,
    refract_index: f32,
    media: &RefractionStack,
) -> (Vec3, RefractionStack) {
    let (crossed, n1, n2) = media.cross(hit.shape, refract_index, hit.front_face);
    match incoming.refract_through(hit.normal, n1, n2) {
        Some(dir) => (dir, crossed),
        None => (incoming.reflect_about(hit.normal), media.clone()),
    }
}
