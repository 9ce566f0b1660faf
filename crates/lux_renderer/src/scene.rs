//! Scene aggregate: shapes, lights and shading configuration.

use crate::{
    hittable::{Hit, ShapeId, SURFACE_EPSILON},
    Color, Light, RefractionStack, SceneError, Shape,
};
use lux_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Direction used to order nested media around a point. Skewed so it is
/// not parallel to any axis-aligned face.
const NESTING_RAY_DIRECTION: Vec3 = Vec3::new(0.36, 0.8, 0.48);

/// Which light transport terms the evaluator computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    /// Light sources only
    Direct,
    /// Bounced light only
    Indirect,
    /// Both
    #[default]
    Combined,
}

impl LightingMode {
    pub fn direct(self) -> bool {
        matches!(self, LightingMode::Direct | LightingMode::Combined)
    }

    pub fn indirect(self) -> bool {
        matches!(self, LightingMode::Indirect | LightingMode::Combined)
    }
}

/// Radiance arriving from outside the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sky {
    Uniform(Color),
    /// Blend from `horizon` (looking level or down) to `zenith` (straight up).
    Gradient { horizon: Color, zenith: Color },
}

impl Sky {
    /// Radiance seen along unit direction `dir`.
    pub fn radiance(&self, dir: Vec3) -> Color {
        match *self {
            Sky::Uniform(color) => color,
            Sky::Gradient { horizon, zenith } => {
                let a = dir.y.clamp(0.0, 1.0);
                horizon.lerp(zenith, a)
            }
        }
    }
}

/// Shading configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingConfig {
    /// Skip lighting entirely and return flat surface colors
    pub disable_lighting: bool,
    pub lighting: LightingMode,
    /// Deepest bounce that still spawns indirect rays
    pub max_bounces: u32,
    /// Extra indirect samples per hit (0 means one sample)
    pub ray_splits: u32,
    /// Sky seen by rays that leave the scene; `None` is black
    pub sky: Option<Sky>,
    /// Opacity at or below which a bounce counts double toward the depth limit
    pub transmissive_threshold: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            disable_lighting: false,
            lighting: LightingMode::Combined,
            max_bounces: 8,
            ray_splits: 0,
            sky: None,
            transmissive_threshold: 0.5,
        }
    }
}

impl ShadingConfig {
    pub fn with_lighting(mut self, lighting: LightingMode) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_max_bounces(mut self, max_bounces: u32) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    pub fn with_ray_splits(mut self, ray_splits: u32) -> Self {
        self.ray_splits = ray_splits;
        self
    }

    pub fn with_sky(mut self, sky: Sky) -> Self {
        self.sky = Some(sky);
        self
    }

    pub fn with_lighting_disabled(mut self, disabled: bool) -> Self {
        self.disable_lighting = disabled;
        self
    }

    pub fn with_transmissive_threshold(mut self, threshold: f32) -> Self {
        self.transmissive_threshold = threshold;
        self
    }
}

/// Everything the evaluator needs to shade a ray. Read-only while rendering.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    lights: Vec<Light>,
    config: ShadingConfig,
}

impl Scene {
    pub fn new(config: ShadingConfig) -> Self {
        Self {
            shapes: Vec::new(),
            lights: Vec::new(),
            config,
        }
    }

    /// Add a shape after validating its material.
    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeId, SceneError> {
        shape.material.validate()?;
        let id = ShapeId(self.shapes.len());
        log::debug!("Added shape {} ({:?})", id.index(), shape.geometry);
        self.shapes.push(shape);
        Ok(id)
    }

    pub fn add_light(&mut self, light: Light) -> Result<(), SceneError> {
        light.validate()?;
        log::debug!("Added light {:?}", light.kind);
        self.lights.push(light);
        Ok(())
    }

    /// Look up a shape by handle.
    ///
    /// # Panics
    ///
    /// If `id` was issued by a different scene with more shapes.
    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0]
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn config(&self) -> &ShadingConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ShadingConfig {
        &mut self.config
    }

    /// Nearest intersection over all shapes. Ties keep the earlier shape.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut closest: Option<Hit> = None;

        for (index, shape) in self.shapes.iter().enumerate() {
            let Some(isect) = shape.ray_intersect(ray) else {
                continue;
            };
            if closest.map_or(true, |hit| isect.len < hit.len) {
                closest = Some(Hit::from_intersection(ray, isect, ShapeId(index)));
            }
        }

        closest
    }

    /// Whether anything lies along `ray` closer than `distance_sq`.
    ///
    /// Stops at the first blocker; it need not be the nearest.
    pub fn is_occluded(&self, ray: &Ray, distance_sq: f32) -> bool {
        self.shapes.iter().any(|shape| {
            shape
                .ray_intersect(ray)
                .is_some_and(|isect| isect.len * isect.len < distance_sq)
        })
    }

    /// Light arriving directly from the scene's lights at `hit`.
    pub fn direct_light(&self, hit: &Hit) -> Color {
        let origin = hit.point + hit.normal * SURFACE_EPSILON;
        let mut light_sum = Color::ZERO;

        for light in &self.lights {
            let Some(dir) = light.direction_from(hit.point).try_normalize() else {
                continue;
            };
            if hit.normal.dot(dir) <= 0.0 {
                continue;
            }

            let shadow_ray = Ray::new(origin, dir);
            if self.is_occluded(&shadow_ray, light.distance_sq(origin)) {
                continue;
            }

            light_sum += light.color * light.intensity_at(&shadow_ray, hit.normal);
        }

        light_sum
    }

    /// Media a ray starting at `point` is already inside.
    ///
    /// Transmissive shapes containing the point are entered outermost first.
    /// Nesting is read off a fixed skew ray from `point`: an enclosing
    /// volume is left after the volumes inside it, and a shape the ray
    /// never leaves counts as outermost. Ties keep scene order.
    pub fn refraction_stack_at(&self, point: Vec3) -> RefractionStack {
        let outward = Ray::new(point, NESTING_RAY_DIRECTION);

        let mut inside: Vec<(f32, ShapeId, f32)> = self
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| shape.material.is_transmissive() && shape.point_intersect(point))
            .map(|(index, shape)| {
                let exit = shape
                    .ray_intersect(&outward)
                    .map_or(f32::INFINITY, |isect| isect.len);
                (exit, ShapeId(index), shape.material.refract_index)
            })
            .collect();
        inside.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut stack = RefractionStack::default();
        for (_, id, refract_index) in inside {
            stack.enter(refract_index, id);
        }
        stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aabb, Material, Plane, Sphere, IOR_AIR, IOR_GLASS, IOR_WATER};

    fn two_spheres() -> Scene {
        let mut scene = Scene::default();
        let m = Material::diffuse(Color::ONE);
        scene
            .add_shape(Shape::new(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0), m))
            .unwrap();
        scene
            .add_shape(Shape::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0), m))
            .unwrap();
        scene
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let scene = two_spheres();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let hit = scene.nearest_hit(&ray).expect("two spheres ahead");
        assert_eq!(hit.shape.index(), 1);
        assert!((hit.len - 4.0).abs() < 1e-5);
        assert!(hit.front_face);
        assert!(hit.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_nearest_hit_tie_keeps_first() {
        let mut scene = Scene::default();
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let a = scene.add_shape(Shape::new(sphere, Material::default())).unwrap();
        scene.add_shape(Shape::new(sphere, Material::default())).unwrap();

        let hit = scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::Z)).unwrap();
        assert_eq!(hit.shape, a);
    }

    #[test]
    fn test_nearest_hit_miss() {
        let scene = two_spheres();
        assert!(scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none());
    }

    #[test]
    fn test_occlusion_respects_light_distance() {
        let scene = two_spheres();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(scene.is_occluded(&ray, 100.0));
        // Light sits in front of both spheres.
        assert!(!scene.is_occluded(&ray, 9.0));
    }

    #[test]
    fn test_direct_light_straight_down() {
        let mut scene = Scene::default();
        scene
            .add_shape(Shape::new(
                Plane::new(Vec3::ZERO, Vec3::Y),
                Material::diffuse(Color::ONE),
            ))
            .unwrap();
        scene
            .add_light(Light::global(Vec3::NEG_Y, 0.75, Color::ONE))
            .unwrap();

        let hit = scene
            .nearest_hit(&Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y))
            .unwrap();
        let light = scene.direct_light(&hit);
        assert!((light - Color::splat(1.5)).length() < 1e-5);
    }

    #[test]
    fn test_direct_light_shadowed_and_backfacing() {
        let mut scene = Scene::default();
        scene
            .add_shape(Shape::new(
                Plane::new(Vec3::ZERO, Vec3::Y),
                Material::default(),
            ))
            .unwrap();
        scene
            .add_shape(Shape::new(
                Aabb::new(Vec3::new(-1.0, 1.0, -1.0), Vec3::new(1.0, 2.0, 1.0)),
                Material::default(),
            ))
            .unwrap();
        scene
            .add_light(Light::point(Vec3::new(0.0, 5.0, 0.0), 10.0, Color::ONE))
            .unwrap();

        // Under the box.
        let hit = scene
            .nearest_hit(&Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y))
            .unwrap();
        assert_eq!(scene.direct_light(&hit), Color::ZERO);

        // Underside of the plane faces away from the light.
        let hit = scene
            .nearest_hit(&Ray::new(Vec3::new(5.0, -1.0, 0.0), Vec3::Y))
            .unwrap();
        assert_eq!(scene.direct_light(&hit), Color::ZERO);
    }

    #[test]
    fn test_point_light_beyond_blocker_range() {
        let mut scene = Scene::default();
        scene
            .add_shape(Shape::new(
                Plane::new(Vec3::ZERO, Vec3::Y),
                Material::default(),
            ))
            .unwrap();
        // Box above the light does not shadow it.
        scene
            .add_shape(Shape::new(
                Aabb::new(Vec3::new(-1.0, 6.0, -1.0), Vec3::new(1.0, 7.0, 1.0)),
                Material::default(),
            ))
            .unwrap();
        scene
            .add_light(Light::point(Vec3::new(0.0, 2.0, 0.0), 8.0, Color::ONE))
            .unwrap();

        let hit = scene
            .nearest_hit(&Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y))
            .unwrap();
        let light = scene.direct_light(&hit);
        // 8 / 2^2 * cos(0) * 2, measured from just above the surface.
        assert!((light.x - 4.0).abs() < 1e-2);
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut scene = Scene::default();
        let bad = Shape::new(
            Sphere::new(Vec3::ZERO, 1.0),
            Material::default().with_opacity(2.0),
        );
        assert!(scene.add_shape(bad).is_err());
        assert!(scene.shapes().is_empty());

        assert!(scene
            .add_light(Light::global(Vec3::NEG_Y, f32::NAN, Color::ONE))
            .is_err());
        assert!(scene.lights().is_empty());
    }

    #[test]
    fn test_refraction_stack_at_nested_point() {
        let mut scene = Scene::default();
        let outer = scene
            .add_shape(Shape::new(
                Sphere::new(Vec3::ZERO, 2.0),
                Material::dielectric(Color::ONE, IOR_GLASS),
            ))
            .unwrap();
        // Opaque shapes never join the stack.
        scene
            .add_shape(Shape::new(
                Sphere::new(Vec3::ZERO, 3.0),
                Material::diffuse(Color::ONE),
            ))
            .unwrap();

        let stack = scene.refraction_stack_at(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(stack.depth(), 2);
        assert!(stack.contains(outer));
        assert_eq!(stack.current_index(), IOR_GLASS);

        let outside = scene.refraction_stack_at(Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(outside.current_index(), IOR_AIR);
    }

    #[test]
    fn test_refraction_stack_at_orders_by_nesting() {
        let mut scene = Scene::default();
        // Inner volume added before the one enclosing it.
        let inner = scene
            .add_shape(Shape::new(
                Sphere::new(Vec3::ZERO, 1.0),
                Material::dielectric(Color::ONE, 2.0),
            ))
            .unwrap();
        let outer = scene
            .add_shape(Shape::new(
                Sphere::new(Vec3::ZERO, 2.0),
                Material::dielectric(Color::ONE, 1.5),
            ))
            .unwrap();
        // Half-space enclosing both spheres.
        let water = scene
            .add_shape(Shape::new(
                Plane::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y),
                Material::dielectric(Color::ONE, IOR_WATER),
            ))
            .unwrap();

        let stack = scene.refraction_stack_at(Vec3::new(0.0, 0.3, 0.0));
        let order: Vec<_> = stack.media().iter().map(|m| m.shape).collect();
        assert_eq!(order, vec![None, Some(water), Some(outer), Some(inner)]);
        assert_eq!(stack.current_index(), 2.0);

        // Leaving the inner sphere bends from its index into the outer one.
        let (_, n1, n2) = stack.cross(inner, 2.0, false);
        assert_eq!((n1, n2), (2.0, 1.5));
    }

    #[test]
    fn test_sky_gradient_blends_by_height() {
        let sky = Sky::Gradient {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        };
        assert_eq!(sky.radiance(Vec3::Y), Color::new(0.5, 0.7, 1.0));
        assert_eq!(sky.radiance(Vec3::NEG_Y), Color::ONE);
        assert_eq!(Sky::Uniform(Color::X).radiance(Vec3::Z), Color::X);
    }

    #[test]
    fn test_lighting_mode_terms() {
        assert!(LightingMode::Direct.direct() && !LightingMode::Direct.indirect());
        assert!(!LightingMode::Indirect.direct() && LightingMode::Indirect.indirect());
        assert!(LightingMode::Combined.direct() && LightingMode::Combined.indirect());
    }
}
