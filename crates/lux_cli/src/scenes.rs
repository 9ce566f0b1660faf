//! Hard-coded demo scenes.

use crate::settings::{DemoScene, Settings};
use anyhow::{Context, Result};
use lux_math::Vec3;
use lux_renderer::{
    Aabb, Camera, Color, Geometry, Hemisphere, Light, Material, Obb, Plane, Scene, Shape, Sky,
    Sphere, Triangle, IOR_GLASS, IOR_WATER,
};

/// A scene together with the camera that frames it.
pub struct Demo {
    pub scene: Scene,
    pub camera: Camera,
}

pub fn build(settings: &Settings) -> Result<Demo> {
    let mut scene = Scene::new(settings.shading_config());
    let (look_from, look_at) = match settings.scene {
        DemoScene::Showcase => showcase(&mut scene),
        DemoScene::Glass => glass(&mut scene),
        DemoScene::Emitter => emitter(&mut scene),
    }
    .with_context(|| format!("Failed to build {:?} scene", settings.scene))?;

    let mut camera = Camera::new()
        .with_resolution(settings.width, settings.height)
        .with_position(look_from, look_at, Vec3::Y)
        .with_vfov(75.0);
    camera.initialize();

    log::info!(
        "Built {:?} scene with {} shapes and {} lights",
        settings.scene,
        scene.shapes().len(),
        scene.lights().len()
    );

    Ok(Demo { scene, camera })
}

fn add(scene: &mut Scene, geometry: impl Into<Geometry>, material: Material) -> Result<()> {
    scene.add_shape(Shape::new(geometry, material))?;
    Ok(())
}

fn daylight() -> Sky {
    Sky::Gradient {
        horizon: Color::new(0.9, 0.9, 0.85),
        zenith: Color::new(0.35, 0.55, 0.9),
    }
}

/// Every primitive kind on a floor, under a sun and a lamp.
fn showcase(scene: &mut Scene) -> Result<(Vec3, Vec3)> {
    scene.config_mut().sky = Some(daylight());

    add(
        scene,
        Plane::new(Vec3::ZERO, Vec3::Y),
        Material::diffuse(Color::new(0.8, 0.8, 0.75)),
    )?;
    add(
        scene,
        Aabb::new(Vec3::new(-4.5, 0.0, 3.0), Vec3::new(-2.5, 1.5, 5.0)),
        Material::diffuse(Color::new(0.9, 0.6, 0.2)),
    )?;
    add(
        scene,
        Obb::new(
            Vec3::new(3.0, 1.0, 5.0),
            Vec3::new(0.7, 0.0, 0.7),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-0.5, 0.0, 0.5),
        ),
        Material::diffuse(Color::new(0.6, 0.7, 0.9)),
    )?;

    // Glass ball with water inside
    add(
        scene,
        Sphere::new(Vec3::new(0.0, 1.5, 3.0), 1.5),
        Material::dielectric(Color::new(0.95, 0.95, 1.0), IOR_GLASS),
    )?;
    add(
        scene,
        Sphere::new(Vec3::new(0.0, 1.5, 3.0), 0.8),
        Material::dielectric(Color::new(0.7, 0.85, 1.0), IOR_WATER),
    )?;

    add(
        scene,
        Hemisphere::new(Vec3::new(-1.5, 0.0, 0.5), 0.8, Vec3::NEG_Y),
        Material::diffuse(Color::new(0.2, 0.8, 0.3)),
    )?;
    add(
        scene,
        Triangle::new(
            Vec3::new(1.0, 0.0, 0.5),
            Vec3::new(1.8, 2.0, 1.2),
            Vec3::new(2.6, 0.0, 0.5),
        ),
        Material::diffuse(Color::new(0.75, 0.25, 0.5)),
    )?;
    add(
        scene,
        Sphere::new(Vec3::new(-1.0, 2.5, 7.5), 2.5),
        Material::mirror(Color::splat(0.9)),
    )?;

    scene.add_light(Light::global(Vec3::new(-0.4, -1.0, 0.6), 0.6, Color::ONE))?;
    scene.add_light(Light::point(
        Vec3::new(2.0, 4.0, 0.0),
        10.0,
        Color::new(1.0, 0.9, 0.7),
    ))?;

    let eye = Vec3::new(0.0, 5.0, -10.0);
    Ok((eye, eye + Vec3::new(0.0, -0.53, 1.0) * 10.0))
}

/// Nested glass spheres in front of a checker of boxes.
fn glass(scene: &mut Scene) -> Result<(Vec3, Vec3)> {
    scene.config_mut().sky = Some(Sky::Uniform(Color::splat(0.6)));

    add(
        scene,
        Plane::new(Vec3::ZERO, Vec3::Y),
        Material::diffuse(Color::splat(0.7)),
    )?;
    for i in 0..5 {
        let x = -5.0 + 2.5 * i as f32;
        let color = if i % 2 == 0 {
            Color::new(0.9, 0.2, 0.2)
        } else {
            Color::new(0.2, 0.3, 0.9)
        };
        add(
            scene,
            Aabb::new(Vec3::new(x - 0.5, 0.0, 6.0), Vec3::new(x + 0.5, 3.0, 7.0)),
            Material::diffuse(color),
        )?;
    }

    add(
        scene,
        Sphere::new(Vec3::new(0.0, 2.0, 2.0), 2.0),
        Material::dielectric(Color::ONE, 1.5),
    )?;
    add(
        scene,
        Sphere::new(Vec3::new(0.0, 2.0, 2.0), 1.0),
        Material::dielectric(Color::ONE, 2.0),
    )?;

    scene.add_light(Light::global(Vec3::new(0.3, -1.0, 0.5), 0.5, Color::ONE))?;

    Ok((Vec3::new(0.0, 3.0, -8.0), Vec3::new(0.0, 2.0, 2.0)))
}

/// A diffuse sphere lit only by a glowing panel above it.
fn emitter(scene: &mut Scene) -> Result<(Vec3, Vec3)> {
    add(
        scene,
        Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y),
        Material::diffuse(Color::splat(0.6)),
    )?;
    add(
        scene,
        Sphere::new(Vec3::ZERO, 1.0),
        Material::diffuse(Color::new(0.9, 0.9, 0.9)),
    )?;
    add(
        scene,
        Aabb::new(Vec3::new(-2.0, 3.0, -2.0), Vec3::new(2.0, 3.5, 2.0)),
        Material::emissive(Color::new(1.0, 0.95, 0.8), 5.0),
    )?;

    Ok((Vec3::new(0.0, 1.5, -5.0), Vec3::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small(scene: DemoScene) -> Settings {
        Settings {
            scene,
            width: 16,
            height: 9,
            samples_per_pixel: 1,
            max_bounces: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_every_demo_builds() {
        for kind in [DemoScene::Showcase, DemoScene::Glass, DemoScene::Emitter] {
            let demo = build(&small(kind)).unwrap();
            assert!(!demo.scene.shapes().is_empty(), "{kind:?} is empty");
            assert_eq!(demo.camera.image_width, 16);
        }
    }

    #[test]
    fn test_showcase_uses_every_primitive() {
        let demo = build(&small(DemoScene::Showcase)).unwrap();
        let mut kinds: Vec<&str> = demo
            .scene
            .shapes()
            .iter()
            .map(|shape| match shape.geometry {
                Geometry::Aabb(_) => "aabb",
                Geometry::Obb(_) => "obb",
                Geometry::Sphere(_) => "sphere",
                Geometry::Hemisphere(_) => "hemisphere",
                Geometry::Triangle(_) => "triangle",
                Geometry::Plane(_) => "plane",
            })
            .collect();
        kinds.sort_unstable();
        kinds.dedup();

        assert_eq!(kinds.len(), 6, "{kinds:?}");
        assert_eq!(demo.scene.lights().len(), 2);
    }

    #[test]
    fn test_emitter_center_pixel_is_lit() {
        let demo = build(&small(DemoScene::Emitter)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let ray = demo.camera.get_ray(8, 4, &mut rng);
        let trace = lux_renderer::trace_primary(&demo.scene, &ray, &mut rng);
        assert!(trace.hit.is_some());
        assert!(trace.radiance().is_finite());
    }
}
