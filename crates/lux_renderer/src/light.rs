//! Light sources used for direct illumination.

use crate::{Color, SceneError};
use lux_math::{Ray, Vec3};

/// Where a light sits and how its contribution falls off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Directional light infinitely far away, shining along `direction`.
    Global { direction: Vec3 },
    /// Light radiating from a single point with inverse-square falloff.
    Point { position: Vec3 },
}

/// A light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    /// Directional light. `direction` points from the light into the scene.
    pub fn global(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Global {
                direction: direction.try_normalize().unwrap_or(Vec3::NEG_Y),
            },
        }
    }

    pub fn point(position: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Point { position },
        }
    }

    /// Unnormalized vector from `point` toward the light.
    pub fn direction_from(&self, point: Vec3) -> Vec3 {
        match self.kind {
            LightKind::Global { direction } => -direction,
            LightKind::Point { position } => position - point,
        }
    }

    /// Squared distance from `point` to the light; infinite for global lights.
    pub fn distance_sq(&self, point: Vec3) -> f32 {
        match self.kind {
            LightKind::Global { .. } => f32::INFINITY,
            LightKind::Point { position } => (position - point).length_squared(),
        }
    }

    /// Scalar intensity arriving along `shadow_ray` at a surface with `normal`.
    ///
    /// Both kinds use a doubled cosine term; point lights also divide by the
    /// squared distance to the shadow ray origin.
    pub fn intensity_at(&self, shadow_ray: &Ray, normal: Vec3) -> f32 {
        let cos_theta = normal.dot(shadow_ray.direction());
        match self.kind {
            LightKind::Global { .. } => self.intensity * cos_theta * 2.0,
            LightKind::Point { position } => {
                let dist_sq = (position - shadow_ray.origin()).length_squared();
                self.intensity / dist_sq * cos_theta * 2.0
            }
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.intensity >= 0.0 && self.intensity.is_finite()) {
            return Err(SceneError::InvalidLight {
                field: "intensity",
                value: self.intensity,
            });
        }
        if let Some(c) = self.color.to_array().into_iter().find(|c| !(*c >= 0.0)) {
            return Err(SceneError::InvalidLight {
                field: "color",
                value: c,
            });
        }
        Ok(())
    }
}
