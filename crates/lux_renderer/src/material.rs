//! Surface material description.

use crate::SceneError;
use lux_math::Vec3;

/// Color type alias (linear RGB, may exceed 1 before display)
pub type Color = Vec3;

/// Refractive index of vacuum.
pub const IOR_VACUUM: f32 = 1.0;
/// Refractive index of air, the ambient medium of every scene.
pub const IOR_AIR: f32 = 1.000293;
/// Refractive index of water.
pub const IOR_WATER: f32 = 1.333;
/// Refractive index of crown glass.
pub const IOR_GLASS: f32 = 1.52;

/// How a shape's surface responds to light.
///
/// Every shape owns its own copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Fraction of light routed to reflection (the rest is transmitted)
    pub opacity: f32,
    /// Refractive index of the medium behind the surface
    pub refract_index: f32,
    /// Blend between diffuse (0) and mirror (1) bounce directions
    pub reflectivity: f32,
    /// Emitted color
    pub emission_color: Color,
    /// Emission multiplier; unbounded so emitters can act as lights
    pub emission_strength: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ZERO,
            opacity: 1.0,
            refract_index: IOR_VACUUM,
            reflectivity: 0.0,
            emission_color: Color::ZERO,
            emission_strength: 0.0,
        }
    }
}

impl Material {
    /// Opaque diffuse material.
    pub fn diffuse(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Opaque perfect mirror.
    pub fn mirror(color: Color) -> Self {
        Self {
            color,
            reflectivity: 1.0,
            ..Default::default()
        }
    }

    /// Fully transmissive dielectric.
    pub fn dielectric(color: Color, refract_index: f32) -> Self {
        Self {
            color,
            opacity: 0.0,
            refract_index,
            reflectivity: 1.0,
            ..Default::default()
        }
    }

    /// Light-emitting surface.
    pub fn emissive(color: Color, strength: f32) -> Self {
        Self {
            emission_color: color,
            emission_strength: strength,
            ..Default::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_refract_index(mut self, refract_index: f32) -> Self {
        self.refract_index = refract_index;
        self
    }

    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn with_emission(mut self, color: Color, strength: f32) -> Self {
        self.emission_color = color;
        self.emission_strength = strength;
        self
    }

    /// Radiance emitted by the surface.
    #[inline]
    pub fn emitted(&self) -> Color {
        self.emission_color * self.emission_strength
    }

    /// Whether any light passes through the surface.
    #[inline]
    pub fn is_transmissive(&self) -> bool {
        self.opacity < 1.0
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), SceneError> {
        let unit = |field: &'static str, value: f32| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(SceneError::InvalidMaterial { field, value })
            }
        };

        unit("opacity", self.opacity)?;
        unit("reflectivity", self.reflectivity)?;

        if !(self.refract_index > 0.0 && self.refract_index.is_finite()) {
            return Err(SceneError::InvalidMaterial {
                field: "refract_index",
                value: self.refract_index,
            });
        }
        if !(self.emission_strength >= 0.0) {
            return Err(SceneError::InvalidMaterial {
                field: "emission_strength",
                value: self.emission_strength,
            });
        }
        Ok(())
    }
}
