//! Reflection and refraction on vectors.
//!
//! Implemented as an extension trait so `glam::Vec3` can be used directly
//! everywhere else.

use crate::Vec3;

/// Optical direction changes at a surface.
pub trait Optics: Sized {
    /// Mirror `self` about the plane with the given unit normal.
    ///
    /// The side the normal points to does not matter.
    fn reflect_about(self, normal: Self) -> Self;

    /// Bend a unit direction through a boundary from a medium with index
    /// `n1` into one with index `n2` (Snell's law, vector form).
    ///
    /// `normal` may face either side of the surface. Returns `None` on total
    /// internal reflection.
    fn refract_through(self, normal: Self, n1: f32, n2: f32) -> Option<Self>;
}

impl Optics for Vec3 {
    #[inline]
    fn reflect_about(self, normal: Vec3) -> Vec3 {
        self - normal * (2.0 * self.dot(normal))
    }

    fn refract_through(self, normal: Vec3, n1: f32, n2: f32) -> Option<Vec3> {
        // Work with the normal that opposes the incoming direction.
        let facing = if self.dot(normal) > 0.0 { -normal } else { normal };
        let cos_i = (-self.dot(facing)).min(1.0);
        let eta = n1 / n2;

        let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
        if k < 0.0 {
            return None;
        }

        let refracted = self * eta + facing * (eta * cos_i - k.sqrt());
        Some(refracted.try_normalize().unwrap_or(self))
    }
}
