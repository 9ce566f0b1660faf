use crate::Vec3;

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalized once at construction and the inverse
/// direction is cached for slab tests, so both are kept private.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` must be non-zero; it is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.normalize();
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Component-wise reciprocal of the direction.
    ///
    /// Components are infinite along axes the ray is parallel to, which the
    /// slab method handles without special cases.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray with its origin pushed `distance` along the direction.
    pub fn advanced(&self, distance: f32) -> Self {
        Self {
            origin: self.at(distance),
            ..*self
        }
    }
}
