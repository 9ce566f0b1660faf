//! Intersection records and the per-primitive intersection contract.

use lux_math::{Ray, Vec3};

/// Distance used to push secondary rays off the surface they start on.
pub const SURFACE_EPSILON: f32 = 1e-4;

/// Below this `|axis . direction|` a ray is treated as parallel to a plane.
pub(crate) const PARALLEL_EPSILON: f32 = 1e-6;

/// Handle to a shape stored in a [`Scene`](crate::Scene).
///
/// Only meaningful for the scene that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub(crate) usize);

impl ShapeId {
    /// Position of the shape in the scene's shape list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Raw result of a primitive intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Parameter t where the intersection occurs (smallest non-negative root)
    pub len: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit normal pointing out of the primitive, regardless of ray side
    pub outward_normal: Vec3,
}

impl Intersection {
    pub fn new(ray: &Ray, len: f32, outward_normal: Vec3) -> Self {
        Self {
            len,
            point: ray.at(len),
            outward_normal,
        }
    }
}

/// Record of the nearest ray-scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray
    pub len: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Shape that produced the hit
    pub shape: ShapeId,
}

impl Hit {
    /// Orient a primitive intersection toward the incoming ray.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn from_intersection(ray: &Ray, intersection: Intersection, shape: ShapeId) -> Self {
        let outward = intersection.outward_normal;
        let front_face = ray.direction().dot(outward) < 0.0;

        Self {
            len: intersection.len,
            point: intersection.point,
            normal: if front_face { outward } else { -outward },
            front_face,
            shape,
        }
    }

    /// The normal pointing out of the shape.
    pub fn outward_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }
}

/// Intersection contract shared by every primitive.
pub trait Intersect {
    /// Nearest intersection at a non-negative distance, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;

    /// Whether `point` lies inside the primitive's volume.
    fn contains(&self, point: Vec3) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_faces_incoming_ray() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        // Outward normal pointing back at the ray: front face.
        let front = Intersection::new(&ray, 2.0, -Vec3::Z);
        let hit = Hit::from_intersection(&ray, front, ShapeId(0));
        assert!(hit.front_face);
        assert_eq!(hit.normal, -Vec3::Z);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, 2.0));

        // Outward normal along the ray: we are inside, normal gets flipped.
        let back = Intersection::new(&ray, 2.0, Vec3::Z);
        let hit = Hit::from_intersection(&ray, back, ShapeId(3));
        assert!(!hit.front_face);
        assert_eq!(hit.normal, -Vec3::Z);
        assert_eq!(hit.outward_normal(), Vec3::Z);
        assert_eq!(hit.shape.index(), 3);
    }
}
