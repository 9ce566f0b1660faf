//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{Intersect, Intersection};
use lux_math::{Ray, Vec3};

/// Determinants below this are treated as a ray parallel to the triangle.
const DETERMINANT_EPSILON: f32 = 1e-8;

/// A single triangle. Counter-clockwise winding gives the outward side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, zero when degenerate)
    normal: Vec3,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self { v0, v1, v2, normal }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Intersect for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < DETERMINANT_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if t <= 0.0 {
            return None;
        }

        Some(Intersection::new(ray, t, self.normal))
    }

    /// Triangles are surfaces without volume.
    fn contains(&self, _point: Vec3) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_tri() -> Triangle {
        // Winding gives an upward normal.
        Triangle::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
        )
    }

    #[test]
    fn test_normal_follows_winding() {
        assert!((floor_tri().normal() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_hit_from_both_sides() {
        let tri = floor_tri();

        let above = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y);
        let hit = tri.intersect(&above).expect("front side");
        assert!((hit.len - 2.0).abs() < 1e-6);
        assert_eq!(hit.outward_normal, tri.normal());

        // No backface culling.
        let below = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        let hit = tri.intersect(&below).expect("back side");
        assert!((hit.len - 3.0).abs() < 1e-6);
        assert_eq!(hit.outward_normal, tri.normal());
    }

    #[test]
    fn test_misses() {
        let tri = floor_tri();

        let outside = Ray::new(Vec3::new(2.0, 2.0, 0.0), Vec3::NEG_Y);
        assert!(tri.intersect(&outside).is_none());

        let parallel = Ray::new(Vec3::new(-5.0, 0.5, 0.0), Vec3::X);
        assert!(tri.intersect(&parallel).is_none());

        let behind = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert!(tri.intersect(&behind).is_none());
    }

    #[test]
    fn test_contains_nothing() {
        assert!(!floor_tri().contains(Vec3::ZERO));
    }
}
