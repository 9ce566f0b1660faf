//! Sphere primitive.

use crate::hittable::{Intersect, Intersection, PARALLEL_EPSILON};
use lux_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Both roots of the ray/sphere quadratic, ordered, or `None` on a miss.
    ///
    /// The offset to the center is split into its projection on the ray and
    /// the perpendicular residual, which stays accurate for distant spheres.
    pub(crate) fn roots(center: Vec3, radius: f32, ray: &Ray) -> Option<(f32, f32)> {
        let oc = ray.origin() - center;
        let b = oc.dot(ray.direction());
        let residual = oc - ray.direction() * b;
        let h = radius * radius - residual.length_squared();

        if h < -PARALLEL_EPSILON {
            return None;
        }

        let h = h.max(0.0).sqrt();
        Some((-b - h, -b + h))
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let (t0, t1) = Self::roots(self.center, self.radius, ray)?;

        let len = if t0 >= 0.0 {
            t0
        } else if t1 >= 0.0 {
            t1
        } else {
            return None;
        };

        let point = ray.at(len);
        let outward_normal = if self.radius > 0.0 {
            (point - self.center) / self.radius
        } else {
            -ray.direction()
        };

        Some(Intersection::new(ray, len, outward_normal))
    }

    fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_from_outside() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let hit = sphere.intersect(&ray).expect("ray aims at the sphere");
        assert!((hit.len - 4.0).abs() < 1e-5);
        assert!((hit.outward_normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_centered_at_origin_hits_at_radius() {
        let sphere = Sphere::new(Vec3::ZERO, 2.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 2.0, -0.5));

        let hit = sphere.intersect(&ray).expect("origin is inside");
        assert!((hit.len - 2.5).abs() < 1e-5);
        assert!((hit.outward_normal.length() - 1.0).abs() < 1e-5);
        assert!(hit.outward_normal.dot(ray.direction()) > 0.99);
    }

    #[test]
    fn test_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);

        // Passes beside it.
        let beside = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::Z);
        assert!(sphere.intersect(&beside).is_none());

        // Pointing away.
        let away = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(sphere.intersect(&away).is_none());
    }

    #[test]
    fn test_contains() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
        assert!(sphere.contains(Vec3::new(1.5, 0.0, 0.0)));
        assert!(!sphere.contains(Vec3::new(-0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Vec3::ZERO, -1.0);
        assert_eq!(sphere.radius(), 0.0);
    }
}
