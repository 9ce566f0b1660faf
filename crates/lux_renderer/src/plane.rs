//! Infinite plane.

use crate::hittable::{Intersect, Intersection, PARALLEL_EPSILON};
use lux_math::{Ray, Vec3};

/// An infinite, two-sided plane through `point` with the given normal.
///
/// The half-space behind the normal counts as the plane's interior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Intersect for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let a = self.normal.dot(ray.direction());
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = self.normal.dot(self.point - ray.origin()) / a;
        if t <= 0.0 {
            return None;
        }

        Some(Intersection::new(ray, t, self.normal))
    }

    fn contains(&self, point: Vec3) -> bool {
        self.normal.dot(point - self.point) < 0.0
    }
}
