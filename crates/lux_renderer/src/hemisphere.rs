//! Half of a sphere, closed by a flat disk.

use crate::hittable::{Intersect, Intersection, PARALLEL_EPSILON};
use crate::sphere::Sphere;
use lux_math::{Ray, Vec3};

/// A solid hemisphere.
///
/// The cap normal points away from the curved half: the body occupies the
/// side where `cap_normal . (p - center) <= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hemisphere {
    center: Vec3,
    radius: f32,
    cap_normal: Vec3,
}

impl Hemisphere {
    pub fn new(center: Vec3, radius: f32, cap_normal: Vec3) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            cap_normal: cap_normal.try_normalize().unwrap_or(Vec3::Y),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn cap_normal(&self) -> Vec3 {
        self.cap_normal
    }

    fn on_curved_side(&self, point: Vec3) -> bool {
        self.cap_normal.dot(point - self.center) < 0.0
    }

    fn curved_hit(&self, ray: &Ray) -> Option<f32> {
        let (t0, t1) = Sphere::roots(self.center, self.radius, ray)?;
        [t0, t1]
            .into_iter()
            .find(|&t| t >= 0.0 && self.on_curved_side(ray.at(t)))
    }

    fn cap_hit(&self, ray: &Ray) -> Option<f32> {
        let a = self.cap_normal.dot(ray.direction());
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = self.cap_normal.dot(self.center - ray.origin()) / a;
        if t < 0.0 {
            return None;
        }

        let offset = ray.at(t) - self.center;
        (offset.length_squared() <= self.radius * self.radius).then_some(t)
    }
}

impl Intersect for Hemisphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let curved = self.curved_hit(ray).map(|t| {
            let normal = if self.radius > 0.0 {
                (ray.at(t) - self.center) / self.radius
            } else {
                -ray.direction()
            };
            (t, normal)
        });
        let cap = self.cap_hit(ray).map(|t| (t, self.cap_normal));

        let (len, normal) = match (curved, cap) {
            (Some(c), Some(d)) => {
                if c.0 <= d.0 {
                    c
                } else {
                    d
                }
            }
            (Some(c), None) => c,
            (None, Some(d)) => d,
            (None, None) => return None,
        };

        Some(Intersection::new(ray, len, normal))
    }

    fn contains(&self, point: Vec3) -> bool {
        let p = point - self.center;
        p.length_squared() <= self.radius * self.radius && self.cap_normal.dot(p) <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dome opening upward: curved half below y = 0, flat cap on top.
    fn bowl() -> Hemisphere {
        Hemisphere::new(Vec3::ZERO, 1.0, Vec3::Y)
    }

    #[test]
    fn test_hits_cap_from_above() {
        let ray = Ray::new(Vec3::new(0.2, 5.0, 0.0), Vec3::NEG_Y);
        let hit = bowl().intersect(&ray).expect("ray reaches the cap");
        assert!((hit.len - 5.0).abs() < 1e-5);
        assert_eq!(hit.outward_normal, Vec3::Y);
    }

    #[test]
    fn test_hits_curved_side_from_below() {
        let ray = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y);
        let hit = bowl().intersect(&ray).expect("ray reaches the dome");
        assert!((hit.len - 4.0).abs() < 1e-5);
        assert!((hit.outward_normal - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_missing_half_is_open() {
        // Grazes the upper half where there is no sphere surface.
        let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.0), Vec3::X);
        assert!(bowl().intersect(&ray).is_none());
    }

    #[test]
    fn test_inside_hits_cap() {
        let ray = Ray::new(Vec3::new(0.0, -0.5, 0.0), Vec3::Y);
        let hit = bowl().intersect(&ray).expect("ray exits through the cap");
        assert!((hit.len - 0.5).abs() < 1e-5);
        assert_eq!(hit.outward_normal, Vec3::Y);
    }

    #[test]
    fn test_zero_radius_grazing_hit_has_finite_normal() {
        let point = Hemisphere::new(Vec3::ZERO, 0.0, Vec3::Y);
        // Passes just under the center, within the grazing tolerance.
        let ray = Ray::new(Vec3::new(-5.0, -1e-4, 0.0), Vec3::X);
        let hit = point.intersect(&ray).expect("grazing ray is accepted");
        assert!(hit.outward_normal.is_finite());
        assert!((hit.outward_normal - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_contains() {
        let bowl = bowl();
        assert!(bowl.contains(Vec3::new(0.0, -0.5, 0.0)));
        assert!(!bowl.contains(Vec3::new(0.0, 0.5, 0.0)));
        assert!(!bowl.contains(Vec3::new(0.0, -1.5, 0.0)));
    }
}
