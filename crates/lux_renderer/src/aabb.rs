//! Axis-aligned box primitive.

use crate::hittable::{Intersect, Intersection, SURFACE_EPSILON};
use lux_math::{Interval, Ray, Vec3};

/// Outward normals of the six faces, in the order they are matched.
const FACE_NORMALS: [Vec3; 6] = [
    Vec3::NEG_X,
    Vec3::X,
    Vec3::NEG_Y,
    Vec3::Y,
    Vec3::NEG_Z,
    Vec3::Z,
];

/// An axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Returns the center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Slab interval along one axis.
    #[inline]
    fn slab(min: f32, max: f32, origin: f32, inv_dir: f32) -> Interval {
        Interval::spanning((min - origin) * inv_dir, (max - origin) * inv_dir)
    }

    /// Resolve which face a surface point lies on.
    ///
    /// Faces are tested in -x, +x, -y, +y, -z, +z order and the first one
    /// within tolerance wins. Points that drifted off every face fall back
    /// to the closest one.
    fn face_normal(&self, p: Vec3) -> Vec3 {
        let distances = [
            (p.x - self.min.x).abs(),
            (p.x - self.max.x).abs(),
            (p.y - self.min.y).abs(),
            (p.y - self.max.y).abs(),
            (p.z - self.min.z).abs(),
            (p.z - self.max.z).abs(),
        ];
        let extent = self.max - self.min;
        // Never wide enough to reach the opposite face of a thin box.
        let tolerance =
            (SURFACE_EPSILON * (1.0 + extent.max_element())).min(0.5 * extent.min_element());

        let face = distances
            .iter()
            .position(|d| *d < tolerance)
            .unwrap_or_else(|| {
                distances
                    .iter()
                    .enumerate()
                    .fold((0, f32::INFINITY), |best, (i, d)| {
                        if *d < best.1 {
                            (i, *d)
                        } else {
                            best
                        }
                    })
                    .0
            });

        FACE_NORMALS[face]
    }
}

impl Intersect for Aabb {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let origin = ray.origin();
        let inv_dir = ray.inv_direction();

        let t = Self::slab(self.min.x, self.max.x, origin.x, inv_dir.x)
            .intersect(&Self::slab(self.min.y, self.max.y, origin.y, inv_dir.y))
            .intersect(&Self::slab(self.min.z, self.max.z, origin.z, inv_dir.z));

        if !(t.max >= t.min.max(0.0) && t.min < f32::MAX) {
            return None;
        }

        let len = if t.min > 0.0 { t.min } else { t.max };
        let point = ray.at(len);

        Some(Intersection {
            len,
            point,
            outward_normal: self.face_normal(point),
        })
    }

    fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
