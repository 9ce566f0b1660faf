//! Oriented box primitive.

use crate::hittable::{Intersect, Intersection, PARALLEL_EPSILON};
use crate::GeometryError;
use lux_math::{Ray, Vec3};

/// Allowed deviation of `|x . (y x z)|` from 1 for unit axes.
const ORTHOGONALITY_TOLERANCE: f32 = 1e-4;

/// A box with arbitrary orientation.
///
/// Defined by a center and three axis vectors whose lengths are the
/// half-extents along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    center: Vec3,
    axes: [Vec3; 3],
    half_lengths: [f32; 3],
    corrected: bool,
}

impl Obb {
    /// Create an oriented box, repairing non-orthogonal axes.
    ///
    /// Axes that are not mutually orthogonal are a caller error: the y and
    /// z directions are re-orthogonalized against x (Gram-Schmidt), the
    /// supplied half-lengths are kept, and a warning is logged. Use
    /// [`Obb::try_new`] to reject such input instead.
    pub fn new(center: Vec3, x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        let (obb, triple_product) = Self::build(center, [x_axis, y_axis, z_axis]);
        if obb.corrected {
            log::warn!(
                "OBB axes at {:?} are not orthogonal (|x . (y x z)| = {:.6}); re-orthogonalized against the x axis",
                center,
                triple_product
            );
        }
        obb
    }

    /// Create an oriented box, failing if the axes are not orthogonal.
    pub fn try_new(
        center: Vec3,
        x_axis: Vec3,
        y_axis: Vec3,
        z_axis: Vec3,
    ) -> Result<Self, GeometryError> {
        let (obb, triple_product) = Self::build(center, [x_axis, y_axis, z_axis]);
        if obb.corrected {
            return Err(GeometryError::NonOrthogonalAxes { triple_product });
        }
        Ok(obb)
    }

    fn build(center: Vec3, axes: [Vec3; 3]) -> (Self, f32) {
        let half_lengths = axes.map(Vec3::length);

        let x = axes[0].try_normalize().unwrap_or(Vec3::X);
        let y = axes[1]
            .try_normalize()
            .unwrap_or_else(|| x.any_orthonormal_vector());
        let z = axes[2].try_normalize().unwrap_or_else(|| x.cross(y));

        let triple_product = x.dot(y.cross(z)).abs();
        if (triple_product - 1.0).abs() <= ORTHOGONALITY_TOLERANCE {
            let obb = Self {
                center,
                axes: [x, y, z],
                half_lengths,
                corrected: false,
            };
            return (obb, triple_product);
        }

        let y = (y - x * y.dot(x))
            .try_normalize()
            .unwrap_or_else(|| x.any_orthonormal_vector());
        let z = z - x * z.dot(x);
        let z = (z - y * z.dot(y))
            .try_normalize()
            .unwrap_or_else(|| x.cross(y));

        let obb = Self {
            center,
            axes: [x, y, z],
            half_lengths,
            corrected: true,
        };
        (obb, triple_product)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Unit axis directions.
    pub fn axes(&self) -> [Vec3; 3] {
        self.axes
    }

    pub fn half_lengths(&self) -> [f32; 3] {
        self.half_lengths
    }

    /// Whether the constructor had to re-orthogonalize the axes.
    pub fn axes_corrected(&self) -> bool {
        self.corrected
    }
}

impl Intersect for Obb {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        let mut n_min = Vec3::ZERO;
        let mut n_max = Vec3::ZERO;

        let to_center = self.center - ray.origin();

        for (axis, half_length) in self.axes.iter().zip(self.half_lengths) {
            let e = axis.dot(to_center);
            let f = axis.dot(ray.direction());

            if f.abs() > PARALLEL_EPSILON {
                // t0 crosses the +axis face, t1 the -axis face.
                let mut t0 = (e + half_length) / f;
                let mut t1 = (e - half_length) / f;
                let mut near_normal = *axis;
                let mut far_normal = -*axis;

                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                    std::mem::swap(&mut near_normal, &mut far_normal);
                }

                if t0 > t_min {
                    t_min = t0;
                    n_min = near_normal;
                }
                if t1 < t_max {
                    t_max = t1;
                    n_max = far_normal;
                }

                if t_min > t_max || t_max < 0.0 {
                    return None;
                }
            } else if -e - half_length > 0.0 || -e + half_length < 0.0 {
                // Parallel to this slab and outside it.
                return None;
            }
        }

        let (len, normal) = if t_min > 0.0 {
            (t_min, n_min)
        } else {
            (t_max, n_max)
        };
        if !len.is_finite() {
            return None;
        }

        Some(Intersection::new(ray, len, normal))
    }

    fn contains(&self, point: Vec3) -> bool {
        let p = point - self.center;
        self.axes
            .iter()
            .zip(self.half_lengths)
            .all(|(axis, half_length)| p.dot(*axis).abs() <= half_length)
    }
}
