//! Closed set of scene primitives.

use crate::{
    hittable::{Intersect, Intersection},
    Aabb, Hemisphere, Material, Obb, Plane, Sphere, Triangle,
};
use lux_math::{Ray, Vec3};

/// Geometry of a single primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Aabb(Aabb),
    Obb(Obb),
    Sphere(Sphere),
    Hemisphere(Hemisphere),
    Triangle(Triangle),
    Plane(Plane),
}

macro_rules! impl_geometry_from {
    ($($variant:ident),*) => {
        $(impl From<$variant> for Geometry {
            fn from(g: $variant) -> Self {
                Geometry::$variant(g)
            }
        })*
    };
}

impl_geometry_from!(Aabb, Obb, Sphere, Hemisphere, Triangle, Plane);

impl Intersect for Geometry {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Geometry::Aabb(g) => g.intersect(ray),
            Geometry::Obb(g) => g.intersect(ray),
            Geometry::Sphere(g) => g.intersect(ray),
            Geometry::Hemisphere(g) => g.intersect(ray),
            Geometry::Triangle(g) => g.intersect(ray),
            Geometry::Plane(g) => g.intersect(ray),
        }
    }

    fn contains(&self, point: Vec3) -> bool {
        match self {
            Geometry::Aabb(g) => g.contains(point),
            Geometry::Obb(g) => g.contains(point),
            Geometry::Sphere(g) => g.contains(point),
            Geometry::Hemisphere(g) => g.contains(point),
            Geometry::Triangle(g) => g.contains(point),
            Geometry::Plane(g) => g.contains(point),
        }
    }
}

/// A primitive together with the material it owns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub material: Material,
}

impl Shape {
    pub fn new(geometry: impl Into<Geometry>, material: Material) -> Self {
        Self {
            geometry: geometry.into(),
            material,
        }
    }

    /// Nearest intersection along `ray`, with the outward normal.
    #[inline]
    pub fn ray_intersect(&self, ray: &Ray) -> Option<Intersection> {
        self.geometry.intersect(ray)
    }

    /// Whether `point` lies inside the shape's volume.
    #[inline]
    pub fn point_intersect(&self, point: Vec3) -> bool {
        self.geometry.contains(point)
    }
}
