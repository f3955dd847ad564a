//! Infinite planes. They are unbounded and therefore tested outside of any hierarchy.

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Primitive;
use crate::ray::{HitRecord, Ray};
use crate::{MaterialId, Point3, Vector3};

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: crate::Real = 1e-6;

/// The plane through `point` with unit `normal`, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// A point on the plane
    pub point: Point3,
    /// Unit normal of the plane
    pub normal: Vector3,
    /// Material stamped onto hits
    pub material_id: MaterialId,
}

impl Plane {
    /// Creates a plane with material `0`. `normal` is normalized.
    pub fn new(point: Point3, normal: Vector3) -> Plane {
        Plane {
            point,
            normal: normal.normalize(),
            material_id: 0,
        }
    }

    /// Returns the plane with a material.
    pub fn with_material(mut self, material_id: MaterialId) -> Plane {
        self.material_id = material_id;
        self
    }
}

impl Bounded for Plane {
    fn aabb(&self) -> Aabb {
        Aabb::infinite()
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        let denom = self.normal.dot(&ray.direction);
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }
        let t = (self.point - ray.origin).dot(&self.normal) / denom;
        if !ray.accepts(t) {
            return None;
        }
        let mut hit = HitRecord::new(ray, t, self.normal);
        hit.material_id = self.material_id;
        ray.t_max = t;
        Some(hit)
    }
}
