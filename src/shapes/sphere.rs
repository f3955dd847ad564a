//! This module defines a Sphere and its intersection algorithm

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Geometry;
use crate::ray::{HitRecord, Ray};
use crate::{Point3, Real, Vector2, Vector3, PI};

/// A representation of a Sphere
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    /// Center of the sphere
    pub center: Point3,
    /// Radius of the sphere
    pub radius: Real,
}

impl Sphere {
    /// Creates a sphere centered on a given point with a radius
    pub fn new(center: Point3, radius: Real) -> Sphere {
        Sphere { center, radius }
    }
}

/// Texture coordinates of a point on the unit sphere. `v` runs from the south pole (`0`)
/// to the north pole (`1`), `u` once around the `y` axis starting at `-x`.
fn sphere_uv(unit: &Vector3) -> Vector2 {
    let theta = (-unit.y).clamp(-1.0, 1.0).acos();
    let phi = (-unit.z).atan2(unit.x) + PI;
    Vector2::new(phi / (2.0 * PI), theta / PI)
}

impl Bounded for Sphere {
    fn aabb(&self) -> Aabb {
        let half_size = Vector3::repeat(self.radius);
        Aabb::new(self.center - half_size, self.center + half_size)
    }
}

impl Geometry for Sphere {
    fn local_aabb(&self) -> Aabb {
        self.aabb()
    }

    fn local_intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        let oc = ray.origin - self.center;
        let a = ray.direction.norm_squared();
        let half_b = oc.dot(&ray.direction);
        let c = oc.norm_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let mut root = (-half_b - sqrtd) / a;
        if !ray.accepts(root) {
            root = (-half_b + sqrtd) / a;
            if !ray.accepts(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        let hit = HitRecord::new(ray, root, outward_normal).with_uv(sphere_uv(&outward_normal));
        ray.t_max = root;
        Some(hit)
    }
}
