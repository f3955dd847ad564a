//! This module defines the contracts between geometry and the acceleration structure.
//!
//! [`Primitive`] is what a [`Bvh`] stores: something with world-space bounds that can be hit
//! by a world-space ray. [`Geometry`] is object-space geometry which only becomes a
//! [`Primitive`] once an [`Instance`] places it into the world.
//!
//! Both are queried concurrently by many rendering threads once a scene is built, which is
//! why intersection takes `&self`: implementations must not hide mutable state.
//!
//! [`Bvh`]: crate::bvh::Bvh
//! [`Instance`]: crate::instance::Instance

use crate::aabb::{Aabb, Bounded};
use crate::ray::{HitRecord, Ray};

/// Describes a shape that can be stored in a [`Bvh`] and intersected in world space.
///
/// # Contract
///
/// `intersect` reports only hits with `ray.t_min <= t <= ray.t_max`. On a hit it returns the
/// record and lowers `ray.t_max` to the hit distance; on a miss it leaves the ray alone.
///
/// # Examples
/// ```
/// use tracer_accel::aabb::{Aabb, Bounded};
/// use tracer_accel::bounding_hierarchy::Primitive;
/// use tracer_accel::ray::{HitRecord, Ray};
/// use tracer_accel::{Point3, Vector3};
///
/// /// The plane `x = 0`, restricted to the unit square.
/// struct Wall;
///
/// impl Bounded for Wall {
///     fn aabb(&self) -> Aabb {
///         Aabb::new(Point3::new(0.0, -1.0, -1.0), Point3::new(0.0, 1.0, 1.0))
///     }
/// }
///
/// impl Primitive for Wall {
///     fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
///         let t = -ray.origin.x / ray.direction.x;
///         let p = ray.at(t);
///         if !ray.accepts(t) || p.y.abs() > 1.0 || p.z.abs() > 1.0 {
///             return None;
///         }
///         ray.t_max = t;
///         Some(HitRecord::new(ray, t, Vector3::x()))
///     }
/// }
///
/// let mut ray = Ray::new(Point3::new(-2.0, 0.0, 0.0), Vector3::x());
/// assert_eq!(Wall.intersect(&mut ray).map(|hit| hit.t), Some(2.0));
/// assert_eq!(ray.t_max, 2.0);
/// assert!(!Wall.is_occluded(&Ray::new(Point3::new(-2.0, 5.0, 0.0), Vector3::x())));
/// ```
///
/// [`Bvh`]: crate::bvh::Bvh
pub trait Primitive: Bounded {
    /// Finds the closest hit inside the ray's interval and lowers `ray.t_max` to it.
    fn intersect(&self, ray: &mut Ray) -> Option<HitRecord>;

    /// Returns true if anything is hit inside the ray's interval. The default runs
    /// [`Primitive::intersect`] on a private copy of `ray`.
    fn is_occluded(&self, ray: &Ray) -> bool {
        let mut probe = *ray;
        self.intersect(&mut probe).is_some()
    }
}

/// Object-space geometry that is placed into the world by an [`Instance`].
///
/// The contract matches [`Primitive`], with the ray given in the geometry's own frame.
/// A single value may back many instances, so `local_intersect` must be reentrant.
///
/// [`Instance`]: crate::instance::Instance
pub trait Geometry {
    /// Returns the bounds in object space.
    fn local_aabb(&self) -> Aabb;

    /// Finds the closest hit inside the ray's interval and lowers `ray.t_max` to it.
    fn local_intersect(&self, ray: &mut Ray) -> Option<HitRecord>;

    /// Returns true if anything is hit inside the ray's interval.
    fn local_is_occluded(&self, ray: &Ray) -> bool {
        let mut probe = *ray;
        self.local_intersect(&mut probe).is_some()
    }
}

impl<P: Primitive + ?Sized> Primitive for &P {
    fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        (**self).intersect(ray)
    }

    fn is_occluded(&self, ray: &Ray) -> bool {
        (**self).is_occluded(ray)
    }
}
