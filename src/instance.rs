//! Placement of shared object-space geometry into the world.

use std::sync::Arc;

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::{Geometry, Primitive};
use crate::error::Result;
use crate::ray::{HitRecord, Ray};
use crate::shapes::Shape;
use crate::transform::Transform;
use crate::{MaterialId, Matrix4, Real, Vector3};

/// Motion vectors with a squared length at or below this are treated as no motion.
pub const MOTION_BLUR_THRESHOLD: Real = 1e-8;

/// A placement of geometry into world space.
///
/// The geometry is shared, so one mesh BVH can back any number of instances. An instance
/// owns its transform, an optional linear motion over the shutter interval and a material
/// id, and caches its world-space bounds.
///
/// At shutter time `t` the geometry is displaced by `t * motion_blur`. The cached bounds
/// cover the whole sweep from `t = 0` to `t = 1`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use tracer_accel::bounding_hierarchy::Primitive;
/// use tracer_accel::instance::Instance;
/// use tracer_accel::ray::Ray;
/// use tracer_accel::shapes::{Shape, Sphere};
/// use tracer_accel::transform::Transform;
/// use tracer_accel::{Point3, Vector3};
///
/// let sphere = Arc::new(Shape::Sphere(Sphere::new(Point3::origin(), 1.0)));
/// let instance = Instance::new(sphere)
///     .with_transform(Transform::translation(Vector3::new(0.0, 0.0, 5.0)))
///     .with_material(3);
///
/// let mut ray = Ray::new(Point3::origin(), Vector3::z());
/// let hit = instance.intersect(&mut ray).unwrap();
/// assert_eq!(hit.material_id, 3);
/// assert_eq!(hit.point, Point3::new(0.0, 0.0, 4.0));
/// ```
#[derive(Debug, Clone)]
pub struct Instance<G = Shape> {
    geometry: Arc<G>,
    transform: Transform,
    motion_blur: Option<Vector3>,
    material_id: MaterialId,
    world_aabb: Aabb,
}

impl<G: Geometry> Instance<G> {
    /// Places `geometry` with the identity transform, no motion and material `0`.
    pub fn new(geometry: Arc<G>) -> Instance<G> {
        let world_aabb = geometry.local_aabb();
        Instance {
            geometry,
            transform: Transform::identity(),
            motion_blur: None,
            material_id: 0,
            world_aabb,
        }
    }

    /// Replaces the transform.
    pub fn with_transform(mut self, transform: Transform) -> Instance<G> {
        self.transform = transform;
        self.update_bounds();
        self
    }

    /// Replaces the transform by a raw matrix, failing if it is not invertible.
    pub fn with_matrix(self, matrix: Matrix4) -> Result<Instance<G>> {
        Ok(self.with_transform(Transform::new(matrix)?))
    }

    /// Sets the world-space displacement over the shutter interval.
    pub fn with_motion_blur(mut self, motion: Vector3) -> Instance<G> {
        self.motion_blur = (motion.norm_squared() > MOTION_BLUR_THRESHOLD).then_some(motion);
        self.update_bounds();
        self
    }

    /// Sets the material stamped onto every hit.
    pub fn with_material(mut self, material_id: MaterialId) -> Instance<G> {
        self.material_id = material_id;
        self
    }

    /// The shared object-space geometry.
    pub fn geometry(&self) -> &Arc<G> {
        &self.geometry
    }

    /// The object-to-world transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The displacement over the shutter interval, if any.
    pub fn motion_blur(&self) -> Option<Vector3> {
        self.motion_blur
    }

    /// The material stamped onto hits.
    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    fn update_bounds(&mut self) {
        let placed = self.geometry.local_aabb().transformed(self.transform.matrix());
        // Placing a thin box far from the origin can round it back to zero width.
        self.world_aabb = match self.motion_blur {
            Some(motion) => placed.join(&placed.translated(&motion)),
            None => placed,
        }
        .thickened();
    }

    /// True if world rays can be handed to the geometry as they are.
    fn is_static_identity(&self) -> bool {
        self.motion_blur.is_none() && self.transform.is_identity()
    }

    fn motion_offset(&self, time: Real) -> Vector3 {
        self.motion_blur
            .map_or_else(Vector3::zeros, |motion| motion * time)
    }

    /// Moves a world ray into object space. The interval and time carry over unchanged.
    fn local_ray(&self, ray: &Ray, offset: Vector3) -> Ray {
        Ray {
            origin: self.transform.inverse_point(&(ray.origin - offset)),
            direction: self.transform.inverse_vector(&ray.direction),
            ..*ray
        }
    }
}

impl<G: Geometry> Bounded for Instance<G> {
    fn aabb(&self) -> Aabb {
        self.world_aabb
    }
}

impl<G: Geometry> Primitive for Instance<G> {
    fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        if self.is_static_identity() {
            let hit = self.geometry.local_intersect(ray)?;
            return Some(HitRecord {
                material_id: self.material_id,
                ..hit
            });
        }

        let offset = self.motion_offset(ray.time);
        let mut local = self.local_ray(ray, offset);
        let mut hit = self.geometry.local_intersect(&mut local)?;

        // The inverse-transpose keeps the normal facing against the world ray.
        hit.point = self.transform.point(&hit.point) + offset;
        hit.normal = self.transform.normal(&hit.normal).normalize();
        hit.tangent = hit
            .tangent
            .map(|tangent| self.transform.vector(&tangent).normalize());
        hit.material_id = self.material_id;
        ray.t_max = local.t_max;
        Some(hit)
    }

    fn is_occluded(&self, ray: &Ray) -> bool {
        if self.is_static_identity() {
            return self.geometry.local_is_occluded(ray);
        }
        let offset = self.motion_offset(ray.time);
        self.geometry.local_is_occluded(&self.local_ray(ray, offset))
    }
}
