//! The queryable scene: one hierarchy over all instances plus the unbounded planes.
//!
//! A scene is assembled with a [`SceneBuilder`] and frozen by [`SceneBuilder::build`], which
//! consumes the builder. After that the scene only answers queries and can be shared freely
//! between rendering threads.

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::aabb::Aabb;
use crate::bounding_hierarchy::Primitive;
use crate::bvh::Bvh;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::ray::{HitRecord, Ray};
use crate::shapes::{Plane, Shape};
use crate::transform::{Transform, TransformOp};
use crate::{Point3, Real, Vector3};

/// Tolerances of the rays a scene spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneConfig {
    /// Distance shadow ray origins are pushed off the surface along its normal.
    pub shadow_ray_epsilon: Real,
    /// Lower bound of the parametric interval of primary rays.
    pub intersection_test_epsilon: Real,
}

impl Default for SceneConfig {
    fn default() -> SceneConfig {
        SceneConfig {
            shadow_ray_epsilon: 1e-3,
            intersection_test_epsilon: 1e-4,
        }
    }
}

/// Geometry registered under an object id, with the transform it was placed with.
#[derive(Debug, Clone)]
pub struct RegisteredObject {
    /// The shared geometry.
    pub geometry: Arc<Shape>,
    /// The complete object-to-world transform of the registered placement.
    pub transform: Transform,
}

/// Maps object ids to registered geometry, so that later placements can reuse it.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: HashMap<u32, RegisteredObject>,
}

impl ObjectRegistry {
    /// Creates an empty registry.
    pub fn new() -> ObjectRegistry {
        ObjectRegistry::default()
    }

    /// Registers `geometry` placed by `transform` under `id`.
    pub fn register(&mut self, id: u32, geometry: Arc<Shape>, transform: Transform) -> Result<()> {
        if self.objects.contains_key(&id) {
            return Err(Error::DuplicateObject(id));
        }
        self.objects.insert(
            id,
            RegisteredObject {
                geometry,
                transform,
            },
        );
        Ok(())
    }

    /// Looks up a registered object.
    pub fn get(&self, id: u32) -> Option<&RegisteredObject> {
        self.objects.get(&id)
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Places the geometry of `base_id` again.
    ///
    /// The new placement is `ops` applied after the base transform, or `ops` alone if
    /// `reset_transform` is set. The returned instance has no motion and material `0`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use tracer_accel::scene::ObjectRegistry;
    /// use tracer_accel::shapes::{Shape, Sphere};
    /// use tracer_accel::transform::{Transform, TransformOp};
    /// use tracer_accel::{Point3, Vector3};
    ///
    /// let mut registry = ObjectRegistry::new();
    /// let sphere = Arc::new(Shape::Sphere(Sphere::new(Point3::origin(), 1.0)));
    /// registry.register(1, sphere, Transform::translation(Vector3::new(10.0, 0.0, 0.0))).unwrap();
    ///
    /// let ops = [TransformOp::Translation(Vector3::new(0.0, 5.0, 0.0))];
    /// let stacked = registry.instantiate(1, &ops, false).unwrap();
    /// assert_eq!(stacked.transform().point(&Point3::origin()), Point3::new(10.0, 5.0, 0.0));
    ///
    /// let reset = registry.instantiate(1, &ops, true).unwrap();
    /// assert_eq!(reset.transform().point(&Point3::origin()), Point3::new(0.0, 5.0, 0.0));
    /// ```
    pub fn instantiate(
        &self,
        base_id: u32,
        ops: &[TransformOp],
        reset_transform: bool,
    ) -> Result<Instance> {
        let Some(base) = self.objects.get(&base_id) else {
            warn!("Base object id {} is not registered.", base_id);
            return Err(Error::UnknownObject(base_id));
        };
        let placement = Transform::from_ops(ops)?;
        let transform = if reset_transform {
            placement
        } else {
            base.transform.then(&placement)
        };
        Ok(Instance::new(base.geometry.clone()).with_transform(transform))
    }

    /// Like [`ObjectRegistry::instantiate`], and registers the new placement under `id` so
    /// it can serve as a base itself.
    pub fn instantiate_as(
        &mut self,
        id: u32,
        base_id: u32,
        ops: &[TransformOp],
        reset_transform: bool,
    ) -> Result<Instance> {
        let instance = self.instantiate(base_id, ops, reset_transform)?;
        self.register(id, instance.geometry().clone(), *instance.transform())?;
        Ok(instance)
    }
}

/// Collects instances and planes until the scene is built.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    config: SceneConfig,
    instances: Vec<Instance>,
    planes: Vec<Plane>,
}

impl SceneBuilder {
    /// Creates an empty builder.
    pub fn new(config: SceneConfig) -> SceneBuilder {
        SceneBuilder {
            config,
            instances: Vec::new(),
            planes: Vec::new(),
        }
    }

    /// Adds an instance to the hierarchy.
    pub fn add_instance(&mut self, instance: Instance) -> &mut SceneBuilder {
        self.instances.push(instance);
        self
    }

    /// Adds an unbounded plane, which is tested against every ray.
    pub fn add_plane(&mut self, plane: Plane) -> &mut SceneBuilder {
        self.planes.push(plane);
        self
    }

    /// Number of instances added so far.
    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    /// Builds the hierarchy over all instances.
    pub fn build(self) -> Scene {
        let num_instances = self.instances.len();
        let bvh = Bvh::build(self.instances);
        match bvh.bounds() {
            Some(bounds) => info!(
                "Built scene with {} instances and {} planes, bounds {}.",
                num_instances,
                self.planes.len(),
                bounds
            ),
            None => info!(
                "Built scene without instances and {} planes.",
                self.planes.len()
            ),
        }
        Scene {
            config: self.config,
            bvh,
            planes: self.planes,
        }
    }
}

/// An immutable scene answering closest-hit and any-hit queries.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    bvh: Bvh<Instance>,
    planes: Vec<Plane>,
}

impl Scene {
    /// Finds the closest hit along `ray`, lowering `ray.t_max` to it.
    pub fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        let mut closest = self.bvh.intersect(ray);
        for plane in &self.planes {
            if let Some(hit) = plane.intersect(ray) {
                closest = Some(hit);
            }
        }
        closest
    }

    /// Returns true if anything is hit inside the ray's interval.
    pub fn is_occluded(&self, ray: &Ray) -> bool {
        self.bvh.is_occluded(ray) || self.planes.iter().any(|plane| plane.is_occluded(ray))
    }

    /// Closest hits for many rays. Runs in parallel with the `rayon` feature.
    pub fn intersect_batch(&self, rays: &mut [Ray]) -> Vec<Option<HitRecord>> {
        #[cfg(feature = "rayon")]
        {
            rays.par_iter_mut().map(|ray| self.intersect(ray)).collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            rays.iter_mut().map(|ray| self.intersect(ray)).collect()
        }
    }

    /// A camera ray. Its interval starts at `intersection_test_epsilon`.
    pub fn primary_ray(&self, origin: Point3, direction: Vector3) -> Ray {
        Ray::new(origin, direction)
            .with_interval(self.config.intersection_test_epsilon, Real::INFINITY)
    }

    /// A ray from a surface point towards a light. The origin is pushed off the surface
    /// along `normal`, and the light sits at `t = 1`.
    pub fn shadow_ray(&self, point: Point3, normal: Vector3, light_position: Point3) -> Ray {
        let origin = point + normal * self.config.shadow_ray_epsilon;
        Ray::new(origin, light_position - origin).with_interval(0.0, 1.0)
    }

    /// Bounds of all instances, or `None` without instances. Planes are not included.
    pub fn bounds(&self) -> Option<Aabb> {
        self.bvh.bounds()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The hierarchy over the instances.
    pub fn bvh(&self) -> &Bvh<Instance> {
        &self.bvh
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }
}
