//! A crate which exports rays, axis-aligned bounding boxes, a median-split bounding
//! volume hierarchy and an instancing layer with linear motion blur.
//!
//! ## About
//!
//! This crate is the spatial core of a ray tracer. Geometry is described in object space,
//! placed into world space by [`Instance`]s and collected into a [`Bvh`] which is built
//! once and is immutable afterwards. Integrators only see two queries:
//! closest-hit ([`Scene::intersect`]) and any-hit ([`Scene::is_occluded`]).
//!
//! The [`Bvh`] is built top-down by splitting every range of primitives at the exact median
//! of their centroids along the longest centroid axis. The resulting tree is flattened into a
//! depth-first array which is traversed iteratively, near child first, shrinking the ray's
//! `t_max` whenever a closer hit is found.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tracer_accel::instance::Instance;
//! use tracer_accel::ray::Ray;
//! use tracer_accel::scene::{SceneBuilder, SceneConfig};
//! use tracer_accel::shapes::{Shape, Sphere};
//! use tracer_accel::transform::Transform;
//! use tracer_accel::{Point3, Real, Vector3};
//!
//! let sphere = Arc::new(Shape::Sphere(Sphere::new(Point3::origin(), 1.0)));
//!
//! let mut builder = SceneBuilder::new(SceneConfig::default());
//! for i in 0..10 {
//!     let placement = Transform::translation(Vector3::new(i as Real * 3.0, 0.0, 0.0));
//!     builder.add_instance(
//!         Instance::new(sphere.clone())
//!             .with_transform(placement)
//!             .with_material(i),
//!     );
//! }
//! let scene = builder.build();
//!
//! let mut ray = Ray::new(Point3::new(-10.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
//! let hit = scene.intersect(&mut ray).unwrap();
//! assert_eq!(hit.material_id, 0);
//! assert!(scene.is_occluded(&Ray::new(Point3::new(3.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0))));
//! ```
//!
//! ## Features
//!
//! - `rayon` (default **enabled**) - parallel batch queries in [`Scene::intersect_batch`]
//! - `f64` (default **disabled**) - use `f64` instead of `f32` for all math
//! - `serde` (default **disabled**) - adds `Serialize` and `Deserialize` implementations for
//!   plain data types
//! - `cli` (default **disabled**) - builds the `tracer-accel-demo` binary
//!
//! [`Bvh`]: bvh::Bvh
//! [`Instance`]: instance::Instance
//! [`Scene::intersect`]: scene::Scene::intersect
//! [`Scene::is_occluded`]: scene::Scene::is_occluded
//! [`Scene::intersect_batch`]: scene::Scene::intersect_batch

#[cfg(feature = "f64")]
/// Float type used by this crate
pub type Real = f64;

#[cfg(not(feature = "f64"))]
/// Float type used by this crate
pub type Real = f32;

/// Point math type used by this crate. Type alias for [`nalgebra::Point3`].
pub type Point3 = nalgebra::Point3<Real>;

/// Vector math type used by this crate. Type alias for [`nalgebra::Vector3`].
pub type Vector3 = nalgebra::Vector3<Real>;

/// Texture coordinate type. Type alias for [`nalgebra::Vector2`].
pub type Vector2 = nalgebra::Vector2<Real>;

/// Linear part of a transform. Type alias for [`nalgebra::Matrix3`].
pub type Matrix3 = nalgebra::Matrix3<Real>;

/// Homogeneous transform matrix. Type alias for [`nalgebra::Matrix4`].
pub type Matrix4 = nalgebra::Matrix4<Real>;

/// Identifier of a material owned by the shading collaborators.
pub type MaterialId = usize;

#[cfg(feature = "f64")]
/// Archimedes' constant in `Real` precision
pub const PI: Real = std::f64::consts::PI;

#[cfg(not(feature = "f64"))]
/// Archimedes' constant in `Real` precision
pub const PI: Real = std::f32::consts::PI;

/// A minimal floating value used as a lower bound.
pub const EPSILON: Real = 0.00001;

/// Amount by which degenerate (zero-width) intervals are padded.
pub const THICKEN_EPSILON: Real = 0.0001;

/// Default lower bound of a ray's parametric interval. Keeps secondary rays from hitting
/// the surface they start on.
pub const DEFAULT_T_MIN: Real = 0.0001;

pub mod aabb;
pub mod axis;
pub mod bounding_hierarchy;
pub mod bvh;
pub mod error;
pub mod instance;
pub mod interval;
pub mod ray;
pub mod scene;
pub mod shapes;
pub mod transform;
mod utils;

#[cfg(test)]
mod testbase;

pub use error::{Error, Result};
