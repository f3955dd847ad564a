//! Common utilities shared by unit tests.
#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use obj::{load_obj, Obj, Position};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::{Geometry, Primitive};
use crate::bvh::Bvh;
use crate::ray::{HitRecord, Ray};
use crate::shapes::{Mesh, Sphere, Triangle};
use crate::{Point3, Real, Vector3};

/// A vector represented as a tuple
pub type TupleVec = (Real, Real, Real);

/// Generate a `TupleVec` for [`proptest::strategy::Strategy`] from -1000 to 1000.
/// Small enough to keep intersection distances accurate in `f32`.
pub fn tuplevec_small_strategy() -> impl Strategy<Value = TupleVec> {
    (
        -1000.0 as Real..1000.0 as Real,
        -1000.0 as Real..1000.0 as Real,
        -1000.0 as Real..1000.0 as Real,
    )
}

/// Convert a `TupleVec` to a [`Point3`].
pub fn tuple_to_point(tpl: &TupleVec) -> Point3 {
    Point3::new(tpl.0, tpl.1, tpl.2)
}

/// Convert a `TupleVec` to a [`Vector3`].
pub fn tuple_to_vector(tpl: &TupleVec) -> Vector3 {
    Vector3::new(tpl.0, tpl.1, tpl.2)
}

/// A world-space sphere which reports its `id` as material.
#[derive(Debug, Clone)]
pub struct Ball {
    id: usize,
    sphere: Sphere,
}

impl Ball {
    pub fn new(id: usize, center: Point3, radius: Real) -> Ball {
        Ball {
            id,
            sphere: Sphere::new(center, radius),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn center(&self) -> Point3 {
        self.sphere.center
    }

    pub fn radius(&self) -> Real {
        self.sphere.radius
    }
}

impl Bounded for Ball {
    fn aabb(&self) -> Aabb {
        self.sphere.aabb()
    }
}

impl Primitive for Ball {
    fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        let hit = self.sphere.local_intersect(ray)?;
        Some(HitRecord {
            material_id: self.id,
            ..hit
        })
    }
}

/// Wraps a primitive and counts the intersection tests run against it.
#[derive(Debug)]
pub struct Counted<P> {
    inner: P,
    calls: Arc<AtomicUsize>,
}

impl<P> Counted<P> {
    pub fn new(inner: P, calls: Arc<AtomicUsize>) -> Counted<P> {
        Counted { inner, calls }
    }
}

impl<P: Bounded> Bounded for Counted<P> {
    fn aabb(&self) -> Aabb {
        self.inner.aabb()
    }
}

impl<P: Primitive> Primitive for Counted<P> {
    fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.intersect(ray)
    }

    fn is_occluded(&self, ray: &Ray) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.is_occluded(ray)
    }
}

/// Generate 21 unit `Ball`s along the X axis centered on multiples of 5 (-50, -45, .., 50).
/// The id of the ball at the origin is 10.
pub fn generate_aligned_balls() -> Vec<Ball> {
    (0..21)
        .map(|i| Ball::new(i, Point3::new((i as Real - 10.0) * 5.0, 0.0, 0.0), 1.0))
        .collect()
}

/// Creates a [`Bvh`] for a fixed scene structure.
pub fn build_some_bvh() -> Bvh<Ball> {
    Bvh::build(generate_aligned_balls())
}

/// Creates `n` deterministic random balls inside `[-100, 100]^3`.
pub fn generate_random_balls(seed: u64, n: usize) -> Vec<Ball> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|id| {
            let center = Point3::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
            );
            Ball::new(id, center, rng.random_range(0.5..2.0))
        })
        .collect()
}

/// Closest hit of a linear scan over all primitives.
pub fn brute_force_intersect<P: Primitive>(primitives: &[P], ray: &mut Ray) -> Option<HitRecord> {
    let mut closest = None;
    for primitive in primitives {
        if let Some(hit) = primitive.intersect(ray) {
            closest = Some(hit);
        }
    }
    closest
}

/// Any-hit test of a linear scan over all primitives.
pub fn brute_force_occluded<P: Primitive>(primitives: &[P], ray: &Ray) -> bool {
    primitives.iter().any(|primitive| primitive.is_occluded(ray))
}

/// A cube spanning `[-1, 1]^3`, two triangles per face.
const CUBE_OBJ: &str = "\
o cube
v -1.0 -1.0 -1.0
v 1.0 -1.0 -1.0
v 1.0 1.0 -1.0
v -1.0 1.0 -1.0
v -1.0 -1.0 1.0
v 1.0 -1.0 1.0
v 1.0 1.0 1.0
v -1.0 1.0 1.0
f 1 3 2
f 1 4 3
f 5 6 7
f 5 7 8
f 1 2 6
f 1 6 5
f 4 7 3
f 4 8 7
f 1 5 8
f 1 8 4
f 2 3 7
f 2 7 6
";

/// Loads the cube from its OBJ description.
pub fn load_obj_mesh() -> Mesh {
    let cube: Obj<Position, u32> =
        load_obj(CUBE_OBJ.as_bytes()).expect("Failed to decode .obj file data.");
    let points: Vec<Point3> = cube
        .vertices
        .iter()
        .map(|vertex| {
            let [x, y, z] = vertex.position;
            Point3::new(x as Real, y as Real, z as Real)
        })
        .collect();
    let triangles = cube
        .indices
        .chunks_exact(3)
        .map(|face| {
            Triangle::new(
                points[face[0] as usize],
                points[face[1] as usize],
                points[face[2] as usize],
            )
        })
        .collect();
    Mesh::new(triangles).expect("cube has triangles")
}
