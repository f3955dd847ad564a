//! This module defines [`Bvh`], a median-split bounding volume hierarchy over [`Primitive`]s.
//!
//! [`Bvh`]: struct.Bvh.html
//! [`Primitive`]: ../../bounding_hierarchy/trait.Primitive.html
//!

use std::ops::ControlFlow;

use log::debug;

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Primitive;
use crate::bvh::bvh_node::{BuildArena, LinearNode};
use crate::bvh::iter::BvhTraverseIterator;
use crate::ray::{HitRecord, Ray};

/// Capacity of the fixed traversal stack.
///
/// Median splits keep the tree depth at `ceil(log2(n))`, and a traversal never holds more
/// deferred nodes than the tree is deep. 64 levels cover any primitive count that fits
/// into memory.
pub const MAX_STACK_DEPTH: usize = 64;

/// The [`Bvh`] data structure. Holds the flattened nodes and the primitives, reordered so
/// that every leaf references a contiguous range of them.
///
/// A [`Bvh`] is immutable once built. Queries take `&self` and may run from many threads.
///
/// [`Bvh`]: struct.Bvh.html
///
#[derive(Debug, Clone)]
pub struct Bvh<T> {
    nodes: Vec<LinearNode>,
    primitives: Vec<T>,
    depth: usize,
}

impl<T: Bounded> Bvh<T> {
    /// Creates a new [`Bvh`] from the `primitives` slice, taking ownership of them.
    ///
    /// Each node splits its primitives at the median centroid along the longest axis of
    /// the centroid bounds. A node whose centroids all coincide becomes a leaf.
    /// Building over no primitives yields an empty hierarchy that every ray misses.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::bvh::Bvh;
    /// use tracer_accel::instance::Instance;
    /// use tracer_accel::shapes::{Shape, Sphere};
    /// use tracer_accel::transform::Transform;
    /// use tracer_accel::{Point3, Real, Vector3};
    /// use std::sync::Arc;
    ///
    /// let sphere = Arc::new(Shape::Sphere(Sphere::new(Point3::origin(), 1.0)));
    /// let instances: Vec<Instance> = (0..8)
    ///     .map(|i| {
    ///         Instance::new(sphere.clone())
    ///             .with_transform(Transform::translation(Vector3::new(i as Real * 4.0, 0.0, 0.0)))
    ///     })
    ///     .collect();
    ///
    /// let bvh = Bvh::build(instances);
    /// assert_eq!(bvh.len(), 8);
    /// assert_eq!(bvh.depth(), 3);
    /// ```
    ///
    /// [`Bvh`]: struct.Bvh.html
    ///
    pub fn build(mut primitives: Vec<T>) -> Bvh<T> {
        if primitives.is_empty() {
            debug!("Built an empty BVH.");
            return Bvh {
                nodes: Vec::new(),
                primitives,
                depth: 0,
            };
        }

        let arena = BuildArena::build(&mut primitives);
        let depth = arena.depth();
        assert!(
            depth <= MAX_STACK_DEPTH,
            "BVH depth {} exceeds the traversal stack of {} entries",
            depth,
            MAX_STACK_DEPTH
        );
        debug!(
            "Built BVH over {} primitives: {} nodes, {} leaves, depth {}.",
            primitives.len(),
            arena.len(),
            arena.leaves(),
            depth
        );

        Bvh {
            nodes: arena.flatten(),
            primitives,
            depth,
        }
    }
}

impl<T> Bvh<T> {
    /// Returns the bounds of the root node, or `None` if the hierarchy is empty.
    pub fn bounds(&self) -> Option<Aabb> {
        self.nodes.first().map(|root| *root.bounds())
    }

    /// Returns the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if the hierarchy holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Returns the depth of the deepest leaf. A single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The flattened nodes in depth-first pre-order. The root is at index `0`.
    pub fn nodes(&self) -> &[LinearNode] {
        &self.nodes
    }

    /// The primitives in leaf order.
    pub fn primitives(&self) -> &[T] {
        &self.primitives
    }

    /// Gives back the primitives, in leaf order.
    pub fn into_primitives(self) -> Vec<T> {
        self.primitives
    }

    /// Creates an iterator over the primitives whose leaf bounds are hit by `ray`.
    /// The primitives themselves are not tested.
    ///
    /// [`Ray`]: ../ray/struct.Ray.html
    ///
    pub fn traverse_iter<'bvh>(&'bvh self, ray: &Ray) -> BvhTraverseIterator<'bvh, T> {
        BvhTraverseIterator::new(self, ray)
    }

    /// Walks the nodes hit by `ray`, nearer child first, and hands the primitives of every
    /// visited leaf to `visit_leaf`. The bounds are tested against the ray as `visit_leaf`
    /// leaves it, so a shrinking `t_max` culls the rest of the walk.
    fn walk<F>(&self, ray: &mut Ray, mut visit_leaf: F) -> ControlFlow<()>
    where
        F: FnMut(&[T], &mut Ray) -> ControlFlow<()>,
    {
        if self.nodes.is_empty() {
            return ControlFlow::Continue(());
        }

        let mut stack = [0usize; MAX_STACK_DEPTH];
        let mut stack_size = 0;
        let mut current = 0;
        loop {
            let node = self.nodes[current];
            if node.bounds().intersects_ray(ray) {
                match node {
                    LinearNode::Leaf {
                        primitives_offset,
                        num_primitives,
                        ..
                    } => {
                        let leaf = &self.primitives
                            [primitives_offset..primitives_offset + num_primitives];
                        visit_leaf(leaf, ray)?;
                    }
                    LinearNode::Interior {
                        second_child_offset,
                        split_axis,
                        ..
                    } => {
                        // The first child holds the smaller coordinates along `split_axis`.
                        let (near, far) = if split_axis.of_vector(&ray.direction) > 0.0 {
                            (current + 1, second_child_offset)
                        } else {
                            (second_child_offset, current + 1)
                        };
                        stack[stack_size] = far;
                        stack_size += 1;
                        current = near;
                        continue;
                    }
                }
            }

            if stack_size == 0 {
                return ControlFlow::Continue(());
            }
            stack_size -= 1;
            current = stack[stack_size];
        }
    }
}

impl<T: Primitive> Bvh<T> {
    /// Finds the closest primitive hit by `ray` inside its `[t_min, t_max]` interval.
    ///
    /// Every hit lowers `ray.t_max`, so on return it holds the distance of the closest hit,
    /// or is unchanged on a miss.
    pub fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        let mut closest = None;
        let _ = self.walk(ray, |leaf, ray| {
            for primitive in leaf {
                if let Some(hit) = primitive.intersect(ray) {
                    ray.t_max = hit.t;
                    closest = Some(hit);
                }
            }
            ControlFlow::Continue(())
        });
        closest
    }

    /// Returns true if any primitive is hit inside the ray's interval. Stops at the first
    /// hit found, which need not be the closest. `ray` is left untouched.
    pub fn is_occluded(&self, ray: &Ray) -> bool {
        let mut probe = *ray;
        self.walk(&mut probe, |leaf, ray| {
            if leaf.iter().any(|primitive| primitive.is_occluded(ray)) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
    }
}

impl<T: Bounded> Bounded for Bvh<T> {
    fn aabb(&self) -> Aabb {
        self.bounds().unwrap_or_else(Aabb::empty)
    }
}

/// A [`Bvh`] is itself a [`Primitive`], which is how a mesh carries its own hierarchy
/// inside the scene's hierarchy.
impl<T: Primitive> Primitive for Bvh<T> {
    fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        Bvh::intersect(self, ray)
    }

    fn is_occluded(&self, ray: &Ray) -> bool {
        Bvh::is_occluded(self, ray)
    }
}
