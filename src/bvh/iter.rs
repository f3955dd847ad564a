use crate::bvh::{Bvh, LinearNode, MAX_STACK_DEPTH};
use crate::ray::Ray;

/// Iterator to traverse a [`Bvh`] without memory allocations.
///
/// Yields the primitives of every leaf whose bounds are hit by the ray, nearer subtrees
/// first. The ray's interval is captured on creation and does not shrink.
pub struct BvhTraverseIterator<'bvh, T> {
    /// Reference to the [`Bvh`] to traverse
    bvh: &'bvh Bvh<T>,
    /// Copy of the input ray
    ray: Ray,
    /// Traversal stack of deferred far children
    stack: [usize; MAX_STACK_DEPTH],
    /// Size of the traversal stack
    stack_size: usize,
    /// Node to visit next before falling back to the stack
    next_node: Option<usize>,
    /// Remaining primitives of the current leaf
    leaf: std::slice::Iter<'bvh, T>,
}

impl<'bvh, T> BvhTraverseIterator<'bvh, T> {
    /// Creates a new [`BvhTraverseIterator`]
    pub fn new(bvh: &'bvh Bvh<T>, ray: &Ray) -> Self {
        BvhTraverseIterator {
            bvh,
            ray: *ray,
            stack: [0; MAX_STACK_DEPTH],
            stack_size: 0,
            next_node: if bvh.nodes().is_empty() { None } else { Some(0) },
            leaf: bvh.primitives()[..0].iter(),
        }
    }

    /// Push node onto stack.
    ///
    /// # Panics
    ///
    /// Panics if `stack[stack_size]` is out of bounds.
    fn stack_push(&mut self, node: usize) {
        self.stack[self.stack_size] = node;
        self.stack_size += 1;
    }

    /// Pop the stack and return the node, if any.
    fn stack_pop(&mut self) -> Option<usize> {
        if self.stack_size == 0 {
            return None;
        }
        self.stack_size -= 1;
        Some(self.stack[self.stack_size])
    }
}

impl<'bvh, T> Iterator for BvhTraverseIterator<'bvh, T> {
    type Item = &'bvh T;

    fn next(&mut self) -> Option<&'bvh T> {
        loop {
            if let Some(primitive) = self.leaf.next() {
                return Some(primitive);
            }

            let index = match self.next_node.take() {
                Some(index) => index,
                None => self.stack_pop()?,
            };
            let bvh = self.bvh;
            let node = &bvh.nodes()[index];
            if !node.bounds().intersects_ray(&self.ray) {
                continue;
            }

            match *node {
                LinearNode::Leaf {
                    primitives_offset,
                    num_primitives,
                    ..
                } => {
                    self.leaf =
                        bvh.primitives()[primitives_offset..primitives_offset + num_primitives].iter();
                }
                LinearNode::Interior {
                    second_child_offset,
                    split_axis,
                    ..
                } => {
                    if split_axis.of_vector(&self.ray.direction) > 0.0 {
                        self.stack_push(second_child_offset);
                        self.next_node = Some(index + 1);
                    } else {
                        self.stack_push(index + 1);
                        self.next_node = Some(second_child_offset);
                    }
                }
            }
        }
    }
}
