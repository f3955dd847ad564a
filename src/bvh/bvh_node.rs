use crate::aabb::{Aabb, Bounded};
use crate::axis::Axis;
use crate::utils::float_order;
use log::trace;

/// One node of the flattened [`Bvh`], stored in depth-first pre-order.
///
/// The first child of an interior node always directly follows it in the array, so only the
/// index of the second child is stored.
///
/// [`Bvh`]: crate::bvh::Bvh
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LinearNode {
    /// Leaf node referencing a range of the reordered primitive array.
    Leaf {
        /// The joint bounds of the primitives in this leaf.
        bounds: Aabb,

        /// Index of the first primitive of this leaf.
        primitives_offset: usize,

        /// Number of primitives in this leaf. Never zero.
        num_primitives: usize,
    },
    /// Inner node.
    Interior {
        /// The joint bounds of both subtrees.
        bounds: Aabb,

        /// Index of the root node of the second subtree.
        second_child_offset: usize,

        /// Axis along which the primitives were partitioned. The first child holds the
        /// smaller centroid coordinates.
        split_axis: Axis,
    },
}

impl LinearNode {
    /// Returns the bounds of this node.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        match self {
            LinearNode::Leaf { bounds, .. } | LinearNode::Interior { bounds, .. } => bounds,
        }
    }

    /// Returns true for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, LinearNode::Leaf { .. })
    }

    /// Returns the number of primitives referenced by this node, zero for interior nodes.
    pub fn num_primitives(&self) -> usize {
        match *self {
            LinearNode::Leaf { num_primitives, .. } => num_primitives,
            LinearNode::Interior { .. } => 0,
        }
    }
}

/// Transient node of the build tree. Children are indices into the owning [`BuildArena`].
#[derive(Debug, Copy, Clone)]
enum BuildNode {
    Leaf {
        bounds: Aabb,
        first_prim_offset: usize,
        num_primitives: usize,
    },
    Interior {
        bounds: Aabb,
        split_axis: Axis,
        children: [usize; 2],
    },
}

impl BuildNode {
    fn bounds(&self) -> &Aabb {
        match self {
            BuildNode::Leaf { bounds, .. } | BuildNode::Interior { bounds, .. } => bounds,
        }
    }
}

/// Arena holding the build tree. It only lives until [`BuildArena::flatten`] consumes it.
#[derive(Debug)]
pub(crate) struct BuildArena {
    nodes: Vec<BuildNode>,
    root: usize,
    depth: usize,
    leaves: usize,
}

impl BuildArena {
    /// Builds the tree over `primitives` by recursive median splits, reordering the slice in
    /// place. `primitives` must not be empty.
    pub fn build<T: Bounded>(primitives: &mut [T]) -> BuildArena {
        debug_assert!(!primitives.is_empty());
        let mut arena = BuildArena {
            nodes: Vec::with_capacity(2 * primitives.len() - 1),
            root: 0,
            depth: 0,
            leaves: 0,
        };
        arena.root = arena.recursive_build(primitives, 0, 0);
        arena
    }

    /// Depth of the deepest leaf. The root has depth `0`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves in the tree.
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    fn push(&mut self, node: BuildNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn push_leaf(&mut self, bounds: Aabb, offset: usize, count: usize, depth: usize) -> usize {
        self.leaves += 1;
        self.depth = self.depth.max(depth);
        self.push(BuildNode::Leaf {
            bounds,
            first_prim_offset: offset,
            num_primitives: count,
        })
    }

    /// Builds the subtree over `primitives`, which starts at `offset` in the full array.
    /// Returns the arena index of the subtree root.
    fn recursive_build<T: Bounded>(
        &mut self,
        primitives: &mut [T],
        offset: usize,
        depth: usize,
    ) -> usize {
        let bounds = primitives
            .iter()
            .fold(Aabb::empty(), |bounds, primitive| bounds.join(&primitive.aabb()));

        // If there is only one element left, don't split anymore.
        if primitives.len() == 1 {
            return self.push_leaf(bounds, offset, 1, depth);
        }

        let centroid_bounds = primitives.iter().fold(Aabb::empty(), |centroids, primitive| {
            centroids.grow(&primitive.aabb().centroid())
        });

        // All centroids coincide: no split can separate them.
        if centroid_bounds.is_degenerate() {
            trace!(
                "Degenerate centroids, keeping {} primitives in one leaf at offset {}.",
                primitives.len(),
                offset
            );
            return self.push_leaf(bounds, offset, primitives.len(), depth);
        }

        let split_axis = centroid_bounds.longest_axis();
        let mid = primitives.len() / 2;
        primitives.select_nth_unstable_by(mid, |a, b| {
            float_order(
                split_axis.of_point(&a.aabb().centroid()),
                split_axis.of_point(&b.aabb().centroid()),
            )
        });

        let (left, right) = primitives.split_at_mut(mid);
        let child_l = self.recursive_build(left, offset, depth + 1);
        let child_r = self.recursive_build(right, offset + mid, depth + 1);

        let bounds = self.nodes[child_l].bounds().join(self.nodes[child_r].bounds());
        self.push(BuildNode::Interior {
            bounds,
            split_axis,
            children: [child_l, child_r],
        })
    }

    /// Writes the tree into a depth-first pre-order array, consuming the arena.
    pub fn flatten(self) -> Vec<LinearNode> {
        let mut linear_nodes = Vec::with_capacity(self.nodes.len());
        self.flatten_node(self.root, &mut linear_nodes);
        linear_nodes
    }

    /// Appends the subtree rooted at `index` and returns the position of its root.
    fn flatten_node(&self, index: usize, linear_nodes: &mut Vec<LinearNode>) -> usize {
        let position = linear_nodes.len();
        match self.nodes[index] {
            BuildNode::Leaf {
                bounds,
                first_prim_offset,
                num_primitives,
            } => {
                linear_nodes.push(LinearNode::Leaf {
                    bounds,
                    primitives_offset: first_prim_offset,
                    num_primitives,
                });
            }
            BuildNode::Interior {
                bounds,
                split_axis,
                children,
            } => {
                // The second child's position is only known once the first subtree is written.
                linear_nodes.push(LinearNode::Interior {
                    bounds,
                    second_child_offset: 0,
                    split_axis,
                });
                self.flatten_node(children[0], linear_nodes);
                let second = self.flatten_node(children[1], linear_nodes);
                if let LinearNode::Interior {
                    second_child_offset,
                    ..
                } = &mut linear_nodes[position]
                {
                    *second_child_offset = second;
                }
            }
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::{BuildArena, LinearNode};
    use crate::aabb::Bounded;
    use crate::testbase::{generate_aligned_balls, Ball};
    use crate::Point3;

    #[test]
    fn test_single_primitive_is_leaf() {
        let mut balls = vec![Ball::new(0, Point3::new(1.0, 2.0, 3.0), 1.0)];
        let arena = BuildArena::build(&mut balls);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.depth(), 0);
        let nodes = arena.flatten();
        assert_eq!(
            nodes,
            vec![LinearNode::Leaf {
                bounds: balls[0].aabb(),
                primitives_offset: 0,
                num_primitives: 1,
            }]
        );
    }

    #[test]
    fn test_coincident_centroids_form_one_leaf() {
        let mut balls: Vec<Ball> = (0..5)
            .map(|i| Ball::new(i, Point3::new(0.0, 0.0, 0.0), 1.0 + i as crate::Real))
            .collect();
        let arena = BuildArena::build(&mut balls);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.leaves(), 1);
        assert_eq!(arena.flatten()[0].num_primitives(), 5);
    }

    #[test]
    fn test_median_split_is_balanced() {
        let mut balls = generate_aligned_balls();
        let count = balls.len();
        let arena = BuildArena::build(&mut balls);
        assert_eq!(arena.leaves(), count);
        assert_eq!(arena.len(), 2 * count - 1);
        // 21 primitives: ceil(log2(21)) = 5.
        assert_eq!(arena.depth(), 5);
    }

    #[test]
    fn test_first_child_follows_parent() {
        let mut balls = generate_aligned_balls();
        let nodes = BuildArena::build(&mut balls).flatten();
        for (index, node) in nodes.iter().enumerate() {
            if let LinearNode::Interior {
                bounds,
                second_child_offset,
                ..
            } = node
            {
                assert!(*second_child_offset > index + 1);
                assert!(bounds.contains_aabb(nodes[index + 1].bounds()));
                assert!(bounds.contains_aabb(nodes[*second_child_offset].bounds()));
            }
        }
    }

    #[test]
    fn test_children_partition_along_split_axis() {
        let mut balls = generate_aligned_balls();
        let nodes = BuildArena::build(&mut balls).flatten();
        if let LinearNode::Interior {
            second_child_offset,
            split_axis,
            ..
        } = nodes[0]
        {
            assert_eq!(split_axis, crate::axis::Axis::X);
            let left_max = nodes[1].bounds().x.max;
            let right_min = nodes[second_child_offset].bounds().x.min;
            assert!(left_max <= right_min + 1.0);
            assert!(nodes[1].bounds().centroid().x < nodes[second_child_offset].bounds().centroid().x);
        } else {
            panic!("root of a multi-primitive tree must be interior");
        }
    }
}
