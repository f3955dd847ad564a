//! Triangle meshes with their own bottom-level hierarchy.

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Geometry;
use crate::bvh::Bvh;
use crate::error::{Error, Result};
use crate::ray::{HitRecord, Ray};
use crate::shapes::Triangle;
use crate::Point3;

/// A triangle mesh in object space.
///
/// The triangles are organised in a [`Bvh`] when the mesh is created. A mesh is usually
/// shared between many [`Instance`]s through an `Arc`, each placing it differently.
///
/// [`Instance`]: crate::instance::Instance
#[derive(Debug, Clone)]
pub struct Mesh {
    bvh: Bvh<Triangle>,
}

impl Mesh {
    /// Builds the hierarchy over `triangles`. Fails with [`Error::EmptyMesh`] if there are
    /// none.
    pub fn new(triangles: Vec<Triangle>) -> Result<Mesh> {
        if triangles.is_empty() {
            return Err(Error::EmptyMesh);
        }
        Ok(Mesh {
            bvh: Bvh::build(triangles),
        })
    }

    /// Builds a flat-shaded mesh from a vertex list and triangles indexing into it.
    ///
    /// Fails with [`Error::InvalidVertexIndex`] if a face indexes past the vertices.
    pub fn from_indexed(positions: &[Point3], faces: &[[usize; 3]]) -> Result<Mesh> {
        let vertex = |index: usize| {
            positions
                .get(index)
                .copied()
                .ok_or(Error::InvalidVertexIndex {
                    index,
                    len: positions.len(),
                })
        };
        let triangles = faces
            .iter()
            .map(|&[a, b, c]| Ok(Triangle::new(vertex(a)?, vertex(b)?, vertex(c)?)))
            .collect::<Result<Vec<_>>>()?;
        Mesh::new(triangles)
    }

    /// The hierarchy over the triangles.
    pub fn bvh(&self) -> &Bvh<Triangle> {
        &self.bvh
    }

    /// The triangles, in hierarchy order.
    pub fn triangles(&self) -> &[Triangle] {
        self.bvh.primitives()
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.bvh.len()
    }

    /// Always false, meshes hold at least one triangle.
    pub fn is_empty(&self) -> bool {
        self.bvh.is_empty()
    }
}

impl Geometry for Mesh {
    fn local_aabb(&self) -> Aabb {
        self.bvh.aabb()
    }

    fn local_intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        self.bvh.intersect(ray)
    }

    fn local_is_occluded(&self, ray: &Ray) -> bool {
        self.bvh.is_occluded(ray)
    }
}
