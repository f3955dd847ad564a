//! This module defines a Triangle and its intersection algorithm

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::{Geometry, Primitive};
use crate::ray::{HitRecord, Ray};
use crate::{Point3, Vector2, Vector3, EPSILON};

/// A triangle struct. Hit from both sides.
///
/// With per-vertex normals the shading normal is interpolated across the face. With
/// per-vertex texture coordinates hits carry interpolated `uv` and the tangent along `u`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First point on the triangle
    pub a: Point3,
    /// Second point on the triangle
    pub b: Point3,
    /// Third point on the triangle
    pub c: Point3,
    /// Vertex normals, in vertex order
    pub normals: Option<[Vector3; 3]>,
    /// Vertex texture coordinates, in vertex order
    pub uvs: Option<[Vector2; 3]>,
}

impl Triangle {
    /// Creates a new flat triangle given a counter clockwise set of points
    pub fn new(a: Point3, b: Point3, c: Point3) -> Triangle {
        Triangle {
            a,
            b,
            c,
            normals: None,
            uvs: None,
        }
    }

    /// Returns the triangle with vertex normals for smooth shading.
    pub fn with_normals(mut self, normals: [Vector3; 3]) -> Triangle {
        self.normals = Some(normals);
        self
    }

    /// Returns the triangle with vertex texture coordinates.
    pub fn with_uvs(mut self, uvs: [Vector2; 3]) -> Triangle {
        self.uvs = Some(uvs);
        self
    }

    /// Unit normal of the counter clockwise winding.
    pub fn geometric_normal(&self) -> Vector3 {
        (self.b - self.a).cross(&(self.c - self.a)).normalize()
    }

    /// Tangent along the `u` texture direction, if the texture mapping is not degenerate.
    fn tangent(&self, uvs: &[Vector2; 3]) -> Option<Vector3> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let duv1 = uvs[1] - uvs[0];
        let duv2 = uvs[2] - uvs[0];
        let det = duv1.x * duv2.y - duv1.y * duv2.x;
        if det.abs() < EPSILON {
            return None;
        }
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;
        tangent.try_normalize(EPSILON)
    }
}

impl Bounded for Triangle {
    fn aabb(&self) -> Aabb {
        Aabb::empty()
            .grow(&self.a)
            .grow(&self.b)
            .grow(&self.c)
            .thickened()
    }
}

/// Triangles of a [`Mesh`] are stored in its hierarchy in object space.
///
/// [`Mesh`]: crate::shapes::Mesh
impl Primitive for Triangle {
    /// Möller-Trumbore intersection.
    fn intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        let a_to_b = self.b - self.a;
        let a_to_c = self.c - self.a;

        let u_vec = ray.direction.cross(&a_to_c);
        let det = a_to_b.dot(&u_vec);
        // Ray is parallel to the triangle plane. Relative to the edge and direction lengths,
        // so the cutoff does not depend on the triangle's size or the ray's speed.
        if det.abs() <= EPSILON * a_to_b.norm() * a_to_c.norm() * ray.direction.norm() {
            return None;
        }
        let inv_det = 1.0 / det;

        let a_to_origin = ray.origin - self.a;
        let u = a_to_origin.dot(&u_vec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let v_vec = a_to_origin.cross(&a_to_b);
        let v = ray.direction.dot(&v_vec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = a_to_c.dot(&v_vec) * inv_det;
        if !ray.accepts(t) {
            return None;
        }

        let w = 1.0 - u - v;
        let outward_normal = match self.normals {
            Some([na, nb, nc]) => (na * w + nb * u + nc * v)
                .try_normalize(EPSILON)
                .unwrap_or_else(|| self.geometric_normal()),
            None => self.geometric_normal(),
        };

        let mut hit = HitRecord::new(ray, t, outward_normal);
        if let Some(uvs) = &self.uvs {
            hit.uv = Some(uvs[0] * w + uvs[1] * u + uvs[2] * v);
            hit.tangent = self.tangent(uvs);
        }
        ray.t_max = t;
        Some(hit)
    }
}

impl Geometry for Triangle {
    fn local_aabb(&self) -> Aabb {
        self.aabb()
    }

    fn local_intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        self.intersect(ray)
    }
}
