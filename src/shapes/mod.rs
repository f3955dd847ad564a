//! Object-space geometry.

mod mesh;
mod plane;
mod sphere;
mod triangle;

pub use self::mesh::Mesh;
pub use self::plane::Plane;
pub use self::sphere::Sphere;
pub use self::triangle::Triangle;

use crate::aabb::Aabb;
use crate::bounding_hierarchy::Geometry;
use crate::ray::{HitRecord, Ray};

/// Any bounded geometry, so that spheres, triangles and meshes share one scene hierarchy.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A single sphere.
    Sphere(Sphere),
    /// A single two-sided triangle.
    Triangle(Triangle),
    /// A triangle mesh with its own hierarchy.
    Mesh(Mesh),
}

impl Geometry for Shape {
    fn local_aabb(&self) -> Aabb {
        match self {
            Shape::Sphere(sphere) => sphere.local_aabb(),
            Shape::Triangle(triangle) => triangle.local_aabb(),
            Shape::Mesh(mesh) => mesh.local_aabb(),
        }
    }

    fn local_intersect(&self, ray: &mut Ray) -> Option<HitRecord> {
        match self {
            Shape::Sphere(sphere) => sphere.local_intersect(ray),
            Shape::Triangle(triangle) => triangle.local_intersect(ray),
            Shape::Mesh(mesh) => mesh.local_intersect(ray),
        }
    }

    fn local_is_occluded(&self, ray: &Ray) -> bool {
        match self {
            Shape::Sphere(sphere) => sphere.local_is_occluded(ray),
            Shape::Triangle(triangle) => triangle.local_is_occluded(ray),
            Shape::Mesh(mesh) => mesh.local_is_occluded(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Shape {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Shape {
        Shape::Triangle(triangle)
    }
}

impl From<Mesh> for Shape {
    fn from(mesh: Mesh) -> Shape {
        Shape::Mesh(mesh)
    }
}
