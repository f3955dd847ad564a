use crate::ray::Ray;
use crate::{MaterialId, Point3, Real, Vector2, Vector3};

/// The surface interaction produced by a successful intersection.
///
/// Geometry fills this in its own object space. [`Instance`] moves `point`, `normal` and
/// `tangent` to world space and stamps its `material_id`.
///
/// [`Instance`]: crate::instance::Instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parametric distance along the ray.
    pub t: Real,

    /// Hit position.
    pub point: Point3,

    /// Unit surface normal, facing against the incoming ray.
    pub normal: Vector3,

    /// True if the ray hit the side the geometric normal points to.
    pub front_face: bool,

    /// Material of the surface.
    pub material_id: MaterialId,

    /// Texture coordinates, if the geometry has any.
    pub uv: Option<Vector2>,

    /// Unit tangent along the `u` texture direction, if the geometry has one.
    pub tangent: Option<Vector3>,
}

impl HitRecord {
    /// Creates a record for a hit at distance `t` of `ray`, orienting `outward_normal`
    /// against the ray.
    pub fn new(ray: &Ray, t: Real, outward_normal: Vector3) -> HitRecord {
        let mut record = HitRecord {
            t,
            point: ray.at(t),
            normal: outward_normal,
            front_face: true,
            material_id: 0,
            uv: None,
            tangent: None,
        };
        record.set_face_normal(ray, outward_normal);
        record
    }

    /// Stores `outward_normal` flipped, if needed, so that it points against `ray`.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vector3) {
        self.front_face = ray.direction.dot(&outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }

    /// Returns the record with texture coordinates attached.
    pub fn with_uv(mut self, uv: Vector2) -> HitRecord {
        self.uv = Some(uv);
        self
    }

    /// Returns the record with a tangent attached.
    pub fn with_tangent(mut self, tangent: Vector3) -> HitRecord {
        self.tangent = Some(tangent);
        self
    }
}
