//! Affine transforms placing geometry into world space.

use nalgebra::{Rotation3, Unit};

use crate::error::{Error, Result};
use crate::{Matrix3, Matrix4, Point3, Real, Vector3, EPSILON};

/// One step of a transform description, as it appears in a scene file.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransformOp {
    /// Translation by a vector.
    Translation(Vector3),
    /// Per-axis scaling.
    Scaling(Vector3),
    /// Rotation by `angle` degrees around `axis`.
    Rotation {
        /// Angle in degrees.
        angle: Real,
        /// Rotation axis. Need not be normalized.
        axis: Vector3,
    },
    /// A full matrix, in row-major order.
    Composite([Real; 16]),
}

impl TransformOp {
    /// Returns the homogeneous matrix of this step.
    pub fn matrix(&self) -> Matrix4 {
        match *self {
            TransformOp::Translation(offset) => Matrix4::new_translation(&offset),
            TransformOp::Scaling(factors) => Matrix4::new_nonuniform_scaling(&factors),
            TransformOp::Rotation { angle, axis } => rotation_matrix(angle, &axis),
            TransformOp::Composite(values) => Matrix4::from_row_slice(&values),
        }
    }
}

/// Rotation around an axis of (near) zero length is the identity.
fn rotation_matrix(angle_degrees: Real, axis: &Vector3) -> Matrix4 {
    match Unit::try_new(*axis, EPSILON) {
        Some(axis) => Rotation3::from_axis_angle(&axis, angle_degrees.to_radians()).to_homogeneous(),
        None => Matrix4::identity(),
    }
}

/// An invertible affine transform together with its cached inverse and normal matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4,
    inverse: Matrix4,
    /// Inverse-transpose of the linear part.
    normal_matrix: Matrix3,
}

impl Transform {
    /// Creates a transform from a homogeneous matrix.
    ///
    /// Fails with [`Error::SingularTransform`] if the matrix cannot be inverted.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::transform::Transform;
    /// use tracer_accel::{Error, Matrix4, Point3, Vector3};
    ///
    /// let transform = Transform::new(Matrix4::new_scaling(2.0)).unwrap();
    /// assert_eq!(transform.point(&Point3::new(1.0, 2.0, 3.0)), Point3::new(2.0, 4.0, 6.0));
    /// assert_eq!(transform.inverse_vector(&Vector3::new(2.0, 2.0, 2.0)), Vector3::new(1.0, 1.0, 1.0));
    ///
    /// let flat = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 0.0, 1.0));
    /// assert_eq!(Transform::new(flat), Err(Error::SingularTransform));
    /// ```
    pub fn new(matrix: Matrix4) -> Result<Transform> {
        let inverse = matrix.try_inverse().ok_or(Error::SingularTransform)?;
        if !inverse.iter().all(|value| value.is_finite()) {
            return Err(Error::SingularTransform);
        }
        Ok(Transform::from_parts(matrix, inverse))
    }

    fn from_parts(matrix: Matrix4, inverse: Matrix4) -> Transform {
        let normal_matrix = inverse.fixed_view::<3, 3>(0, 0).transpose();
        Transform {
            matrix,
            inverse,
            normal_matrix,
        }
    }

    /// The identity transform.
    pub fn identity() -> Transform {
        Transform::from_parts(Matrix4::identity(), Matrix4::identity())
    }

    /// A translation by `offset`.
    pub fn translation(offset: Vector3) -> Transform {
        Transform::from_parts(
            Matrix4::new_translation(&offset),
            Matrix4::new_translation(&-offset),
        )
    }

    /// A per-axis scaling. Fails with [`Error::SingularTransform`] if a factor is zero.
    pub fn scaling(factors: Vector3) -> Result<Transform> {
        Transform::new(Matrix4::new_nonuniform_scaling(&factors))
    }

    /// A rotation by `angle_degrees` around `axis`. A zero axis gives the identity.
    pub fn rotation(angle_degrees: Real, axis: Vector3) -> Transform {
        let matrix = rotation_matrix(angle_degrees, &axis);
        Transform::from_parts(matrix, matrix.transpose())
    }

    /// Composes a list of steps. Each step is applied after the ones before it, so the
    /// resulting matrix is `T_n * ... * T_1`.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::transform::{Transform, TransformOp};
    /// use tracer_accel::{Point3, Vector3};
    ///
    /// let ops = [
    ///     TransformOp::Scaling(Vector3::new(2.0, 2.0, 2.0)),
    ///     TransformOp::Translation(Vector3::new(1.0, 0.0, 0.0)),
    /// ];
    /// let transform = Transform::from_ops(&ops).unwrap();
    /// // Scaled first, then translated.
    /// assert_eq!(transform.point(&Point3::new(1.0, 1.0, 1.0)), Point3::new(3.0, 2.0, 2.0));
    /// ```
    pub fn from_ops(ops: &[TransformOp]) -> Result<Transform> {
        let matrix = ops
            .iter()
            .fold(Matrix4::identity(), |matrix, op| op.matrix() * matrix);
        Transform::new(matrix)
    }

    /// Returns the transform applying `self` first and `other` second.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform::from_parts(other.matrix * self.matrix, self.inverse * other.inverse)
    }

    /// The forward matrix.
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// The inverse matrix.
    pub fn inverse(&self) -> &Matrix4 {
        &self.inverse
    }

    /// Returns true if this is exactly the identity.
    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix4::identity()
    }

    /// Transforms a point to world space.
    #[inline]
    pub fn point(&self, point: &Point3) -> Point3 {
        self.matrix.transform_point(point)
    }

    /// Transforms a direction to world space. Translation does not apply.
    #[inline]
    pub fn vector(&self, vector: &Vector3) -> Vector3 {
        self.matrix.transform_vector(vector)
    }

    /// Transforms a surface normal to world space. The result is not normalized.
    #[inline]
    pub fn normal(&self, normal: &Vector3) -> Vector3 {
        self.normal_matrix * normal
    }

    /// Transforms a point to object space.
    #[inline]
    pub fn inverse_point(&self, point: &Point3) -> Point3 {
        self.inverse.transform_point(point)
    }

    /// Transforms a direction to object space.
    #[inline]
    pub fn inverse_vector(&self, vector: &Vector3) -> Vector3 {
        self.inverse.transform_vector(vector)
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform::identity()
    }
}
