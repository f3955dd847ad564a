//! Axis enum for indexing three-dimensional structures.

use crate::error::Error;
use crate::{Point3, Real, Vector3};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter, Result};
use std::ops::{Index, IndexMut};

/// An `Axis` in a three-dimensional coordinate system.
/// Used to access [`Aabb`] slabs and split planes of a [`Bvh`].
///
/// # Examples
/// ```
/// use tracer_accel::axis::Axis;
/// use tracer_accel::Real;
///
/// let mut position: [Real; 3] = [1.0, 0.5, 42.0];
/// position[Axis::Y] *= 4.0;
///
/// assert_eq!(position[Axis::Y], 2.0);
/// ```
///
/// [`Aabb`]: crate::aabb::Aabb
/// [`Bvh`]: crate::bvh::Bvh
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Index of the X axis.
    X = 0,

    /// Index of the Y axis.
    Y = 1,

    /// Index of the Z axis.
    Z = 2,
}

impl Axis {
    /// All axes in priority order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the numeric index of this axis.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the component of `point` along this axis.
    #[inline]
    pub fn of_point(self, point: &Point3) -> Real {
        point[self.index()]
    }

    /// Returns the component of `vector` along this axis.
    #[inline]
    pub fn of_vector(self, vector: &Vector3) -> Real {
        vector[self.index()]
    }
}

/// Display implementation for `Axis`.
impl Display for Axis {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match *self {
                Axis::X => "x",
                Axis::Y => "y",
                Axis::Z => "z",
            }
        )
    }
}

impl TryFrom<usize> for Axis {
    type Error = Error;

    fn try_from(index: usize) -> std::result::Result<Axis, Error> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            _ => Err(Error::InvalidAxis(index)),
        }
    }
}

/// Make slices indexable by `Axis`.
impl Index<Axis> for [Real] {
    type Output = Real;

    fn index(&self, axis: Axis) -> &Real {
        &self[axis as usize]
    }
}

/// Make slices mutably accessible by `Axis`.
impl IndexMut<Axis> for [Real] {
    fn index_mut(&mut self, axis: Axis) -> &mut Real {
        &mut self[axis as usize]
    }
}
