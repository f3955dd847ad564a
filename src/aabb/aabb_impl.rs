//! Axis Aligned Bounding Boxes.

use crate::axis::Axis;
use crate::error::Result;
use crate::interval::Interval;
use crate::{Matrix4, Point3, Real, Vector3};
use std::convert::TryFrom;
use std::fmt;
use std::ops::Index;

/// [`Aabb`] struct. Three [`Interval`]s, one slab per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Slab along the x axis.
    pub x: Interval,

    /// Slab along the y axis.
    pub y: Interval,

    /// Slab along the z axis.
    pub z: Interval,
}

/// A trait implemented by things which can be bounded by an [`Aabb`].
pub trait Bounded {
    /// Returns the geometric bounds of this object in the form of an [`Aabb`].
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::aabb::{Aabb, Bounded};
    /// use tracer_accel::Point3;
    ///
    /// struct Something;
    ///
    /// impl Bounded for Something {
    ///     fn aabb(&self) -> Aabb {
    ///         let point1 = Point3::new(0.0, 0.0, 0.0);
    ///         let point2 = Point3::new(1.0, 1.0, 1.0);
    ///         Aabb::new(point1, point2)
    ///     }
    /// }
    ///
    /// let something = Something;
    /// let aabb = something.aabb();
    ///
    /// assert!(aabb.contains(&Point3::new(0.0, 0.0, 0.0)));
    /// assert!(aabb.contains(&Point3::new(1.0, 1.0, 1.0)));
    /// ```
    fn aabb(&self) -> Aabb;
}

impl<B: Bounded + ?Sized> Bounded for &B {
    fn aabb(&self) -> Aabb {
        (**self).aabb()
    }
}

impl Aabb {
    /// Creates the [`Aabb`] spanned by two opposite corners, in any order.
    /// Degenerate slabs are thickened so flat geometry stays hittable.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::aabb::Aabb;
    /// use tracer_accel::Point3;
    ///
    /// let aabb = Aabb::new(Point3::new(1.0, 5.0, 3.0), Point3::new(-1.0, 2.0, 4.0));
    /// assert_eq!(aabb.min(), Point3::new(-1.0, 2.0, 3.0));
    /// assert_eq!(aabb.max(), Point3::new(1.0, 5.0, 4.0));
    /// ```
    pub fn new(p1: Point3, p2: Point3) -> Aabb {
        Aabb {
            x: Interval::new(p1.x, p2.x),
            y: Interval::new(p1.y, p2.y),
            z: Interval::new(p1.z, p2.z),
        }
        .thickened()
    }

    /// Creates the [`Aabb`] enclosing two boxes. Degenerate slabs are thickened.
    pub fn from_boxes(a: &Aabb, b: &Aabb) -> Aabb {
        a.join(b).thickened()
    }

    /// Creates an [`Aabb`] from three slabs, unchanged.
    pub fn from_intervals(x: Interval, y: Interval, z: Interval) -> Aabb {
        Aabb { x, y, z }
    }

    /// Creates a new empty [`Aabb`]. Joining or growing it yields the other operand.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::aabb::Aabb;
    /// use tracer_accel::Point3;
    ///
    /// let aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    /// assert!(!aabb.contains(&Point3::origin()));
    /// ```
    pub fn empty() -> Aabb {
        Aabb {
            x: Interval::EMPTY,
            y: Interval::EMPTY,
            z: Interval::EMPTY,
        }
    }

    /// Creates an [`Aabb`] which covers all of space.
    pub fn infinite() -> Aabb {
        Aabb {
            x: Interval::UNIVERSE,
            y: Interval::UNIVERSE,
            z: Interval::UNIVERSE,
        }
    }

    /// Returns the minimum corner.
    pub fn min(&self) -> Point3 {
        Point3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Point3 {
        Point3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Returns true if any slab is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Returns true if all bounds are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.min().coords.iter().all(|v| v.is_finite())
            && self.max().coords.iter().all(|v| v.is_finite())
    }

    /// Returns true if all three slabs have exactly zero extent, e.g. for a box grown from
    /// a single point.
    pub fn is_degenerate(&self) -> bool {
        self.x.min == self.x.max && self.y.min == self.y.max && self.z.min == self.z.max
    }

    /// Returns true if the [`Point3`] is inside the [`Aabb`].
    pub fn contains(&self, p: &Point3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Returns true if `other` lies completely inside this [`Aabb`].
    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        other.is_empty() || (self.contains(&other.min()) && self.contains(&other.max()))
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and `other`.
    /// This is not thickened, so joining never moves a bound that is already wide.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::aabb::Aabb;
    /// use tracer_accel::Point3;
    ///
    /// let aabb1 = Aabb::new(Point3::new(-101.0, 0.0, 0.0), Point3::new(-100.0, 1.0, 1.0));
    /// let aabb2 = Aabb::new(Point3::new(100.0, 0.0, 0.0), Point3::new(101.0, 1.0, 1.0));
    /// let joint = aabb1.join(&aabb2);
    ///
    /// assert!(joint.contains(&Point3::new(0.0, 0.5, 0.5)));
    /// ```
    pub fn join(&self, other: &Aabb) -> Aabb {
        Aabb {
            x: self.x.union(&other.x),
            y: self.y.union(&other.y),
            z: self.z.union(&other.z),
        }
    }

    /// Mutable version of [`Aabb::join`].
    pub fn expand_aabb(&mut self, other: &Aabb) {
        *self = self.join(other);
    }

    /// Grows this [`Aabb`] so that it contains `point`.
    pub fn expand(&mut self, point: &Point3) {
        self.x.expand(point.x);
        self.y.expand(point.y);
        self.z.expand(point.z);
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and `point`.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::aabb::Aabb;
    /// use tracer_accel::Point3;
    ///
    /// let point = Point3::new(5.0, 6.0, 7.0);
    /// let grown = Aabb::empty().grow(&point);
    /// assert_eq!(grown.centroid(), point);
    /// ```
    pub fn grow(&self, point: &Point3) -> Aabb {
        let mut aabb = *self;
        aabb.expand(point);
        aabb
    }

    /// Returns the box with all degenerate slabs thickened.
    pub fn thickened(&self) -> Aabb {
        Aabb {
            x: self.x.thickened(),
            y: self.y.thickened(),
            z: self.z.thickened(),
        }
    }

    /// Returns the size of this [`Aabb`] in all three dimensions.
    pub fn size(&self) -> Vector3 {
        Vector3::new(self.x.size(), self.y.size(), self.z.size())
    }

    /// Returns the center point of the [`Aabb`].
    pub fn centroid(&self) -> Point3 {
        Point3::new(self.x.center(), self.y.center(), self.z.center())
    }

    /// Returns the axis along which the [`Aabb`] is stretched the most.
    /// Equal extents resolve to the first axis in the order x, y, z.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::aabb::Aabb;
    /// use tracer_accel::axis::Axis;
    /// use tracer_accel::Point3;
    ///
    /// let cube = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    /// assert_eq!(cube.longest_axis(), Axis::X);
    ///
    /// let tall = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 3.0, 3.0));
    /// assert_eq!(tall.longest_axis(), Axis::Y);
    /// ```
    pub fn longest_axis(&self) -> Axis {
        let size = self.size();
        if size.x >= size.y && size.x >= size.z {
            Axis::X
        } else if size.y >= size.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Returns the slab along `axis`.
    pub fn axis(&self, axis: Axis) -> &Interval {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Returns the slab with index `index`, or [`Error::InvalidAxis`](crate::Error::InvalidAxis).
    pub fn try_axis(&self, index: usize) -> Result<&Interval> {
        Axis::try_from(index).map(|axis| self.axis(axis))
    }

    /// Returns the eight corners of the box.
    pub fn corners(&self) -> [Point3; 8] {
        [
            Point3::new(self.x.min, self.y.min, self.z.min),
            Point3::new(self.x.min, self.y.min, self.z.max),
            Point3::new(self.x.min, self.y.max, self.z.min),
            Point3::new(self.x.min, self.y.max, self.z.max),
            Point3::new(self.x.max, self.y.min, self.z.min),
            Point3::new(self.x.max, self.y.min, self.z.max),
            Point3::new(self.x.max, self.y.max, self.z.min),
            Point3::new(self.x.max, self.y.max, self.z.max),
        ]
    }

    /// Re-derives the bounds under the homogeneous transform `matrix` from all eight
    /// transformed corners. The result is conservative: it contains the transformed box
    /// but is not tight under rotation.
    ///
    /// Empty boxes stay empty and unbounded boxes become [`Aabb::infinite`], since their
    /// corners do not survive matrix arithmetic.
    pub fn apply_transformation(&mut self, matrix: &Matrix4) {
        if self.is_empty() {
            return;
        }
        if !self.is_finite() {
            *self = Aabb::infinite();
            return;
        }
        let mut bounds = Aabb::empty();
        for corner in self.corners().iter() {
            bounds.expand(&matrix.transform_point(corner));
        }
        *self = bounds;
    }

    /// Non-mutating version of [`Aabb::apply_transformation`].
    pub fn transformed(&self, matrix: &Matrix4) -> Aabb {
        let mut aabb = *self;
        aabb.apply_transformation(matrix);
        aabb
    }

    /// Returns the box shifted by `offset`.
    pub fn translated(&self, offset: &Vector3) -> Aabb {
        Aabb {
            x: self.x.translated(offset.x),
            y: self.y.translated(offset.y),
            z: self.z.translated(offset.z),
        }
    }

    /// Returns the box's extent along `axis`.
    pub fn extent(&self, axis: Axis) -> Real {
        self.axis(axis).size()
    }
}

impl Default for Aabb {
    fn default() -> Aabb {
        Aabb::empty()
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Min bound: {}; Max bound: {}", self.min(), self.max())
    }
}

/// Make [`Aabb`]s indexable by slab. `aabb[0]` is the x slab, `aabb[2]` the z slab.
///
/// # Panics
/// Panics for any index other than 0, 1 or 2. Use [`Aabb::try_axis`] to check instead.
impl Index<usize> for Aabb {
    type Output = Interval;

    fn index(&self, index: usize) -> &Interval {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis index {} for Aabb, expected 0, 1 or 2.", index),
        }
    }
}

impl Index<Axis> for Aabb {
    type Output = Interval;

    fn index(&self, axis: Axis) -> &Interval {
        self.axis(axis)
    }
}

/// Implementation of [`Bounded`] for [`Aabb`].
impl Bounded for Aabb {
    fn aabb(&self) -> Aabb {
        *self
    }
}

/// Implementation of [`Bounded`] for [`Point3`].
impl Bounded for Point3 {
    fn aabb(&self) -> Aabb {
        Aabb::empty().grow(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::aabb::{Aabb, Bounded};
    use crate::axis::Axis;
    use crate::error::Error;
    use crate::interval::Interval;
    use crate::testbase::{tuple_to_point, tuplevec_small_strategy, TupleVec};
    use crate::{Matrix4, Point3, Real, Vector3};
    use float_eq::assert_float_eq;
    use proptest::prelude::*;

    fn approx_same(a: &Aabb, b: &Aabb) -> bool {
        let close = |p: Point3, q: Point3| {
            (p - q)
                .iter()
                .zip(p.coords.iter())
                .all(|(d, x)| d.abs() <= 1e-4 * (1.0 + x.abs()))
        };
        close(a.min(), b.min()) && close(a.max(), b.max())
    }

    #[test]
    fn test_longest_axis_ties_break_x_then_y() {
        let cube = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        assert_eq!(cube.longest_axis(), Axis::X);

        let yz = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 2.0));
        assert_eq!(yz.longest_axis(), Axis::Y);

        let z = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 2.0));
        assert_eq!(z.longest_axis(), Axis::Z);

        let xz = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 1.0, 3.0));
        assert_eq!(xz.longest_axis(), Axis::X);
    }

    #[test]
    fn test_index_by_axis_number() {
        let aabb = Aabb::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0));
        assert_eq!(aabb[0], Interval::new(1.0, 4.0));
        assert_eq!(aabb[1], Interval::new(2.0, 5.0));
        assert_eq!(aabb[Axis::Z], Interval::new(3.0, 6.0));
        assert_eq!(aabb.try_axis(3), Err(Error::InvalidAxis(3)));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let aabb = Aabb::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0));
        let _ = aabb[3];
    }

    #[test]
    fn test_flat_box_is_thickened() {
        let flat = Aabb::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 1.0, 1.0));
        assert!(flat.z.size() > 0.0);
        assert!(flat.contains(&Point3::new(0.5, 0.5, 1.0)));
        assert_eq!(flat.x, Interval::new(0.0, 1.0));
    }

    #[test]
    fn test_single_point_centroid() {
        let p = Point3::new(-3.5, 2.25, 7.0);
        assert_eq!(p.aabb().centroid(), p);
        assert!(p.aabb().is_degenerate());

        let thick = Aabb::new(p, p);
        assert!(!thick.is_degenerate());
        let c = thick.centroid();
        assert_float_eq!(c.x, p.x, abs <= 1e-5);
        assert_float_eq!(c.y, p.y, abs <= 1e-5);
        assert_float_eq!(c.z, p.z, abs <= 1e-5);
    }

    #[test]
    fn test_apply_transformation_translation_and_scale() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let matrix = Matrix4::new_translation(&Vector3::new(5.0, 0.0, 0.0))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 3.0));
        let moved = aabb.transformed(&matrix);
        assert!(approx_same(
            &moved,
            &Aabb::new(Point3::new(3.0, -1.0, -3.0), Point3::new(7.0, 1.0, 3.0))
        ));
    }

    #[test]
    fn test_apply_transformation_rotation_is_conservative() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let rotation = Matrix4::from_scaled_axis(Vector3::z() * (std::f64::consts::FRAC_PI_4 as Real));
        let rotated = aabb.transformed(&rotation);
        let half_diag = (2.0 as Real).sqrt();
        assert_float_eq!(rotated.x.max, half_diag, abs <= 1e-4);
        assert_float_eq!(rotated.y.min, -half_diag, abs <= 1e-4);
        assert_float_eq!(rotated.z.max, 1.0, abs <= 1e-4);
        assert!(rotated.contains_aabb(&Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))));
    }

    #[test]
    fn test_transform_of_empty_and_infinite() {
        let matrix = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        assert!(Aabb::empty().transformed(&matrix).is_empty());
        assert_eq!(Aabb::infinite().transformed(&matrix), Aabb::infinite());
    }

    proptest! {
        // Test whether an empty `Aabb` does not contains anything.
        #[test]
        fn test_empty_contains_nothing(tpl: TupleVec) {
            let p = tuple_to_point(&tpl);
            let aabb = Aabb::empty();
            prop_assert!(!aabb.contains(&p));
        }

        // Test whether an `Aabb` always contains its centroid.
        #[test]
        fn test_aabb_contains_centroid(a in tuplevec_small_strategy(), b in tuplevec_small_strategy()) {
            let aabb = Aabb::new(tuple_to_point(&a), tuple_to_point(&b));
            prop_assert!(aabb.contains(&aabb.centroid()));
        }

        // Test whether the join of two point-sets contains all the points.
        #[test]
        fn test_join_two_aabbs(a in prop::array::uniform5(tuplevec_small_strategy()),
                               b in prop::array::uniform5(tuplevec_small_strategy())) {
            let points_a = a.iter().map(tuple_to_point).collect::<Vec<_>>();
            let points_b = b.iter().map(tuple_to_point).collect::<Vec<_>>();
            let aabb1 = points_a.iter().fold(Aabb::empty(), |aabb, point| aabb.grow(point));
            let aabb2 = points_b.iter().fold(Aabb::empty(), |aabb, point| aabb.grow(point));
            let joint = aabb1.join(&aabb2);

            for point in points_a.iter().chain(points_b.iter()) {
                prop_assert!(joint.contains(point));
            }
        }

        // Join is commutative and associative.
        #[test]
        fn test_join_commutative_associative(a in tuplevec_small_strategy(), b in tuplevec_small_strategy(),
                                             c in tuplevec_small_strategy(), d in tuplevec_small_strategy(),
                                             e in tuplevec_small_strategy(), f in tuplevec_small_strategy()) {
            let x = Aabb::new(tuple_to_point(&a), tuple_to_point(&b));
            let y = Aabb::new(tuple_to_point(&c), tuple_to_point(&d));
            let z = Aabb::new(tuple_to_point(&e), tuple_to_point(&f));
            prop_assert!(approx_same(&x.join(&y), &y.join(&x)));
            prop_assert!(approx_same(&x.join(&y).join(&z), &x.join(&y.join(&z))));
        }

        // Growing never shrinks a box.
        #[test]
        fn test_expand_is_monotonic(a in tuplevec_small_strategy(), b in tuplevec_small_strategy(),
                                    p in tuplevec_small_strategy()) {
            let aabb = Aabb::new(tuple_to_point(&a), tuple_to_point(&b));
            let mut grown = aabb;
            grown.expand(&tuple_to_point(&p));
            prop_assert!(grown.contains_aabb(&aabb));
            prop_assert!(grown.contains(&tuple_to_point(&p)));
        }

        // Transformed boxes contain every transformed corner.
        #[test]
        fn test_transform_contains_corners(a in tuplevec_small_strategy(), b in tuplevec_small_strategy(),
                                           angle in -3.0..3.0f64) {
            let aabb = Aabb::new(tuple_to_point(&a), tuple_to_point(&b));
            let matrix = Matrix4::from_scaled_axis(Vector3::new(0.3, 0.8, 0.1).normalize() * angle as Real);
            let transformed = aabb.transformed(&matrix);
            for corner in aabb.corners().iter() {
                prop_assert!(transformed.contains(&matrix.transform_point(corner)));
            }
        }
    }
}
