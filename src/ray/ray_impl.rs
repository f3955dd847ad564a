//! This module defines a Ray structure with a running parametric interval.

use crate::interval::Interval;
use crate::{Point3, Real, Vector3, DEFAULT_T_MIN};

/// A ray `origin + t * direction` restricted to `t_min <= t <= t_max`.
///
/// `t_max` is the running bound of a closest-hit query: every accepted hit lowers it, so that
/// farther boxes and primitives are rejected. `time` in `[0, 1]` selects the shutter instant
/// for motion blur.
///
/// The direction is kept as given. It is not normalized, which keeps `t` identical between
/// world space and the object space of a transformed instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    /// The ray origin.
    pub origin: Point3,

    /// The ray direction.
    pub direction: Vector3,

    /// Lower bound of accepted hit distances.
    pub t_min: Real,

    /// Upper bound of accepted hit distances.
    pub t_max: Real,

    /// Shutter time of this ray in `[0, 1]`.
    pub time: Real,
}

impl Ray {
    /// Creates a new [`Ray`] from an `origin` and a `direction`, accepting hits in
    /// `[DEFAULT_T_MIN, inf)` at time zero.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::ray::Ray;
    /// use tracer_accel::{Point3, Vector3};
    ///
    /// let origin = Point3::new(0.0, 0.0, 0.0);
    /// let direction = Vector3::new(2.0, 0.0, 0.0);
    /// let ray = Ray::new(origin, direction);
    ///
    /// assert_eq!(ray.origin, origin);
    /// assert_eq!(ray.direction, direction);
    /// assert_eq!(ray.at(1.5), Point3::new(3.0, 0.0, 0.0));
    /// ```
    pub fn new(origin: Point3, direction: Vector3) -> Ray {
        Ray {
            origin,
            direction,
            t_min: DEFAULT_T_MIN,
            t_max: Real::INFINITY,
            time: 0.0,
        }
    }

    /// Returns the ray with its parametric interval replaced.
    pub fn with_interval(mut self, t_min: Real, t_max: Real) -> Ray {
        self.t_min = t_min;
        self.t_max = t_max;
        self
    }

    /// Returns the ray with its shutter time replaced.
    pub fn with_time(mut self, time: Real) -> Ray {
        self.time = time;
        self
    }

    /// Returns the point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: Real) -> Point3 {
        self.origin + self.direction * t
    }

    /// Returns the current parametric interval.
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval {
            min: self.t_min,
            max: self.t_max,
        }
    }

    /// Returns true if `t` is inside the current parametric interval.
    #[inline]
    pub fn accepts(&self, t: Real) -> bool {
        self.t_min <= t && t <= self.t_max
    }
}

#[cfg(test)]
mod tests {
    use crate::ray::Ray;
    use crate::testbase::{tuple_to_point, tuple_to_vector, tuplevec_small_strategy};
    use crate::{Point3, Real, Vector3, DEFAULT_T_MIN};
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let ray = Ray::new(Point3::origin(), Vector3::x());
        assert_eq!(ray.t_min, DEFAULT_T_MIN);
        assert_eq!(ray.t_max, Real::INFINITY);
        assert_eq!(ray.time, 0.0);
    }

    #[test]
    fn test_builders() {
        let ray = Ray::new(Point3::origin(), Vector3::x())
            .with_interval(1.0, 2.0)
            .with_time(0.25);
        assert!(ray.accepts(1.5));
        assert!(!ray.accepts(2.5));
        assert!(!ray.accepts(0.5));
        assert_eq!(ray.interval().size(), 1.0);
        assert_eq!(ray.time, 0.25);
    }

    proptest! {
        // The direction is stored verbatim so `at` is linear in `t`.
        #[test]
        fn test_at_is_linear(o in tuplevec_small_strategy(), d in tuplevec_small_strategy()) {
            let ray = Ray::new(tuple_to_point(&o), tuple_to_vector(&d));
            prop_assert_eq!(ray.direction, tuple_to_vector(&d));
            prop_assert_eq!(ray.at(0.0), ray.origin);
            prop_assert_eq!(ray.at(1.0), ray.origin + ray.direction);
        }
    }
}
