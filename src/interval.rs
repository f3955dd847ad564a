//! One-dimensional closed ranges, the building block of [`Aabb`].
//!
//! [`Aabb`]: crate::aabb::Aabb

use crate::utils::{fast_max, fast_min};
use crate::{Real, THICKEN_EPSILON};
use std::fmt;

/// A closed range `[min, max]` on the real line.
///
/// Constructors keep `min <= max`. The only exception is [`Interval::EMPTY`], which is the
/// neutral element of [`Interval::union`] and is never produced from actual coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// Lower bound.
    pub min: Real,

    /// Upper bound.
    pub max: Real,
}

impl Interval {
    /// The empty interval. Union with it is the identity.
    pub const EMPTY: Interval = Interval {
        min: Real::INFINITY,
        max: Real::NEG_INFINITY,
    };

    /// The whole real line.
    pub const UNIVERSE: Interval = Interval {
        min: Real::NEG_INFINITY,
        max: Real::INFINITY,
    };

    /// Creates the interval spanned by `a` and `b`, in either order.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::interval::Interval;
    ///
    /// let interval = Interval::new(3.0, -1.0);
    /// assert_eq!(interval.min, -1.0);
    /// assert_eq!(interval.max, 3.0);
    /// ```
    pub fn new(a: Real, b: Real) -> Interval {
        Interval {
            min: fast_min(a, b),
            max: fast_max(a, b),
        }
    }

    /// Returns the smallest interval containing both `self` and `other`.
    pub fn union(&self, other: &Interval) -> Interval {
        Interval {
            min: fast_min(self.min, other.min),
            max: fast_max(self.max, other.max),
        }
    }

    /// Grows the interval so that it contains `value`.
    pub fn expand(&mut self, value: Real) {
        self.min = fast_min(self.min, value);
        self.max = fast_max(self.max, value);
    }

    /// Returns `max - min`. Negative for [`Interval::EMPTY`].
    pub fn size(&self) -> Real {
        self.max - self.min
    }

    /// Returns true if the interval contains no value.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Returns true if `min <= value <= max`.
    pub fn contains(&self, value: Real) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns true if `min < value < max`.
    pub fn surrounds(&self, value: Real) -> bool {
        self.min < value && value < self.max
    }

    /// Returns the midpoint of the interval.
    pub fn center(&self) -> Real {
        (self.min + self.max) * 0.5
    }

    /// Pads the interval symmetrically to a width of at least [`THICKEN_EPSILON`], and to a
    /// few float steps of its bounds far from the origin.
    ///
    /// Flat, axis-aligned geometry (a triangle in the `z = 0` plane) would otherwise yield a
    /// zero-width slab which the ray-box test can reject. The empty interval is left alone.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::interval::Interval;
    /// use tracer_accel::THICKEN_EPSILON;
    ///
    /// let flat = Interval::new(2.0, 2.0).thickened();
    /// assert!(flat.size() >= THICKEN_EPSILON * 0.99);
    /// assert!(flat.contains(2.0));
    /// ```
    pub fn thickened(&self) -> Interval {
        if self.is_empty() || self.size() >= THICKEN_EPSILON {
            return *self;
        }
        // Far from the origin a fixed pad falls below the float spacing and would vanish.
        let magnitude = self.min.abs().max(self.max.abs());
        let pad = (THICKEN_EPSILON * 0.5).max(magnitude * 4.0 * Real::EPSILON);
        Interval {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Returns the interval shifted by `offset`.
    pub fn translated(&self, offset: Real) -> Interval {
        Interval {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

impl Default for Interval {
    /// The default interval is [`Interval::EMPTY`].
    fn default() -> Interval {
        Interval::EMPTY
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;
    use crate::{Real, THICKEN_EPSILON};
    use float_eq::assert_float_eq;

    #[test]
    fn test_new_orders_bounds() {
        let interval = Interval::new(5.0, -2.0);
        assert_eq!(interval, Interval { min: -2.0, max: 5.0 });
    }

    #[test]
    fn test_empty_is_union_identity() {
        let interval = Interval::new(-1.0, 4.0);
        assert_eq!(Interval::EMPTY.union(&interval), interval);
        assert_eq!(interval.union(&Interval::EMPTY), interval);
        assert!(Interval::EMPTY.is_empty());
        assert!(Interval::default().is_empty());
    }

    #[test]
    fn test_thicken_degenerate() {
        let thick = Interval::new(1.0, 1.0).thickened();
        assert_float_eq!(thick.size(), THICKEN_EPSILON, abs <= 1e-6 as Real);
        assert_float_eq!(thick.center(), 1.0, abs <= 1e-6 as Real);
        assert!(thick.min <= thick.max);
    }

    #[test]
    fn test_thicken_far_from_origin() {
        for value in [1e4 as Real, -1e4, 1e5, 3e7] {
            let thick = Interval::new(value, value).thickened();
            assert!(thick.min < value && value < thick.max);
            assert!(thick.size() >= THICKEN_EPSILON);
        }
    }

    #[test]
    fn test_thicken_keeps_wide_and_empty() {
        let wide = Interval::new(0.0, 2.0);
        assert_eq!(wide.thickened(), wide);
        assert!(Interval::EMPTY.thickened().is_empty());
    }

    #[test]
    fn test_expand_and_contains() {
        let mut interval = Interval::EMPTY;
        interval.expand(3.0);
        assert_eq!(interval, Interval { min: 3.0, max: 3.0 });
        interval.expand(-1.0);
        assert!(interval.contains(0.0));
        assert!(interval.contains(3.0));
        assert!(!interval.surrounds(3.0));
        assert_eq!(interval.translated(1.0), Interval { min: 0.0, max: 4.0 });
    }
}
