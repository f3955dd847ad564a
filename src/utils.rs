//! Utilities module.

use num_traits::Float;
use std::cmp::Ordering;

/// Fast floating point minimum.  This function matches the semantics of
///
/// ```no_compile
/// if x < y { x } else { y }
/// ```
///
/// which has efficient instruction sequences on many platforms (1 instruction on x86).  For most
/// values, it matches the semantics of `x.min(y)`; the special cases are:
///
/// ```text
/// min(-0.0, +0.0); +0.0
/// min(+0.0, -0.0): -0.0
/// min( NaN,  1.0):  1.0
/// min( 1.0,  NaN):  NaN
/// ```
#[inline(always)]
pub fn fast_min<T: Float>(x: T, y: T) -> T {
    if x < y {
        x
    } else {
        y
    }
}

/// Fast floating point maximum. Mirror image of [`fast_min`].
#[inline(always)]
pub fn fast_max<T: Float>(x: T, y: T) -> T {
    if x > y {
        x
    } else {
        y
    }
}

/// Total order over floats for selection algorithms. NaNs compare equal to everything,
/// which keeps `select_nth_unstable_by` from panicking on malformed input.
#[inline]
pub fn float_order<T: Float>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
