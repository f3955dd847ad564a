//! This module holds the [`Ray`] definition and the [`HitRecord`] filled in by intersections.
mod hit_record;
mod ray_impl;

pub use self::hit_record::*;
pub use self::ray_impl::*;
