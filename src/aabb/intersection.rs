//! Ray/box slab test.

use crate::aabb::Aabb;
use crate::interval::Interval;
use crate::ray::Ray;

impl Aabb {
    /// Narrows the ray's current `[t_min, t_max]` by the three slabs of this box.
    /// Returns the overlap, or `None` as soon as it becomes empty.
    ///
    /// Zero direction components are not special-cased. Their reciprocal is `±inf`, which
    /// the comparisons below order correctly; a `0 * inf` NaN fails every comparison and so
    /// leaves the interval untouched. The slab ends are ordered by the sign of the reciprocal,
    /// which also makes an empty slab reject every ray.
    #[inline]
    pub fn ray_overlap(&self, ray: &Ray) -> Option<Interval> {
        let mut t_min = ray.t_min;
        let mut t_max = ray.t_max;
        for axis in 0..3 {
            let slab = &self[axis];
            let inv_direction = 1.0 / ray.direction[axis];
            let mut t0 = (slab.min - ray.origin[axis]) * inv_direction;
            let mut t1 = (slab.max - ray.origin[axis]) * inv_direction;
            if inv_direction < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > t_min {
                t_min = t0;
            }
            if t1 < t_max {
                t_max = t1;
            }

            if t_max <= t_min {
                return None;
            }
        }
        Some(Interval {
            min: t_min,
            max: t_max,
        })
    }

    /// Tests the intersection of a [`Ray`] with this [`Aabb`] inside the ray's current
    /// parametric interval. The ray itself is not modified.
    ///
    /// # Examples
    /// ```
    /// use tracer_accel::aabb::Aabb;
    /// use tracer_accel::ray::Ray;
    /// use tracer_accel::{Point3, Vector3};
    ///
    /// let origin = Point3::new(0.0, 0.0, 0.0);
    /// let direction = Vector3::new(1.0, 0.0, 0.0);
    /// let ray = Ray::new(origin, direction);
    ///
    /// let point1 = Point3::new(99.9, -1.0, -1.0);
    /// let point2 = Point3::new(100.1, 1.0, 1.0);
    /// let aabb = Aabb::new(point1, point2);
    ///
    /// assert!(aabb.intersects_ray(&ray));
    /// assert!(!aabb.intersects_ray(&ray.with_interval(0.0, 50.0)));
    /// ```
    #[inline]
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        self.ray_overlap(ray).is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::aabb::Aabb;
    use crate::ray::Ray;
    use crate::testbase::{tuple_to_point, tuplevec_small_strategy, TupleVec};
    use crate::{Point3, Real, Vector3};
    use float_eq::assert_float_eq;
    use proptest::prelude::*;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    /// Generates a random [`Ray`] which points at at a random [`Aabb`].
    fn gen_ray_to_aabb(data: (TupleVec, TupleVec, TupleVec)) -> (Ray, Aabb) {
        let aabb = Aabb::new(tuple_to_point(&data.0), tuple_to_point(&data.1));
        let center = aabb.centroid();
        let pos = tuple_to_point(&data.2);
        let ray = Ray::new(pos, center - pos).with_interval(0.0, Real::INFINITY);
        (ray, aabb)
    }

    /// Make sure a ray can intersect an Aabb with no depth.
    #[test]
    fn test_ray_hits_zero_depth_aabb() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let flat = Aabb::new(Point3::new(-1.0, -1.0, 1.0), Point3::new(1.0, 1.0, 1.0));
        assert!(flat.intersects_ray(&ray));
    }

    #[test]
    fn test_axis_aligned_directions() {
        let aabb = unit_box();
        for direction in [Vector3::x(), -Vector3::x(), Vector3::y(), -Vector3::y(), Vector3::z(), -Vector3::z()] {
            let ray = Ray::new(Point3::origin() - direction * 5.0, direction);
            assert!(aabb.intersects_ray(&ray), "missed along {}", direction);

            // Parallel to the slab but outside of it.
            let offset = Vector3::new(direction.y.abs(), direction.z.abs(), direction.x.abs()) * 3.0;
            let outside = Ray::new(ray.origin + offset, direction);
            assert!(!aabb.intersects_ray(&outside), "hit along {}", direction);
        }
    }

    #[test]
    fn test_overlap_interval() {
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::x());
        let overlap = unit_box().ray_overlap(&ray).unwrap();
        assert_float_eq!(overlap.min, 4.0, abs <= 1e-3);
        assert_float_eq!(overlap.max, 6.0, abs <= 1e-3);
    }

    #[test]
    fn test_box_behind_ray_or_beyond_t_max() {
        let aabb = unit_box();
        let behind = Ray::new(Point3::new(5.0, 0.0, 0.0), Vector3::x());
        assert!(!aabb.intersects_ray(&behind));

        let short = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::x()).with_interval(0.0, 3.0);
        assert!(!aabb.intersects_ray(&short));
    }

    #[test]
    fn test_origin_inside_box() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.3, -0.2, 0.9));
        assert!(unit_box().intersects_ray(&ray));
    }

    #[test]
    fn test_empty_box_is_never_hit() {
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::x());
        assert!(!Aabb::empty().intersects_ray(&ray));
    }

    proptest! {
        // Test whether a `Ray` which points at the center of an `Aabb` intersects it.
        #[test]
        fn test_ray_points_at_aabb_center(data in (tuplevec_small_strategy(),
                                                   tuplevec_small_strategy(),
                                                   tuplevec_small_strategy())) {
            let (ray, aabb) = gen_ray_to_aabb(data);
            prop_assume!(ray.direction.norm() > 1e-3);
            prop_assert!(aabb.intersects_ray(&ray));
        }

        // Test whether a `Ray` which points away from the center of an `Aabb`
        // does not intersect it, unless its origin is inside the `Aabb`.
        #[test]
        fn test_ray_points_from_aabb_center(data in (tuplevec_small_strategy(),
                                                     tuplevec_small_strategy(),
                                                     tuplevec_small_strategy())) {
            let (mut ray, aabb) = gen_ray_to_aabb(data);
            prop_assume!(ray.direction.norm() > 1e-3);
            ray.direction = -ray.direction;
            ray.t_min = 0.0;
            prop_assert!(!aabb.intersects_ray(&ray) || aabb.contains(&ray.origin));
        }
    }
}
