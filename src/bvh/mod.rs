//! This module defines a [`Bvh`].
//!
//! [`Bvh`]: struct.Bvh.html
//!

mod bvh_impl;
mod bvh_node;
mod iter;

pub use self::bvh_impl::*;
pub use self::bvh_node::LinearNode;
pub use self::iter::*;
