//! Errors raised while configuring geometry and transforms.
//!
//! Queries never fail: a miss is `None`/`false`. Only scene construction can go wrong.

use thiserror::Error;

/// The error type of this crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A transform matrix could not be inverted.
    #[error("transform matrix is singular and cannot be inverted")]
    SingularTransform,

    /// An axis index outside of `0..3` was used.
    #[error("invalid axis index {0}, expected 0, 1 or 2")]
    InvalidAxis(usize),

    /// A mesh was built without any triangles.
    #[error("a mesh needs at least one triangle")]
    EmptyMesh,

    /// A mesh face referenced a vertex past the end of the vertex list.
    #[error("face references vertex {index}, but the mesh has {len} vertices")]
    InvalidVertexIndex {
        /// The offending index.
        index: usize,
        /// Number of vertices available.
        len: usize,
    },

    /// An instantiation referenced an object id that was never registered.
    #[error("object {0} is not registered")]
    UnknownObject(u32),

    /// An object id was registered twice.
    #[error("object {0} is already registered")]
    DuplicateObject(u32),
}

/// Result type with [`Error`] as its error.
pub type Result<T> = std::result::Result<T, Error>;
