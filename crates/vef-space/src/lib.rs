//! Regular 3D mesh geometry for the VEF field solver.
//!
//! [`Mesh3`] is an immutable descriptor of an `nx × ny × nz` lattice. It
//! owns no field data; it answers the pure geometric questions the
//! updater and the diagnostics ask of every cell:
//!
//! - flat indexing in `(i·ny + j)·nz + k` order
//! - the in-bounds 6-connected [`Neighbour`]s of a cell (no wrap, no padding)
//! - the radial gradient factor and radial distances from the mesh center

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod mesh;

pub use error::SpaceError;
pub use mesh::{Axis, Mesh3, Neighbour, Neighbours};
