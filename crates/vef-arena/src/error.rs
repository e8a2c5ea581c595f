//! State construction errors.

use std::error::Error;
use std::fmt;

use vef_core::Field;

/// Errors from building a [`MeshState`](crate::MeshState) out of explicit
/// buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    /// A field buffer does not hold exactly one value per cell.
    ShapeMismatch {
        /// The offending field.
        field: Field,
        /// `nx · ny · nz` of the mesh.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "field {field} has {actual} values, mesh has {expected} cells"
            ),
        }
    }
}

impl Error for StateError {}
