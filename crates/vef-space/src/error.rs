//! Error types for mesh construction.

use std::fmt;

/// Errors arising from mesh construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// One of the three axes has zero length.
    EmptyAxis {
        /// Axis name (`"nx"`, `"ny"` or `"nz"`).
        axis: &'static str,
    },
    /// `nx · ny · nz` does not fit in `usize`.
    CellCountOverflow {
        /// The requested dimensions.
        dims: (usize, usize, usize),
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAxis { axis } => write!(f, "mesh axis {axis} must be at least 1"),
            Self::CellCountOverflow { dims } => {
                write!(f, "cell count of mesh {dims:?} overflows usize")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
