//! Error types for parameter validation and step execution.

use std::error::Error;
use std::fmt;

use crate::field::Field;

/// Errors from [`ExchangeParams::validate()`](crate::ExchangeParams::validate).
#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    /// A coefficient is NaN or infinite.
    NonFinite {
        /// Name of the offending coefficient.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The time increment is zero or negative.
    NonPositiveDt {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { name, value } => {
                write!(f, "parameter '{name}' must be finite, got {value}")
            }
            Self::NonPositiveDt { value } => {
                write!(f, "dt must be positive, got {value}")
            }
        }
    }
}

impl Error for ParamError {}

/// Errors from a single stencil step.
///
/// A step that returns an error has not been committed: the mesh state is
/// exactly as it was before the call.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The updater produced a NaN or infinite value.
    NonFinite {
        /// The field containing the first non-finite value.
        field: Field,
        /// Flat index of the first non-finite cell.
        cell_index: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field, cell_index } => {
                write!(f, "non-finite value in field {field} at cell {cell_index}")
            }
        }
    }
}

impl Error for StepError {}
