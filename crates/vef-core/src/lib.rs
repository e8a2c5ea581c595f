//! Core types and errors for the VEF field solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: field
//! identities, the step counter, the exchange parameters, and the error
//! types raised by parameter validation and the stencil updater.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;
pub mod params;

pub use error::{ParamError, StepError};
pub use field::Field;
pub use id::StepId;
pub use params::ExchangeParams;
