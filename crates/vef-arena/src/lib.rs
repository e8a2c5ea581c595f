//! Double-buffered mesh state storage for the VEF field solver.
//!
//! [`MeshState`] exclusively owns the seven flat field buffers of a mesh.
//! `rho` is written once at construction; the six dynamic fields live in
//! two banks that alternate between "live" (readable) and "staging"
//! (writable) roles:
//!
//! ```text
//! MeshState
//! ├── rho: Vec<f64>          ←─── written at construction, read-only after
//! ├── live: DynamicFields    ←─── what readers and diagnostics see
//! └── staging: DynamicFields ←─── overwritten cell by cell during a step
//! ```
//!
//! The lifecycle of one step is:
//! 1. [`MeshState::begin_step()`]: borrow the state as a [`StepGuard`]
//! 2. the updater reads the [`Snapshot`] and fills every cell of the staging bank
//! 3. [`StepGuard::commit()`]: swap the banks and advance the [`StepId`](vef_core::StepId)
//!
//! Dropping the guard without committing aborts the step: the live bank
//! was never written, so no partial update is observable.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod profile;
pub mod state;

pub use error::StateError;
pub use profile::InitialProfile;
pub use state::{create_mesh, DynamicCell, DynamicFields, MeshState, Snapshot, StepGuard};
