//! Exchange stencil updater for the VEF field solver.
//!
//! One call to [`step()`] advances a [`MeshState`](vef_arena::MeshState)
//! by one time increment. Every cell's new values are a pure function of
//! the pre-step snapshot and the [`ExchangeParams`](vef_core::ExchangeParams),
//! so the traversal order is irrelevant and no cell ever observes a
//! neighbour's post-step value.
//!
//! The per-cell rule lives in [`exchange::update_cell()`]. After the
//! staging bank is filled, [`sentinel::check_finite()`] scans it; a step
//! that produced NaN or infinity is discarded before the commit.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod exchange;
pub mod sentinel;

pub use exchange::{step, update_cell};
pub use sentinel::check_finite;
