//! Test fixtures and state hashing for VEF development.
//!
//! - [`fixtures`]: ready-made states (profile-seeded and seeded random).
//! - [`hash`]: [`state_hash`] for bit-exact determinism checks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod hash;

pub use fixtures::{cube, gaussian_state, random_state, uniform_state};
pub use hash::state_hash;
