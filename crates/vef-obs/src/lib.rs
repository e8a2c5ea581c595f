//! Diagnostics over VEF mesh state.
//!
//! Every function here is a pure read-only reduction over a committed
//! [`MeshState`](vef_arena::MeshState). None of them can fail for a
//! well-formed state, and none retain anything between calls.
//!
//! | Function | Result |
//! |---|---|
//! | [`total_energy_like`] | `Σ rho·(½|v|² + ½phi²) + 0.1·K²` |
//! | [`simple_observables`] | radial `phi` profile and rotation-curve proxy |
//! | [`field_mean`], [`field_variance`] | per-field moments |
//! | [`max_speed`] | largest velocity magnitude |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod energy;
pub mod radial;
pub mod stats;

pub use energy::total_energy_like;
pub use radial::{simple_observables, RadialProfile};
pub use stats::{field_mean, field_variance, max_speed};
