//! VEF: an explicit time-stepping exchange-field solver on a regular 3D mesh.
//!
//! Seven coupled scalar fields per cell (`rho`, `phi`, `vx`, `vy`, `vz`,
//! `K`, `theta`) are advanced with purely local 6-neighbour interactions.
//! This is the top-level facade crate that re-exports the public API from
//! all VEF sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use vef::prelude::*;
//!
//! let mut state = create_mesh(8, 8, 8, "gaussian").unwrap();
//! let params = ExchangeParams::default();
//!
//! let e0 = total_energy_like(&state);
//! for _ in 0..10 {
//!     step(&mut state, &params).unwrap();
//! }
//! assert_eq!(state.step_id(), StepId(10));
//! assert!(total_energy_like(&state) > e0);
//!
//! let profile = simple_observables(&state);
//! assert_eq!(profile.radial_phi.len(), 4);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vef-core` | `Field`, `StepId`, `ExchangeParams`, core errors |
//! | [`space`] | `vef-space` | `Mesh3` indexing and neighbour geometry |
//! | [`arena`] | `vef-arena` | `MeshState`, profiles, the step guard |
//! | [`stencil`] | `vef-stencil` | The exchange update rule and `step` |
//! | [`obs`] | `vef-obs` | Energy, radial profile, field statistics |
//! | [`engine`] | `vef-engine` | `Simulation`, run loop, stress experiments |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`vef-core`).
pub use vef_core as types;

/// Mesh geometry (`vef-space`).
///
/// [`space::Mesh3`] owns the flat index layout and the neighbour and
/// radial-factor queries used by the stencil.
pub use vef_space as space;

/// Mesh state storage (`vef-arena`).
///
/// [`arena::MeshState`] owns all field buffers; [`arena::StepGuard`] is
/// the single commit point of a step.
pub use vef_arena as arena;

/// The exchange update rule (`vef-stencil`).
pub use vef_stencil as stencil;

/// Diagnostics (`vef-obs`).
pub use vef_obs as obs;

/// Drivers and stress experiments (`vef-engine`).
///
/// [`engine::Simulation`] for stepping a state in a loop,
/// [`engine::run_simulation`] for a one-call run, and
/// [`engine::run_all_tests`] for the stress suite.
pub use vef_engine as engine;

/// Common imports for typical VEF usage.
///
/// ```rust
/// use vef::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use vef_core::{ExchangeParams, Field, StepId};

    // Errors
    pub use vef_core::{ParamError, StepError};
    pub use vef_space::SpaceError;

    // Geometry and state
    pub use vef_arena::{create_mesh, InitialProfile, MeshState};
    pub use vef_space::Mesh3;

    // Stepping and diagnostics
    pub use vef_obs::{simple_observables, total_energy_like, RadialProfile};
    pub use vef_stencil::step;

    // Engine
    pub use vef_engine::{
        run_simulation, ConfigError, RunConfig, RunError, RunResult, Simulation, StepMetrics,
        StressConfig,
    };
}
