//! Run loop, perturbations and stress experiments for the VEF field solver.
//!
//! [`Simulation`] owns a [`MeshState`](vef_arena::MeshState) and its
//! [`ExchangeParams`](vef_core::ExchangeParams) and advances it one
//! committed step at a time. [`run_simulation()`] is the one-call driver:
//! build a mesh from a [`RunConfig`], step it, and collect the energy
//! series and final observables.
//!
//! The [`stress`] module reproduces the validation experiments:
//! energy drift, perturbation contrast, a parameter sweep and an
//! analytical FLOP estimate, combined by [`run_all_tests()`].
//!
//! All logging goes through `tracing`; nothing here installs a
//! subscriber.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod perturb;
pub mod simulation;
pub mod stress;

pub use config::{ConfigError, RunConfig, StressConfig};
pub use metrics::StepMetrics;
pub use perturb::Perturbation;
pub use simulation::{run_simulation, RunError, RunResult, Simulation};
pub use stress::{
    conservation_test, parameter_sensitivity_test, perturbation_growth_test, run_all_tests,
    scaling_estimate, ConservationReport, PerturbationReport, ScalingEstimate, SensitivityRun,
    StressReport,
};
