//! Benchmark profiles for the VEF field solver.
//!
//! - [`reference_profile`]: 32³ mesh (~33K cells), the default run size
//! - [`stress_profile`]: 64³ mesh (~262K cells) for stress testing

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use vef_core::ExchangeParams;
use vef_engine::RunConfig;

/// Reference benchmark profile: 32³ Gaussian mesh, default coefficients,
/// 100 steps.
pub fn reference_profile() -> RunConfig {
    RunConfig {
        params: ExchangeParams::default(),
        speed_warning: None,
        ..RunConfig::with_dims(32, 32, 32)
    }
}

/// Stress benchmark profile: 64³ Gaussian mesh.
///
/// Same coefficients as [`reference_profile`] at 8x the cell count.
pub fn stress_profile() -> RunConfig {
    RunConfig {
        speed_warning: None,
        ..RunConfig::with_dims(64, 64, 64)
    }
}
