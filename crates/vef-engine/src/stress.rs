//! Stress experiments and validation routines.
//!
//! | Experiment | Measures |
//! |---|---|
//! | [`conservation_test`] | drift of the energy-like quantity |
//! | [`perturbation_growth_test`] | density variance after a center bump |
//! | [`parameter_sensitivity_test`] | energy excursion across a coefficient sweep |
//! | [`scaling_estimate`] | analytical operation count per mesh size |
//!
//! The scaling estimate is arithmetic only; nothing is timed.

use indexmap::IndexMap;
use vef_arena::create_mesh;
use vef_core::{ExchangeParams, Field};
use vef_obs::{field_variance, total_energy_like};
use vef_space::Mesh3;

use crate::config::{ConfigError, StressConfig};
use crate::perturb::Perturbation;
use crate::simulation::{RunError, Simulation};

/// Result of [`conservation_test()`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConservationReport {
    /// Energy after each step.
    pub energies: Vec<f64>,
    /// Last energy minus first energy.
    pub drift: f64,
    /// `drift / max(1e-9, |first energy|)`.
    pub relative_drift: f64,
}

/// Result of [`perturbation_growth_test()`].
#[derive(Clone, Debug, PartialEq)]
pub struct PerturbationReport {
    /// Population variance of `rho` after each step.
    pub contrast_history: Vec<f64>,
    /// The last entry of `contrast_history`.
    pub final_contrast: f64,
}

/// One point of [`parameter_sensitivity_test()`].
#[derive(Clone, Debug, PartialEq)]
pub struct SensitivityRun {
    /// Swept `exchange_strength`.
    pub exchange_strength: f64,
    /// Swept `theta_coupling`.
    pub theta_coupling: f64,
    /// Energy after each step.
    pub energies: Vec<f64>,
    /// `max |e - e_first|` over the series.
    pub max_energy_deviation: f64,
}

/// One mesh size of [`scaling_estimate()`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScalingEstimate {
    /// `nx · ny · nz`.
    pub cells: usize,
    /// Steps assumed.
    pub steps: usize,
    /// Operations assumed per cell per step.
    pub ops_per_cell_per_step: f64,
    /// `cells · ops_per_cell_per_step · steps`.
    pub total_ops: f64,
    /// `total_ops / 1e9`.
    pub approx_gflops: f64,
}

/// All four experiments together, as produced by [`run_all_tests()`].
#[derive(Clone, Debug, PartialEq)]
pub struct StressReport {
    /// Energy drift.
    pub conservation: ConservationReport,
    /// Density contrast under a center bump.
    pub perturbation_growth: PerturbationReport,
    /// Sweep results keyed `ex_{exchange_strength}_tc_{theta_coupling}`,
    /// in sweep order.
    pub parameter_sensitivity: IndexMap<String, SensitivityRun>,
    /// FLOP estimates keyed `{nx}x{ny}x{nz}`, in configured order.
    pub scaling_estimate: IndexMap<String, ScalingEstimate>,
}

fn fresh_simulation(config: &StressConfig, params: ExchangeParams) -> Result<Simulation, RunError> {
    let (nx, ny, nz) = config.mesh;
    let state = create_mesh(nx, ny, nz, &config.profile).map_err(ConfigError::from)?;
    Ok(Simulation::from_state(state, params)?)
}

fn energy_series(sim: &mut Simulation, steps: usize) -> Result<Vec<f64>, RunError> {
    let mut energies = Vec::with_capacity(steps);
    sim.run(steps, |state| energies.push(total_energy_like(state)))?;
    Ok(energies)
}

/// Track the energy-like quantity over `conservation_steps` steps.
pub fn conservation_test(config: &StressConfig) -> Result<ConservationReport, RunError> {
    config.validate()?;
    tracing::info!(steps = config.conservation_steps, "conservation test");
    let mut sim = fresh_simulation(config, config.params)?;
    let energies = energy_series(&mut sim, config.conservation_steps)?;

    let first = energies.first().copied().unwrap_or(0.0);
    let last = energies.last().copied().unwrap_or(0.0);
    let drift = last - first;
    let relative_drift = drift / first.abs().max(1e-9);
    tracing::info!(drift, relative_drift, "conservation test finished");
    Ok(ConservationReport {
        energies,
        drift,
        relative_drift,
    })
}

/// Bump the center density by `1 + amplitude` and record the population
/// variance of `rho` after every step.
///
/// `rho` is never written by a step, so every entry equals the variance
/// of the perturbed initial density.
pub fn perturbation_growth_test(config: &StressConfig) -> Result<PerturbationReport, RunError> {
    config.validate()?;
    tracing::info!(
        steps = config.perturbation_steps,
        amplitude = config.amplitude,
        "perturbation growth test"
    );
    let mut sim = fresh_simulation(config, config.params)?;
    sim.perturb(&Perturbation::ScaleCenter {
        field: Field::Rho,
        amplitude: config.amplitude,
    });

    let mut contrast_history = Vec::with_capacity(config.perturbation_steps);
    sim.run(config.perturbation_steps, |state| {
        contrast_history.push(field_variance(state, Field::Rho));
    })?;
    let final_contrast = contrast_history.last().copied().unwrap_or(0.0);
    tracing::info!(final_contrast, "perturbation growth test finished");
    Ok(PerturbationReport {
        contrast_history,
        final_contrast,
    })
}

/// Run `sweep_steps` steps for every `(exchange_strength, theta_coupling)`
/// pair and record the largest energy excursion from the first step.
pub fn parameter_sensitivity_test(
    config: &StressConfig,
) -> Result<IndexMap<String, SensitivityRun>, RunError> {
    config.validate()?;
    let mut results = IndexMap::new();
    for params in config.sweep_params() {
        let label = format!(
            "ex_{:?}_tc_{:?}",
            params.exchange_strength, params.theta_coupling
        );
        let mut sim = fresh_simulation(config, params)?;
        let energies = energy_series(&mut sim, config.sweep_steps)?;
        let first = energies.first().copied().unwrap_or(0.0);
        let max_energy_deviation = energies
            .iter()
            .map(|e| (e - first).abs())
            .fold(0.0, f64::max);
        tracing::debug!(label = %label, max_energy_deviation, "sweep point finished");
        results.insert(
            label,
            SensitivityRun {
                exchange_strength: params.exchange_strength,
                theta_coupling: params.theta_coupling,
                energies,
                max_energy_deviation,
            },
        );
    }
    tracing::info!(points = results.len(), "parameter sensitivity test finished");
    Ok(results)
}

/// Analytical operation count for each configured mesh size.
///
/// Purely illustrative: `cells · ops_per_cell_per_step · scaling_steps`,
/// nothing is measured.
///
/// # Errors
///
/// Returns [`ConfigError::Space`] if a size has a zero axis or its cell
/// count overflows `usize`.
pub fn scaling_estimate(
    config: &StressConfig,
) -> Result<IndexMap<String, ScalingEstimate>, ConfigError> {
    config
        .scaling_sizes
        .iter()
        .map(|&(nx, ny, nz)| -> Result<_, ConfigError> {
            let cells = Mesh3::new(nx, ny, nz)?.cell_count();
            let total_ops =
                cells as f64 * config.ops_per_cell_per_step * config.scaling_steps as f64;
            Ok((
                format!("{nx}x{ny}x{nz}"),
                ScalingEstimate {
                    cells,
                    steps: config.scaling_steps,
                    ops_per_cell_per_step: config.ops_per_cell_per_step,
                    total_ops,
                    approx_gflops: total_ops / 1e9,
                },
            ))
        })
        .collect()
}

/// Run all four experiments.
pub fn run_all_tests(config: &StressConfig) -> Result<StressReport, RunError> {
    config.validate()?;
    Ok(StressReport {
        conservation: conservation_test(config)?,
        perturbation_growth: perturbation_growth_test(config)?,
        parameter_sensitivity: parameter_sensitivity_test(config)?,
        scaling_estimate: scaling_estimate(config)?,
    })
}
