//! The [`Simulation`] driver and the one-call [`run_simulation()`].
//!
//! # Ownership model
//!
//! A `Simulation` is the single owner of its [`MeshState`]. All stepping
//! goes through `&mut self`, so a borrowed [`state()`](Simulation::state)
//! cannot be held across a step and diagnostics can never observe a step
//! in progress.
//!
//! # Failure
//!
//! A step that produces a non-finite value is aborted before its commit
//! and surfaces as [`RunError::Step`]. The state is left exactly as it was
//! after the last successful step.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use vef_arena::{create_mesh, MeshState};
use vef_core::{ExchangeParams, StepError, StepId};
use vef_obs::{max_speed, simple_observables, total_energy_like, RadialProfile};

use crate::config::{validate_speed_warning, ConfigError, RunConfig};
use crate::metrics::StepMetrics;
use crate::perturb::Perturbation;

// ── RunError ────────────────────────────────────────────────────

/// Errors from driving a simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The run was misconfigured; nothing was stepped.
    Config(ConfigError),
    /// A step was aborted.
    Step {
        /// The step id the aborted step would have committed.
        step: StepId,
        /// Why it was aborted.
        source: StepError,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Step { step, source } => write!(f, "step {step} aborted: {source}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Step { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// A mesh state paired with the coefficients that advance it.
///
/// # Example
///
/// ```
/// use vef_engine::{RunConfig, Simulation};
///
/// let mut sim = Simulation::new(&RunConfig::with_dims(6, 6, 6)).unwrap();
/// let mut energies = Vec::new();
/// sim.run(10, |state| energies.push(vef_obs::total_energy_like(state)))
///     .unwrap();
/// assert_eq!(sim.step_id().0, 10);
/// assert_eq!(energies.len(), 10);
/// ```
#[derive(Clone)]
pub struct Simulation {
    state: MeshState,
    params: ExchangeParams,
    speed_warning: Option<f64>,
    speed_warned: bool,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `config` and build a fresh mesh from it.
    pub fn new(config: &RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = create_mesh(config.nx, config.ny, config.nz, &config.profile)?;
        Ok(Self {
            state,
            params: config.params,
            speed_warning: config.speed_warning,
            speed_warned: false,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Drive an existing state. The speed warning is disabled.
    pub fn from_state(state: MeshState, params: ExchangeParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            state,
            params,
            speed_warning: None,
            speed_warned: false,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Set the speed warning threshold; `None` disables it.
    pub fn with_speed_warning(mut self, limit: Option<f64>) -> Result<Self, ConfigError> {
        validate_speed_warning(limit)?;
        self.speed_warning = limit;
        self.speed_warned = false;
        Ok(self)
    }

    /// Advance by one committed step.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Step`] if the step produced a non-finite value.
    /// The state is unchanged in that case.
    pub fn step(&mut self) -> Result<StepId, RunError> {
        let attempted = self.state.step_id().next();
        let start = Instant::now();
        let committed = vef_stencil::step(&mut self.state, &self.params).map_err(|source| {
            tracing::warn!(step = %attempted, error = %source, "step aborted");
            RunError::Step {
                step: attempted,
                source,
            }
        })?;
        self.last_metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            cell_count: self.state.mesh().cell_count(),
        };
        tracing::trace!(
            step = %committed,
            total_us = self.last_metrics.total_us,
            "step committed"
        );
        self.check_speed(committed);
        Ok(committed)
    }

    /// Run `steps` steps, calling `observer` with the committed state after
    /// each one.
    ///
    /// Stops at the first aborted step; the observer has then been called
    /// once per successful step.
    pub fn run<F>(&mut self, steps: usize, mut observer: F) -> Result<(), RunError>
    where
        F: FnMut(&MeshState),
    {
        for _ in 0..steps {
            self.step()?;
            observer(&self.state);
        }
        Ok(())
    }

    /// Apply a perturbation to the committed state.
    pub fn perturb(&mut self, perturbation: &Perturbation) {
        perturbation.apply(&mut self.state);
    }

    /// The committed state.
    pub fn state(&self) -> &MeshState {
        &self.state
    }

    /// Mutable access to the committed state, for direct edits between
    /// steps.
    pub fn state_mut(&mut self) -> &mut MeshState {
        &mut self.state
    }

    /// Consume the simulation, returning its state.
    pub fn into_state(self) -> MeshState {
        self.state
    }

    /// The coefficients in use.
    pub fn params(&self) -> &ExchangeParams {
        &self.params
    }

    /// Number of committed steps.
    pub fn step_id(&self) -> StepId {
        self.state.step_id()
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    fn check_speed(&mut self, step: StepId) {
        let Some(limit) = self.speed_warning else {
            return;
        };
        if self.speed_warned {
            return;
        }
        let speed = max_speed(&self.state);
        if speed > limit {
            self.speed_warned = true;
            tracing::warn!(
                step = %step,
                max_speed = speed,
                limit,
                "velocity magnitude exceeded warning threshold"
            );
        }
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("dims", &self.state.dims())
            .field("step", &self.state.step_id())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

// ── run_simulation ──────────────────────────────────────────────

/// Output of [`run_simulation()`].
#[derive(Clone, Debug)]
pub struct RunResult {
    /// `total_energy_like` after each step, in step order.
    pub energies: Vec<f64>,
    /// Radial observables of the final state.
    pub observables: RadialProfile,
    /// The state after the last step.
    pub final_state: MeshState,
}

/// Build a mesh from `config`, run it, and collect diagnostics.
pub fn run_simulation(config: &RunConfig) -> Result<RunResult, RunError> {
    let mut sim = Simulation::new(config)?;
    tracing::info!(
        dims = ?sim.state().dims(),
        profile = %config.profile,
        steps = config.steps,
        "starting run"
    );

    let mut energies = Vec::with_capacity(config.steps);
    sim.run(config.steps, |state| {
        let energy = total_energy_like(state);
        tracing::debug!(step = %state.step_id(), energy, "energy");
        energies.push(energy);
    })?;

    let observables = simple_observables(sim.state());
    tracing::info!(
        steps = config.steps,
        final_energy = energies.last().copied(),
        "run finished"
    );
    Ok(RunResult {
        energies,
        observables,
        final_state: sim.into_state(),
    })
}
