//! Run and stress-experiment configuration, validation, and error types.
//!
//! [`RunConfig`] drives [`run_simulation()`](crate::run_simulation) and
//! [`Simulation::new()`](crate::Simulation::new); [`StressConfig`] drives
//! the experiments in [`stress`](crate::stress). Both carry the reference
//! defaults and check their invariants once, up front, via `validate()`.

use std::error::Error;
use std::fmt;

use vef_core::{ExchangeParams, ParamError};
use vef_space::{Mesh3, SpaceError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`RunConfig::validate()`] and
/// [`StressConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Mesh dimensions are invalid.
    Space(SpaceError),
    /// Exchange parameters are invalid.
    Params(ParamError),
    /// An experiment was configured to run zero steps.
    ZeroSteps {
        /// Which experiment.
        experiment: &'static str,
    },
    /// The perturbation amplitude is NaN or infinite.
    InvalidAmplitude {
        /// The invalid value.
        value: f64,
    },
    /// The speed warning threshold is NaN, infinite, zero, or negative.
    InvalidSpeedWarning {
        /// The invalid value.
        value: f64,
    },
    /// A parameter sweep axis has no values.
    EmptySweep {
        /// Which sweep axis.
        axis: &'static str,
    },
    /// The per-cell operation count is NaN, infinite, zero, or negative.
    InvalidOpsPerCell {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "mesh: {e}"),
            Self::Params(e) => write!(f, "params: {e}"),
            Self::ZeroSteps { experiment } => {
                write!(f, "{experiment} must run at least one step")
            }
            Self::InvalidAmplitude { value } => {
                write!(f, "perturbation amplitude must be finite, got {value}")
            }
            Self::InvalidSpeedWarning { value } => {
                write!(f, "speed_warning must be finite and positive, got {value}")
            }
            Self::EmptySweep { axis } => write!(f, "sweep over {axis} has no values"),
            Self::InvalidOpsPerCell { value } => {
                write!(
                    f,
                    "ops_per_cell_per_step must be finite and positive, got {value}"
                )
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Params(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<ParamError> for ConfigError {
    fn from(e: ParamError) -> Self {
        Self::Params(e)
    }
}

// ── RunConfig ──────────────────────────────────────────────────────

/// Configuration for a single simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Length of the `i` axis. Default: 32.
    pub nx: usize,
    /// Length of the `j` axis. Default: 32.
    pub ny: usize,
    /// Length of the `k` axis. Default: 32.
    pub nz: usize,
    /// Initial profile name. Unknown names fall back to uniform density.
    /// Default: `"gaussian"`.
    pub profile: String,
    /// Number of steps to run. Zero is allowed and yields an empty energy
    /// series. Default: 100.
    pub steps: usize,
    /// Exchange coefficients.
    pub params: ExchangeParams,
    /// Log a warning the first time the largest velocity magnitude exceeds
    /// this value. `None` disables the check. Default: `Some(1e3)`.
    pub speed_warning: Option<f64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            nx: 32,
            ny: 32,
            nz: 32,
            profile: "gaussian".to_string(),
            steps: 100,
            params: ExchangeParams::default(),
            speed_warning: Some(1e3),
        }
    }
}

impl RunConfig {
    /// A default configuration on an `nx × ny × nz` mesh.
    pub fn with_dims(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            ..Self::default()
        }
    }

    /// The mesh described by the configured dimensions.
    pub fn mesh(&self) -> Result<Mesh3, SpaceError> {
        Mesh3::new(self.nx, self.ny, self.nz)
    }

    /// Validate dimensions, parameters and the speed threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mesh()?;
        self.params.validate()?;
        validate_speed_warning(self.speed_warning)?;
        Ok(())
    }
}

pub(crate) fn validate_speed_warning(limit: Option<f64>) -> Result<(), ConfigError> {
    match limit {
        Some(value) if !value.is_finite() || value <= 0.0 => {
            Err(ConfigError::InvalidSpeedWarning { value })
        }
        _ => Ok(()),
    }
}

// ── StressConfig ───────────────────────────────────────────────────

/// Configuration for the stress experiments.
///
/// Every experiment except the scaling estimate builds a fresh mesh of
/// size `mesh` with `profile`.
#[derive(Clone, Debug, PartialEq)]
pub struct StressConfig {
    /// Mesh dimensions used by the stepping experiments. Default: 16³.
    pub mesh: (usize, usize, usize),
    /// Initial profile name. Default: `"gaussian"`.
    pub profile: String,
    /// Base coefficients. The sweep overrides `exchange_strength` and
    /// `theta_coupling`.
    pub params: ExchangeParams,
    /// Steps in the conservation experiment. Default: 100.
    pub conservation_steps: usize,
    /// Steps in the perturbation experiment. Default: 100.
    pub perturbation_steps: usize,
    /// Relative density bump at the center cell. Default: 0.01.
    pub amplitude: f64,
    /// Steps per sweep point. Default: 50.
    pub sweep_steps: usize,
    /// Sweep values for `exchange_strength`. Default: `[0.02, 0.05, 0.1]`.
    pub exchange_strengths: Vec<f64>,
    /// Sweep values for `theta_coupling`. Default: `[0.05, 0.1, 0.2]`.
    pub theta_couplings: Vec<f64>,
    /// Mesh sizes for the FLOP estimate. Default: 16³, 32³, 48³.
    pub scaling_sizes: Vec<(usize, usize, usize)>,
    /// Steps assumed by the FLOP estimate. Default: 100.
    pub scaling_steps: usize,
    /// Operations assumed per cell per step. Default: 100.0.
    pub ops_per_cell_per_step: f64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            mesh: (16, 16, 16),
            profile: "gaussian".to_string(),
            params: ExchangeParams::default(),
            conservation_steps: 100,
            perturbation_steps: 100,
            amplitude: 0.01,
            sweep_steps: 50,
            exchange_strengths: vec![0.02, 0.05, 0.1],
            theta_couplings: vec![0.05, 0.1, 0.2],
            scaling_sizes: vec![(16, 16, 16), (32, 32, 32), (48, 48, 48)],
            scaling_steps: 100,
            ops_per_cell_per_step: 100.0,
        }
    }
}

impl StressConfig {
    /// Validate every experiment's inputs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (nx, ny, nz) = self.mesh;
        Mesh3::new(nx, ny, nz)?;
        self.params.validate()?;
        for (experiment, steps) in [
            ("conservation", self.conservation_steps),
            ("perturbation", self.perturbation_steps),
            ("sensitivity sweep", self.sweep_steps),
        ] {
            if steps == 0 {
                return Err(ConfigError::ZeroSteps { experiment });
            }
        }
        if !self.amplitude.is_finite() {
            return Err(ConfigError::InvalidAmplitude {
                value: self.amplitude,
            });
        }
        if self.exchange_strengths.is_empty() {
            return Err(ConfigError::EmptySweep {
                axis: "exchange_strength",
            });
        }
        if self.theta_couplings.is_empty() {
            return Err(ConfigError::EmptySweep {
                axis: "theta_coupling",
            });
        }
        for params in self.sweep_params() {
            params.validate()?;
        }
        for &(nx, ny, nz) in &self.scaling_sizes {
            Mesh3::new(nx, ny, nz)?;
        }
        if !self.ops_per_cell_per_step.is_finite() || self.ops_per_cell_per_step <= 0.0 {
            return Err(ConfigError::InvalidOpsPerCell {
                value: self.ops_per_cell_per_step,
            });
        }
        Ok(())
    }

    /// Parameter sets of the sweep, `exchange_strength` outermost.
    pub fn sweep_params(&self) -> impl Iterator<Item = ExchangeParams> + '_ {
        self.exchange_strengths.iter().flat_map(move |&ex| {
            self.theta_couplings.iter().map(move |&tc| ExchangeParams {
                exchange_strength: ex,
                theta_coupling: tc,
                ..self.params
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_match_reference() {
        let c = RunConfig::default();
        assert_eq!((c.nx, c.ny, c.nz), (32, 32, 32));
        assert_eq!(c.profile, "gaussian");
        assert_eq!(c.steps, 100);
        assert_eq!(c.params, ExchangeParams::default());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_axis_is_space_error() {
        let c = RunConfig::with_dims(8, 0, 8);
        match c.validate() {
            Err(ConfigError::Space(SpaceError::EmptyAxis { axis })) => assert_eq!(axis, "ny"),
            other => panic!("expected Space error, got {other:?}"),
        }
    }

    #[test]
    fn bad_params_surface_with_source() {
        let c = RunConfig {
            params: ExchangeParams {
                dt: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = c.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Params(ParamError::NonPositiveDt { .. })));
        assert!(err.source().is_some());
    }

    #[test]
    fn speed_warning_must_be_positive() {
        let c = RunConfig {
            speed_warning: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidSpeedWarning { value: 0.0 })
        );
        let c = RunConfig {
            speed_warning: None,
            ..Default::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn stress_defaults_are_valid() {
        let c = StressConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.sweep_params().count(), 9);
    }

    #[test]
    fn sweep_order_is_exchange_major() {
        let c = StressConfig::default();
        let pairs: Vec<(f64, f64)> = c
            .sweep_params()
            .map(|p| (p.exchange_strength, p.theta_coupling))
            .collect();
        assert_eq!(pairs[0], (0.02, 0.05));
        assert_eq!(pairs[1], (0.02, 0.1));
        assert_eq!(pairs[3], (0.05, 0.05));
        assert_eq!(pairs[8], (0.1, 0.2));
    }

    #[test]
    fn stress_rejects_degenerate_inputs() {
        let c = StressConfig {
            sweep_steps: 0,
            ..Default::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::ZeroSteps {
                experiment: "sensitivity sweep"
            })
        );

        let c = StressConfig {
            theta_couplings: vec![],
            ..Default::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::EmptySweep {
                axis: "theta_coupling"
            })
        );

        let c = StressConfig {
            exchange_strengths: vec![0.1, f64::NAN],
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::Params(_))));

        let c = StressConfig {
            ops_per_cell_per_step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidOpsPerCell { .. })
        ));
    }
}
