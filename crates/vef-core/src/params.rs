//! Exchange parameters read by every step.

use crate::error::ParamError;

/// The five coefficients controlling the exchange dynamics.
///
/// An immutable value passed by reference to every step. Validation is
/// done once by the caller via [`validate()`](ExchangeParams::validate);
/// the updater itself never re-checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExchangeParams {
    /// Coupling between density/potential differences and the exchange
    /// flow. Default: 0.05.
    pub exchange_strength: f64,
    /// Baseline of the radial gradient factor. Default: 1.0.
    pub hr_base: f64,
    /// Coupling between density deviation and the phase pendulum.
    /// Default: 0.1.
    pub theta_coupling: f64,
    /// Relaxation rate of the curvature proxy toward its target.
    /// Default: 0.02.
    pub curvature_relax: f64,
    /// Time increment per step. Default: 0.01.
    pub dt: f64,
}

impl Default for ExchangeParams {
    fn default() -> Self {
        Self {
            exchange_strength: 0.05,
            hr_base: 1.0,
            theta_coupling: 0.1,
            curvature_relax: 0.02,
            dt: 0.01,
        }
    }
}

impl ExchangeParams {
    /// Check that every coefficient is finite and that `dt` is positive.
    pub fn validate(&self) -> Result<(), ParamError> {
        let named = [
            ("exchange_strength", self.exchange_strength),
            ("hr_base", self.hr_base),
            ("theta_coupling", self.theta_coupling),
            ("curvature_relax", self.curvature_relax),
            ("dt", self.dt),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ParamError::NonFinite { name, value });
            }
        }
        if self.dt <= 0.0 {
            return Err(ParamError::NonPositiveDt { value: self.dt });
        }
        Ok(())
    }
}
