//! Direct field perturbations applied between steps.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use vef_arena::MeshState;
use vef_core::Field;

/// A one-off edit of a committed field.
///
/// Perturbations bypass the step guard: they are driver edits applied
/// while no step is in progress, and do not advance the step id.
#[derive(Clone, Debug, PartialEq)]
pub enum Perturbation {
    /// Multiply the value at the integer center `(nx/2, ny/2, nz/2)` by
    /// `1 + amplitude`.
    ScaleCenter {
        /// Field to edit.
        field: Field,
        /// Relative change.
        amplitude: f64,
    },
    /// Add `amplitude · u` to every cell, `u` uniform in `[-1, 1)` from a
    /// ChaCha8 stream seeded with `seed`.
    Noise {
        /// Field to edit.
        field: Field,
        /// Noise half-width.
        amplitude: f64,
        /// RNG seed; the same seed always produces the same noise.
        seed: u64,
    },
}

impl Perturbation {
    /// Apply the perturbation to `state`.
    pub fn apply(&self, state: &mut MeshState) {
        match *self {
            Self::ScaleCenter { field, amplitude } => {
                let mesh = *state.mesh();
                let (i, j, k) = mesh.center_cell();
                state.field_mut(field)[mesh.index(i, j, k)] *= 1.0 + amplitude;
            }
            Self::Noise {
                field,
                amplitude,
                seed,
            } => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                for v in state.field_mut(field) {
                    let u: f64 = rng.random::<f64>() * 2.0 - 1.0;
                    *v += amplitude * u;
                }
            }
        }
        tracing::debug!(perturbation = ?self, step = %state.step_id(), "applied perturbation");
    }
}
