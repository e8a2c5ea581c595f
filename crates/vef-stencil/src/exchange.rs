//! The exchange update rule and the committing [`step()`].
//!
//! Per cell, reading only the pre-step snapshot:
//!
//! ```text
//! avg_phi, avg_K  = neighbour means (own value if no neighbours)
//! phi'   = phi + (rho - 0.5(phi - avg_phi) - 0.2(K - avg_K)) · ex · hr · dt
//! g_a    = Σ_nb |phi_nb - phi| · sign(offset_a)   per axis a
//!        → g · ex · dt / n_nb
//! theta' = theta + (-(1 + 0.5|K|) · theta + tc · (rho - 1)) · dt
//! v'     = v + g · (1 + 0.3 cos theta')
//! K'     = K + kr · (rho + 0.1|phi| - K) · dt
//! ```
//!
//! `rho` is never written. Velocities accumulate across steps with no
//! damping term.

use vef_arena::{DynamicCell, MeshState, Snapshot};
use vef_core::{ExchangeParams, Field, StepError, StepId};

use crate::sentinel::check_finite;

/// Advance `state` by one time increment.
///
/// Every cell is computed from the committed snapshot into the staging
/// bank, the bank is checked for non-finite values, and only then are the
/// banks swapped. On `Err` nothing has been committed and `state` still
/// holds the pre-step values and step id.
///
/// `params` are not validated here; see
/// [`ExchangeParams::validate()`](vef_core::ExchangeParams::validate).
pub fn step(state: &mut MeshState, params: &ExchangeParams) -> Result<StepId, StepError> {
    let mut guard = state.begin_step();
    {
        let (snapshot, staging) = guard.split();
        let mesh = snapshot.mesh();
        let (nx, ny, nz) = mesh.dims();
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let cell = update_cell(&snapshot, params, i, j, k);
                    staging.write_cell(mesh.index(i, j, k), &cell);
                }
            }
        }
        check_finite(staging)?;
    }
    Ok(guard.commit())
}

/// Compute the post-step dynamic values of cell `(i, j, k)`.
///
/// Pure: depends only on `snapshot` and `params`, so cells may be
/// evaluated in any order.
pub fn update_cell(
    snapshot: &Snapshot<'_>,
    params: &ExchangeParams,
    i: usize,
    j: usize,
    k: usize,
) -> DynamicCell {
    let mesh = snapshot.mesh();
    let idx = mesh.index(i, j, k);
    let phi = snapshot.field(Field::Phi);
    let curvature = snapshot.field(Field::K);
    let rho = snapshot.rho()[idx];
    let c = snapshot.cell(idx);

    let ex = params.exchange_strength;
    let dt = params.dt;

    let nbs = mesh.neighbours(i, j, k);
    let count = nbs.len() as f64;

    let (avg_phi, avg_k) = if nbs.is_empty() {
        (c.phi, c.k)
    } else {
        let (sum_phi, sum_k) = nbs.iter().fold((0.0, 0.0), |(sp, sk), nb| {
            (sp + phi[nb.index], sk + curvature[nb.index])
        });
        (sum_phi / count, sum_k / count)
    };

    let hr = mesh.radial_factor(i, j, k, params.hr_base);
    let dphi = (rho - 0.5 * (c.phi - avg_phi) - 0.2 * (c.k - avg_k)) * ex * hr * dt;

    // Each difference keeps its magnitude and takes the sign of the offset.
    let mut g = [0.0f64; 3];
    for nb in &nbs {
        let d = phi[nb.index] - c.phi;
        g[nb.axis.index()] += d.copysign(f64::from(nb.offset));
    }
    if !nbs.is_empty() {
        let scale = ex * dt / count;
        for component in &mut g {
            *component *= scale;
        }
    }

    let omega2 = 1.0 + 0.5 * c.k.abs();
    let dtheta = -omega2 * c.theta * dt + params.theta_coupling * (rho - 1.0) * dt;
    let theta = c.theta + dtheta;

    let amplitude = 1.0 + 0.3 * theta.cos();

    let target_k = rho + 0.1 * c.phi.abs();

    DynamicCell {
        phi: c.phi + dphi,
        vx: c.vx + g[0] * amplitude,
        vy: c.vy + g[1] * amplitude,
        vz: c.vz + g[2] * amplitude,
        k: c.k + params.curvature_relax * (target_k - c.k) * dt,
        theta,
    }
}
