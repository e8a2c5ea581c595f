//! Integration test: reference scenarios.
//!
//! Small end-to-end runs with known qualitative outcomes: no single-step
//! blow-up, no spurious growth from a flat start, and radially symmetric
//! profiles on odd meshes.

use std::collections::BTreeMap;

use vef_core::{ExchangeParams, Field};
use vef_engine::{run_simulation, RunConfig, Simulation};
use vef_obs::{max_speed, simple_observables, total_energy_like};
use vef_test_utils::{gaussian_state, state_hash, uniform_state};

// ── Single step on a 4³ Gaussian mesh ────────────────────────────

#[test]
fn one_step_energy_change_is_small() {
    let mut sim = Simulation::from_state(gaussian_state(4), ExchangeParams::default()).unwrap();
    let e0 = total_energy_like(sim.state());
    sim.step().unwrap();
    let e1 = total_energy_like(sim.state());

    assert!(e1.is_finite());
    assert!(e1 > e0, "phi is driven by a positive density");
    assert!((e1 - e0).abs() < 1e-3, "energy jumped by {}", e1 - e0);
}

// ── Zero-input stability ─────────────────────────────────────────

#[test]
fn flat_start_stays_quiet() {
    let mut sim = Simulation::from_state(uniform_state(8), ExchangeParams::default()).unwrap();
    sim.run(5, |_| {}).unwrap();
    let state = sim.state();

    // rho - 1 is exactly zero, so theta is never driven.
    assert!(state.field(Field::Theta).iter().all(|&v| v == 0.0));
    // K relaxes toward rho at 2e-4 per step.
    assert!(state.field(Field::K).iter().all(|v| v.abs() < 1e-2));
    // Only the radial factor breaks uniformity of phi, and only weakly.
    assert!(max_speed(state) < 1e-6);
}

// ── Radial symmetry on odd meshes ────────────────────────────────

#[test]
fn equal_radius_cells_agree_on_odd_mesh() {
    let mut sim = Simulation::from_state(gaussian_state(9), ExchangeParams::default()).unwrap();
    sim.run(10, |_| {}).unwrap();
    let state = sim.state();
    let mesh = state.mesh();

    // Cells related by axis flips and permutations share a key.
    let mut groups: BTreeMap<[usize; 3], Vec<f64>> = BTreeMap::new();
    for idx in 0..mesh.cell_count() {
        let (i, j, k) = mesh.coords(idx);
        let mut key = [i.abs_diff(4), j.abs_diff(4), k.abs_diff(4)];
        key.sort_unstable();
        groups.entry(key).or_default().push(state.field(Field::Phi)[idx]);
    }
    for (key, values) in &groups {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(hi - lo < 1e-12, "offsets {key:?} spread {}", hi - lo);
    }

    let obs = simple_observables(state);
    assert_eq!(obs.len(), 4);
    assert!(obs.radial_phi.iter().all(|v| v.is_finite() && *v > 0.0));
    assert!(obs.vrot_proxy.iter().all(|v| *v >= 0.0));
    assert_eq!(obs.vrot_proxy[0], 0.0);
    assert_eq!(obs.vrot_proxy[3], 0.0);
}

// ── Velocity-growth monitor ──────────────────────────────────────

#[test]
fn speed_warning_does_not_alter_dynamics() {
    let quiet = RunConfig {
        steps: 20,
        speed_warning: None,
        ..RunConfig::with_dims(6, 6, 6)
    };
    let noisy = RunConfig {
        speed_warning: Some(1e-12),
        ..quiet.clone()
    };
    let a = run_simulation(&quiet).unwrap();
    let b = run_simulation(&noisy).unwrap();
    assert_eq!(state_hash(&a.final_state), state_hash(&b.final_state));
}

#[test]
fn unknown_profile_runs_uniform() {
    let config = RunConfig {
        profile: "plateau".to_string(),
        steps: 2,
        ..RunConfig::with_dims(4, 4, 4)
    };
    let result = run_simulation(&config).unwrap();
    assert!(result.final_state.field(Field::Rho).iter().all(|&v| v == 1.0));
}
