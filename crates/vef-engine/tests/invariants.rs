//! Integration test: density conservation and shape invariance.
//!
//! `rho` is never written by a step, and every field keeps the mesh's
//! cell count, for any mesh and any number of steps.

use proptest::prelude::*;
use vef_core::{ExchangeParams, Field};
use vef_engine::{perturbation_growth_test, Simulation, StressConfig};
use vef_obs::field_variance;
use vef_space::Mesh3;
use vef_test_utils::{gaussian_state, random_state};

// ── Density conservation ─────────────────────────────────────────

#[test]
fn rho_bits_survive_many_steps() {
    let start = gaussian_state(7);
    let rho: Vec<u64> = start.field(Field::Rho).iter().map(|v| v.to_bits()).collect();
    let mut sim = Simulation::from_state(start, ExchangeParams::default()).unwrap();
    sim.run(60, |state| {
        let now: Vec<u64> = state.field(Field::Rho).iter().map(|v| v.to_bits()).collect();
        assert_eq!(now, rho, "rho changed at step {}", state.step_id());
    })
    .unwrap();
}

#[test]
fn perturbed_density_variance_is_constant() {
    let config = StressConfig::default();
    let report = perturbation_growth_test(&config).unwrap();
    assert_eq!(report.contrast_history.len(), 100);

    let mut initial = gaussian_state(16);
    let center = initial.mesh().index(8, 8, 8);
    initial.field_mut(Field::Rho)[center] *= 1.01;
    let expected = field_variance(&initial, Field::Rho);

    for (step, &v) in report.contrast_history.iter().enumerate() {
        assert!(v.is_finite() && v >= 0.0, "step {step}: {v}");
        assert_eq!(v, expected, "variance moved at step {step}");
    }
    assert_eq!(report.final_contrast, expected);
}

// ── Shape invariance ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fields_keep_mesh_shape(
        nx in 1usize..6,
        ny in 1usize..6,
        nz in 1usize..6,
        steps in 0usize..6,
        seed in any::<u64>(),
    ) {
        let mesh = Mesh3::new(nx, ny, nz).unwrap();
        let start = random_state(mesh, seed);
        let rho = start.field(Field::Rho).to_vec();
        let mut sim = Simulation::from_state(start, ExchangeParams::default()).unwrap();
        sim.run(steps, |_| {}).unwrap();

        prop_assert_eq!(sim.state().dims(), (nx, ny, nz));
        for field in Field::ALL {
            prop_assert_eq!(sim.state().field(field).len(), mesh.cell_count());
        }
        prop_assert_eq!(sim.state().field(Field::Rho), rho.as_slice());
        prop_assert_eq!(sim.step_id().0, steps as u64);
    }
}
