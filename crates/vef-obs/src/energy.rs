//! The energy-like drift monitor.

use vef_arena::MeshState;
use vef_core::Field;

/// `Σ rho·(0.5·|v|² + 0.5·phi²) + 0.1·K²` over every cell.
///
/// Not a conserved quantity of the update rule; used to watch drift.
pub fn total_energy_like(state: &MeshState) -> f64 {
    let rho = state.field(Field::Rho);
    let phi = state.field(Field::Phi);
    let vx = state.field(Field::Vx);
    let vy = state.field(Field::Vy);
    let vz = state.field(Field::Vz);
    let k = state.field(Field::K);

    let mut total = 0.0;
    for idx in 0..rho.len() {
        let v2 = vx[idx] * vx[idx] + vy[idx] * vy[idx] + vz[idx] * vz[idx];
        total += rho[idx] * (0.5 * v2 + 0.5 * phi[idx] * phi[idx]) + 0.1 * k[idx] * k[idx];
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use vef_arena::{DynamicFields, InitialProfile};
    use vef_space::Mesh3;

    #[test]
    fn fresh_state_has_zero_energy() {
        let mesh = Mesh3::new(4, 4, 4).unwrap();
        let state = MeshState::new(mesh, InitialProfile::Gaussian);
        assert_eq!(total_energy_like(&state), 0.0);
    }

    #[test]
    fn two_cell_closed_form() {
        let mesh = Mesh3::new(2, 1, 1).unwrap();
        let fields = DynamicFields::from_buffers(
            vec![2.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 3.0],
            vec![2.0, 0.0],
            vec![0.0, 10.0],
            vec![0.7, -0.7],
        );
        let state = MeshState::from_fields(mesh, vec![0.5, 2.0], fields).unwrap();
        // cell 0: 0.5 · (0.5·5 + 0.5·4) = 2.25
        // cell 1: 2.0 · (0.5·9) + 0.1·100 = 19.0
        assert!((total_energy_like(&state) - 21.25).abs() < 1e-12);
    }
}
