//! Reusable mesh state fixtures.
//!
//! Constructors panic on invalid dimensions; they are for tests only.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use vef_arena::{DynamicFields, InitialProfile, MeshState};
use vef_space::Mesh3;

/// An `n × n × n` mesh.
pub fn cube(n: usize) -> Mesh3 {
    Mesh3::new(n, n, n).expect("fixture mesh must have non-zero axes")
}

/// Gaussian density on an `n³` mesh, all other fields zero.
pub fn gaussian_state(n: usize) -> MeshState {
    MeshState::new(cube(n), InitialProfile::Gaussian)
}

/// `rho = 1` on an `n³` mesh, all other fields zero.
pub fn uniform_state(n: usize) -> MeshState {
    MeshState::new(cube(n), InitialProfile::Uniform)
}

/// A state with every field drawn from a seeded ChaCha8 stream.
///
/// `rho` is in `[0.5, 1.5)`, `theta` in `[-π, π)`, the rest in
/// `[-0.5, 0.5)`. The same `(mesh, seed)` always yields the same state.
pub fn random_state(mesh: Mesh3, seed: u64) -> MeshState {
    let n = mesh.cell_count();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut draw = |lo: f64, hi: f64| -> Vec<f64> {
        (0..n).map(|_| rng.random_range(lo..hi)).collect()
    };
    let rho = draw(0.5, 1.5);
    let fields = DynamicFields::from_buffers(
        draw(-0.5, 0.5),
        draw(-0.5, 0.5),
        draw(-0.5, 0.5),
        draw(-0.5, 0.5),
        draw(-0.5, 0.5),
        draw(-std::f64::consts::PI, std::f64::consts::PI),
    );
    MeshState::from_fields(mesh, rho, fields).expect("fixture buffers match the mesh")
}
