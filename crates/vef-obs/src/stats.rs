//! Per-field summary statistics.

use vef_arena::MeshState;
use vef_core::Field;

/// Arithmetic mean of `field` over all cells.
pub fn field_mean(state: &MeshState, field: Field) -> f64 {
    let values = state.field(field);
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance of `field` over all cells.
pub fn field_variance(state: &MeshState, field: Field) -> f64 {
    let values = state.field(field);
    let mean = field_mean(state, field);
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
}

/// Largest `sqrt(vx² + vy² + vz²)` over all cells.
pub fn max_speed(state: &MeshState) -> f64 {
    let vx = state.field(Field::Vx);
    let vy = state.field(Field::Vy);
    let vz = state.field(Field::Vz);
    vx.iter()
        .zip(vy)
        .zip(vz)
        .map(|((x, y), z)| (x * x + y * y + z * z).sqrt())
        .fold(0.0, f64::max)
}
