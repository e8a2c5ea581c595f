//! FNV-1a hashing of mesh state for bit-exact comparisons.
//!
//! Not cryptographic; only used to compare runs.

use vef_arena::MeshState;
use vef_core::Field;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash the dimensions, step id and all seven fields of `state`.
///
/// Fields are visited in [`Field::ALL`] order with the field index folded
/// in at each boundary, and values are hashed via `f64::to_bits()`, so
/// two states hash equal only if they are bit-identical.
pub fn state_hash(state: &MeshState) -> u64 {
    let (nx, ny, nz) = state.dims();
    let mut hash = FNV_OFFSET;
    for d in [nx, ny, nz] {
        hash = fnv1a_u64(hash, d as u64);
    }
    hash = fnv1a_u64(hash, state.step_id().0);
    for field in Field::ALL {
        hash = fnv1a_u64(hash, field.index() as u64);
        for &v in state.field(field) {
            hash = fnv1a_u64(hash, v.to_bits());
        }
    }
    hash
}
