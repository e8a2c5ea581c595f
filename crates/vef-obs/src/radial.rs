//! Radial potential profile and rotation-curve proxy.

use vef_arena::MeshState;
use vef_core::Field;

/// Radial observables of one state.
///
/// Both vectors have length `floor(min(nx, ny, nz) / 2)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadialProfile {
    /// Mean `phi` of the cells whose rounded distance from the mesh center
    /// equals the bin index. Empty bins stay 0.
    pub radial_phi: Vec<f64>,
    /// `sqrt(r · |0.5·(radial_phi[r+1] − radial_phi[r−1])|)` for interior
    /// bins `1 <= r < len − 1`; the first and last bins stay 0.
    pub vrot_proxy: Vec<f64>,
}

impl RadialProfile {
    /// Number of radial bins.
    pub fn len(&self) -> usize {
        self.radial_phi.len()
    }

    /// `true` if the mesh is too thin to hold any bin.
    pub fn is_empty(&self) -> bool {
        self.radial_phi.is_empty()
    }
}

/// Bin a distance by rounding half to even.
#[inline]
fn radial_bin(radius: f64) -> usize {
    radius.round_ties_even() as usize
}

/// Build the radial `phi` profile and rotation-curve proxy of `state`.
///
/// Cells whose rounded distance is `>= max_r` are ignored. With fewer
/// than three bins there is no interior and `vrot_proxy` is all zeros.
pub fn simple_observables(state: &MeshState) -> RadialProfile {
    let mesh = state.mesh();
    let phi = state.field(Field::Phi);
    let max_r = mesh.radial_bin_count();

    let mut radial_phi = vec![0.0; max_r];
    let mut counts = vec![0usize; max_r];
    for (idx, &value) in phi.iter().enumerate() {
        let (i, j, k) = mesh.coords(idx);
        let r = radial_bin(mesh.radius(i, j, k));
        if r < max_r {
            radial_phi[r] += value;
            counts[r] += 1;
        }
    }
    for (sum, &count) in radial_phi.iter_mut().zip(&counts) {
        if count > 0 {
            *sum /= count as f64;
        }
    }

    let mut vrot_proxy = vec![0.0; max_r];
    for r in 1..max_r.saturating_sub(1) {
        let dphi_dr = 0.5 * (radial_phi[r + 1] - radial_phi[r - 1]);
        vrot_proxy[r] = (r as f64 * dphi_dr.abs()).max(0.0).sqrt();
    }

    RadialProfile {
        radial_phi,
        vrot_proxy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vef_arena::InitialProfile;
    use vef_space::Mesh3;

    #[test]
    fn half_distances_round_to_even() {
        assert_eq!(radial_bin(0.5), 0);
        assert_eq!(radial_bin(1.5), 2);
        assert_eq!(radial_bin(2.5), 2);
        assert_eq!(radial_bin(0.866), 1);
    }

    #[test]
    fn profile_of_binned_radius_field() {
        let mesh = Mesh3::new(8, 8, 8).unwrap();
        let mut state = MeshState::new(mesh, InitialProfile::Uniform);
        for idx in 0..mesh.cell_count() {
            let (i, j, k) = mesh.coords(idx);
            state.field_mut(Field::Phi)[idx] = radial_bin(mesh.radius(i, j, k)) as f64;
        }
        let obs = simple_observables(&state);
        assert_eq!(obs.len(), 4);
        // The nearest cells sit at sqrt(0.75), so bin 0 is empty.
        assert_eq!(obs.radial_phi, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(obs.vrot_proxy[0], 0.0);
        assert!((obs.vrot_proxy[1] - 1.0).abs() < 1e-15);
        assert!((obs.vrot_proxy[2] - 2.0f64.sqrt()).abs() < 1e-15);
        assert_eq!(obs.vrot_proxy[3], 0.0);
    }

    #[test]
    fn thin_mesh_has_zero_rotation_curve() {
        let mesh = Mesh3::new(9, 9, 3).unwrap();
        let mut state = MeshState::new(mesh, InitialProfile::Gaussian);
        state.field_mut(Field::Phi).fill(2.0);
        let obs = simple_observables(&state);
        assert_eq!(obs.radial_phi, vec![2.0]);
        assert_eq!(obs.vrot_proxy, vec![0.0]);
    }

    #[test]
    fn single_axis_mesh_has_no_bins() {
        let mesh = Mesh3::new(1, 6, 6).unwrap();
        let state = MeshState::new(mesh, InitialProfile::Gaussian);
        assert!(simple_observables(&state).is_empty());
    }

    #[test]
    fn fresh_calls_return_independent_vectors() {
        let mesh = Mesh3::new(6, 6, 6).unwrap();
        let mut state = MeshState::new(mesh, InitialProfile::Gaussian);
        let first = simple_observables(&state);
        state.field_mut(Field::Phi).fill(1.0);
        let second = simple_observables(&state);
        assert!(first.radial_phi.iter().all(|&v| v == 0.0));
        assert_ne!(first, second);
    }
}
