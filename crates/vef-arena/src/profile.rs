//! Initial density profiles.

use vef_space::Mesh3;

/// Shape of the density field a new mesh is seeded with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InitialProfile {
    /// `rho = exp(-r²)`, `r` normalised per axis by `max(1.0, 0.3 · n)`.
    #[default]
    Gaussian,
    /// `rho = 1.0` everywhere.
    Uniform,
}

impl InitialProfile {
    /// Resolve a profile by name.
    ///
    /// Only `"gaussian"` is recognised. Every other name, including the
    /// empty string, resolves to [`InitialProfile::Uniform`]: unknown names
    /// are a permissive fallback, never an error.
    pub fn from_name(name: &str) -> Self {
        match name {
            "gaussian" => Self::Gaussian,
            _ => Self::Uniform,
        }
    }

    /// Returns `true` if `name` selects a profile explicitly rather than
    /// through the uniform fallback.
    pub fn is_known_name(name: &str) -> bool {
        matches!(name, "gaussian" | "uniform")
    }

    /// Canonical name of the profile.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
            Self::Uniform => "uniform",
        }
    }

    /// Density of cell `(i, j, k)` under this profile.
    pub fn density(self, mesh: &Mesh3, i: usize, j: usize, k: usize) -> f64 {
        match self {
            Self::Gaussian => (-mesh.normalized_radius_sq(i, j, k, 0.3)).exp(),
            Self::Uniform => 1.0,
        }
    }

    /// Build a full density buffer for `mesh` in flat index order.
    pub fn fill(self, mesh: &Mesh3) -> Vec<f64> {
        (0..mesh.cell_count())
            .map(|idx| {
                let (i, j, k) = mesh.coords(idx);
                self.density(mesh, i, j, k)
            })
            .collect()
    }
}
