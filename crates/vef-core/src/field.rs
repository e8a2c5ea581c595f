//! The seven per-cell fields and their identities.

use std::fmt;

/// Identifies one of the seven scalar fields stored per mesh cell.
///
/// `rho` is the only static field: it is written at construction and never
/// touched by the updater. The remaining six are dynamic and are replaced
/// as a unit on every committed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Effective density (source term).
    Rho,
    /// Scalar potential.
    Phi,
    /// Exchange velocity, x component.
    Vx,
    /// Exchange velocity, y component.
    Vy,
    /// Exchange velocity, z component.
    Vz,
    /// Curvature proxy.
    K,
    /// Phase-pendulum angle.
    Theta,
}

impl Field {
    /// All seven fields in storage order.
    pub const ALL: [Field; 7] = [
        Field::Rho,
        Field::Phi,
        Field::Vx,
        Field::Vy,
        Field::Vz,
        Field::K,
        Field::Theta,
    ];

    /// The six fields rewritten by every step, in storage order.
    pub const DYNAMIC: [Field; 6] = [
        Field::Phi,
        Field::Vx,
        Field::Vy,
        Field::Vz,
        Field::K,
        Field::Theta,
    ];

    /// Short lowercase name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rho => "rho",
            Self::Phi => "phi",
            Self::Vx => "vx",
            Self::Vy => "vy",
            Self::Vz => "vz",
            Self::K => "K",
            Self::Theta => "theta",
        }
    }

    /// Returns `true` for every field except `rho`.
    pub fn is_dynamic(self) -> bool {
        !matches!(self, Self::Rho)
    }

    /// Position of this field in [`Field::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
