//! The [`Mesh3`] descriptor and its neighbour/radial geometry.

use crate::error::SpaceError;
use smallvec::SmallVec;

/// Lattice axis of a unit neighbour offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The `i` axis.
    X,
    /// The `j` axis.
    Y,
    /// The `k` axis.
    Z,
}

impl Axis {
    /// Position of the axis in `[x, y, z]` order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// An in-bounds axis-aligned neighbour of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbour {
    /// Flat index of the neighbouring cell.
    pub index: usize,
    /// Axis the offset lies on.
    pub axis: Axis,
    /// Direction of the unit offset along `axis`: `-1` or `+1`.
    pub offset: i8,
}

/// Neighbour list of a single cell; never more than six entries.
pub type Neighbours = SmallVec<[Neighbour; 6]>;

/// A regular `nx × ny × nz` mesh.
///
/// Cells are addressed either by `(i, j, k)` with `0 <= i < nx`,
/// `0 <= j < ny`, `0 <= k < nz`, or by their flat index
/// `(i·ny + j)·nz + k`. The mesh center sits at `((n - 1) / 2)` on each
/// axis, so it falls between cells on even-length axes.
///
/// # Examples
///
/// ```
/// use vef_space::Mesh3;
///
/// let mesh = Mesh3::new(4, 4, 4).unwrap();
/// assert_eq!(mesh.cell_count(), 64);
///
/// // Corner cells have only three in-bounds neighbours.
/// assert_eq!(mesh.neighbours(0, 0, 0).len(), 3);
/// assert_eq!(mesh.neighbours(1, 2, 1).len(), 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mesh3 {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl Mesh3 {
    /// Create a mesh descriptor.
    ///
    /// Returns `Err(SpaceError::EmptyAxis)` if any dimension is 0, or
    /// `Err(SpaceError::CellCountOverflow)` if the cell count does not fit
    /// in `usize`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, SpaceError> {
        for (axis, len) in [("nx", nx), ("ny", ny), ("nz", nz)] {
            if len == 0 {
                return Err(SpaceError::EmptyAxis { axis });
            }
        }
        nx.checked_mul(ny)
            .and_then(|n| n.checked_mul(nz))
            .ok_or(SpaceError::CellCountOverflow {
                dims: (nx, ny, nz),
            })?;
        Ok(Self { nx, ny, nz })
    }

    /// Length of the `i` axis.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Length of the `j` axis.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Length of the `k` axis.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// `(nx, ny, nz)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Flat index of cell `(i, j, k)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny && k < self.nz);
        (i * self.ny + j) * self.nz + k
    }

    /// Inverse of [`index()`](Mesh3::index).
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let k = index % self.nz;
        let rest = index / self.nz;
        (rest / self.ny, rest % self.ny, k)
    }

    /// Geometric center of the mesh in cell coordinates.
    pub fn center(&self) -> [f64; 3] {
        [
            (self.nx as f64 - 1.0) / 2.0,
            (self.ny as f64 - 1.0) / 2.0,
            (self.nz as f64 - 1.0) / 2.0,
        ]
    }

    /// The cell nearest the center when rounding each axis down:
    /// `(nx / 2, ny / 2, nz / 2)`.
    pub fn center_cell(&self) -> (usize, usize, usize) {
        (self.nx / 2, self.ny / 2, self.nz / 2)
    }

    /// In-bounds 6-connected neighbours of `(i, j, k)`.
    ///
    /// Order is `-x, +x, -y, +y, -z, +z`, skipping offsets that leave the
    /// mesh. Boundary cells therefore have fewer than six entries; a cell on
    /// a length-1 axis has no neighbours along it.
    pub fn neighbours(&self, i: usize, j: usize, k: usize) -> Neighbours {
        let mut out = Neighbours::new();
        if i > 0 {
            out.push(self.neighbour(i - 1, j, k, Axis::X, -1));
        }
        if i + 1 < self.nx {
            out.push(self.neighbour(i + 1, j, k, Axis::X, 1));
        }
        if j > 0 {
            out.push(self.neighbour(i, j - 1, k, Axis::Y, -1));
        }
        if j + 1 < self.ny {
            out.push(self.neighbour(i, j + 1, k, Axis::Y, 1));
        }
        if k > 0 {
            out.push(self.neighbour(i, j, k - 1, Axis::Z, -1));
        }
        if k + 1 < self.nz {
            out.push(self.neighbour(i, j, k + 1, Axis::Z, 1));
        }
        out
    }

    #[inline]
    fn neighbour(&self, i: usize, j: usize, k: usize, axis: Axis, offset: i8) -> Neighbour {
        Neighbour {
            index: self.index(i, j, k),
            axis,
            offset,
        }
    }

    /// Squared distance from `(i, j, k)` to the center, each axis divided by
    /// `max(1.0, scale · n)`.
    ///
    /// The floor of 1.0 keeps length-1 (and very short) axes from blowing
    /// up the normalised distance.
    pub fn normalized_radius_sq(&self, i: usize, j: usize, k: usize, scale: f64) -> f64 {
        let [cx, cy, cz] = self.center();
        let dx = (i as f64 - cx) / (scale * self.nx as f64).max(1.0);
        let dy = (j as f64 - cy) / (scale * self.ny as f64).max(1.0);
        let dz = (k as f64 - cz) / (scale * self.nz as f64).max(1.0);
        dx * dx + dy * dy + dz * dz
    }

    /// Radial gradient factor `hr_base · (1 + 0.3·r)`, with `r` the distance
    /// to the center normalised per axis by `max(1.0, 0.5 · n)`.
    ///
    /// Non-decreasing in `r` for non-negative `hr_base`.
    #[inline]
    pub fn radial_factor(&self, i: usize, j: usize, k: usize, hr_base: f64) -> f64 {
        let r = self.normalized_radius_sq(i, j, k, 0.5).sqrt();
        hr_base * (1.0 + 0.3 * r)
    }

    /// Euclidean distance from `(i, j, k)` to the center, in cells.
    pub fn radius(&self, i: usize, j: usize, k: usize) -> f64 {
        let [cx, cy, cz] = self.center();
        let dx = i as f64 - cx;
        let dy = j as f64 - cy;
        let dz = k as f64 - cz;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Number of radial bins used by radial profiles:
    /// `floor(min(nx, ny, nz) / 2)`.
    pub fn radial_bin_count(&self) -> usize {
        self.nx.min(self.ny).min(self.nz) / 2
    }
}
