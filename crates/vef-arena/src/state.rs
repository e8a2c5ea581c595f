//! Mesh state, read snapshots, and the step commit guard.

use std::fmt;

use vef_core::{Field, StepId};
use vef_space::{Mesh3, SpaceError};

use crate::error::StateError;
use crate::profile::InitialProfile;

/// The six dynamic field values of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DynamicCell {
    /// Scalar potential.
    pub phi: f64,
    /// Exchange velocity, x component.
    pub vx: f64,
    /// Exchange velocity, y component.
    pub vy: f64,
    /// Exchange velocity, z component.
    pub vz: f64,
    /// Curvature proxy.
    pub k: f64,
    /// Phase-pendulum angle.
    pub theta: f64,
}

/// One bank of the six dynamic field buffers, each of length `cell_count`.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicFields {
    phi: Vec<f64>,
    vx: Vec<f64>,
    vy: Vec<f64>,
    vz: Vec<f64>,
    k: Vec<f64>,
    theta: Vec<f64>,
}

impl DynamicFields {
    /// A bank of zero-filled buffers.
    pub fn zeroed(cell_count: usize) -> Self {
        Self {
            phi: vec![0.0; cell_count],
            vx: vec![0.0; cell_count],
            vy: vec![0.0; cell_count],
            vz: vec![0.0; cell_count],
            k: vec![0.0; cell_count],
            theta: vec![0.0; cell_count],
        }
    }

    /// Assemble a bank from explicit buffers.
    ///
    /// Lengths are not checked here; [`MeshState::from_fields()`] rejects
    /// any buffer that does not match the mesh.
    pub fn from_buffers(
        phi: Vec<f64>,
        vx: Vec<f64>,
        vy: Vec<f64>,
        vz: Vec<f64>,
        k: Vec<f64>,
        theta: Vec<f64>,
    ) -> Self {
        Self {
            phi,
            vx,
            vy,
            vz,
            k,
            theta,
        }
    }

    /// Borrow a dynamic field. Returns `None` for [`Field::Rho`].
    pub fn get(&self, field: Field) -> Option<&[f64]> {
        match field {
            Field::Rho => None,
            Field::Phi => Some(&self.phi),
            Field::Vx => Some(&self.vx),
            Field::Vy => Some(&self.vy),
            Field::Vz => Some(&self.vz),
            Field::K => Some(&self.k),
            Field::Theta => Some(&self.theta),
        }
    }

    /// Mutably borrow a dynamic field. Returns `None` for [`Field::Rho`].
    pub fn get_mut(&mut self, field: Field) -> Option<&mut [f64]> {
        match field {
            Field::Rho => None,
            Field::Phi => Some(&mut self.phi),
            Field::Vx => Some(&mut self.vx),
            Field::Vy => Some(&mut self.vy),
            Field::Vz => Some(&mut self.vz),
            Field::K => Some(&mut self.k),
            Field::Theta => Some(&mut self.theta),
        }
    }

    /// Read all six values of one cell.
    #[inline]
    pub fn cell(&self, index: usize) -> DynamicCell {
        DynamicCell {
            phi: self.phi[index],
            vx: self.vx[index],
            vy: self.vy[index],
            vz: self.vz[index],
            k: self.k[index],
            theta: self.theta[index],
        }
    }

    /// Overwrite all six values of one cell.
    #[inline]
    pub fn write_cell(&mut self, index: usize, cell: &DynamicCell) {
        self.phi[index] = cell.phi;
        self.vx[index] = cell.vx;
        self.vy[index] = cell.vy;
        self.vz[index] = cell.vz;
        self.k[index] = cell.k;
        self.theta[index] = cell.theta;
    }

    /// Iterate `(field, buffer)` pairs in [`Field::DYNAMIC`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &[f64])> + '_ {
        Field::DYNAMIC
            .into_iter()
            .filter_map(move |f| self.get(f).map(|buf| (f, buf)))
    }

    fn check_shape(&self, expected: usize) -> Result<(), StateError> {
        for (field, buf) in self.iter() {
            if buf.len() != expected {
                return Err(StateError::ShapeMismatch {
                    field,
                    expected,
                    actual: buf.len(),
                });
            }
        }
        Ok(())
    }
}

/// Exclusive owner of all field data for one mesh.
///
/// Readers see `rho` plus the live bank. The staging bank is private
/// scratch for the step in progress and is never visible outside a
/// [`StepGuard`]. Equality compares the mesh, the step id and the
/// committed fields only.
#[derive(Clone)]
pub struct MeshState {
    mesh: Mesh3,
    rho: Vec<f64>,
    live: DynamicFields,
    staging: DynamicFields,
    step: StepId,
}

impl MeshState {
    /// Seed a state on `mesh` with `profile` in `rho` and zeros elsewhere.
    pub fn new(mesh: Mesh3, profile: InitialProfile) -> Self {
        let n = mesh.cell_count();
        Self {
            mesh,
            rho: profile.fill(&mesh),
            live: DynamicFields::zeroed(n),
            staging: DynamicFields::zeroed(n),
            step: StepId::default(),
        }
    }

    /// Build a state from explicit buffers.
    ///
    /// Returns `Err(StateError::ShapeMismatch)` naming the first buffer
    /// whose length differs from `mesh.cell_count()`.
    pub fn from_fields(
        mesh: Mesh3,
        rho: Vec<f64>,
        fields: DynamicFields,
    ) -> Result<Self, StateError> {
        let n = mesh.cell_count();
        if rho.len() != n {
            return Err(StateError::ShapeMismatch {
                field: Field::Rho,
                expected: n,
                actual: rho.len(),
            });
        }
        fields.check_shape(n)?;
        Ok(Self {
            mesh,
            rho,
            live: fields,
            staging: DynamicFields::zeroed(n),
            step: StepId::default(),
        })
    }

    /// The mesh descriptor.
    pub fn mesh(&self) -> &Mesh3 {
        &self.mesh
    }

    /// `(nx, ny, nz)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        self.mesh.dims()
    }

    /// Number of committed steps.
    pub fn step_id(&self) -> StepId {
        self.step
    }

    /// Borrow the committed values of `field`.
    pub fn field(&self, field: Field) -> &[f64] {
        match self.live.get(field) {
            Some(buf) => buf,
            None => &self.rho,
        }
    }

    /// Mutably borrow the committed values of `field`.
    ///
    /// Intended for drivers that perturb a state between steps; a step in
    /// progress holds the state exclusively, so this can never race one.
    pub fn field_mut(&mut self, field: Field) -> &mut [f64] {
        match self.live.get_mut(field) {
            Some(buf) => buf,
            None => &mut self.rho,
        }
    }

    /// Value of `field` at cell `(i, j, k)`.
    pub fn value(&self, field: Field, i: usize, j: usize, k: usize) -> f64 {
        self.field(field)[self.mesh.index(i, j, k)]
    }

    /// Read-only view of the committed fields.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mesh: &self.mesh,
            rho: &self.rho,
            fields: &self.live,
            step: self.step,
        }
    }

    /// Start a step.
    ///
    /// The returned guard holds the state exclusively until it is either
    /// committed or dropped.
    pub fn begin_step(&mut self) -> StepGuard<'_> {
        StepGuard { state: self }
    }
}

impl PartialEq for MeshState {
    fn eq(&self, other: &Self) -> bool {
        self.mesh == other.mesh
            && self.step == other.step
            && self.rho == other.rho
            && self.live == other.live
    }
}

impl fmt::Debug for MeshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshState")
            .field("dims", &self.mesh.dims())
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}

/// Borrowed, read-only view of a state's committed fields.
#[derive(Clone, Copy)]
pub struct Snapshot<'a> {
    mesh: &'a Mesh3,
    rho: &'a [f64],
    fields: &'a DynamicFields,
    step: StepId,
}

impl<'a> Snapshot<'a> {
    /// The mesh descriptor.
    pub fn mesh(&self) -> &'a Mesh3 {
        self.mesh
    }

    /// Step id of the committed data.
    pub fn step_id(&self) -> StepId {
        self.step
    }

    /// Values of `field`.
    pub fn field(&self, field: Field) -> &'a [f64] {
        match self.fields.get(field) {
            Some(buf) => buf,
            None => self.rho,
        }
    }

    /// Density buffer.
    pub fn rho(&self) -> &'a [f64] {
        self.rho
    }

    /// All six dynamic values of one cell.
    #[inline]
    pub fn cell(&self, index: usize) -> DynamicCell {
        self.fields.cell(index)
    }
}

/// Exclusive access to a state for the duration of one step.
///
/// [`split()`](StepGuard::split) hands out the pre-step snapshot and the
/// staging bank as disjoint borrows. [`commit()`](StepGuard::commit) is the
/// single commit point. Dropping the guard without committing discards the
/// staging bank contents and leaves the state as it was.
#[must_use = "a step is discarded unless the guard is committed"]
pub struct StepGuard<'a> {
    state: &'a mut MeshState,
}

impl StepGuard<'_> {
    /// Borrow the pre-step snapshot and the staging bank together.
    ///
    /// The staging bank holds stale data from an earlier step; the caller
    /// must overwrite every cell before committing.
    pub fn split(&mut self) -> (Snapshot<'_>, &mut DynamicFields) {
        let MeshState {
            mesh,
            rho,
            live,
            staging,
            step,
        } = &mut *self.state;
        let snapshot = Snapshot {
            mesh: &*mesh,
            rho: rho.as_slice(),
            fields: &*live,
            step: *step,
        };
        (snapshot, staging)
    }

    /// Publish the staging bank as the new live bank and return the new
    /// step id. The previous live bank becomes the next staging bank.
    pub fn commit(self) -> StepId {
        let state = self.state;
        std::mem::swap(&mut state.live, &mut state.staging);
        state.step = state.step.next();
        state.step
    }
}

/// Construct a state from dimensions and a profile name.
///
/// Unknown profile names fall back to a uniform density (see
/// [`InitialProfile::from_name`]). The only failure is an invalid mesh.
pub fn create_mesh(
    nx: usize,
    ny: usize,
    nz: usize,
    profile_name: &str,
) -> Result<MeshState, SpaceError> {
    let mesh = Mesh3::new(nx, ny, nz)?;
    if !InitialProfile::is_known_name(profile_name) {
        tracing::debug!(
            profile = profile_name,
            "unrecognised initial profile, using uniform density"
        );
    }
    Ok(MeshState::new(mesh, InitialProfile::from_name(profile_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mesh(nx: usize, ny: usize, nz: usize) -> Mesh3 {
        Mesh3::new(nx, ny, nz).unwrap()
    }

    #[test]
    fn new_state_is_zero_except_rho() {
        let s = MeshState::new(mesh(4, 4, 4), InitialProfile::Gaussian);
        assert_eq!(s.step_id(), StepId(0));
        for field in Field::DYNAMIC {
            assert!(s.field(field).iter().all(|&v| v == 0.0), "{field} not zero");
        }
        assert!(s.field(Field::Rho).iter().all(|&v| v > 0.0));
    }

    #[test]
    fn create_mesh_rejects_zero_axis() {
        assert_eq!(
            create_mesh(4, 4, 0, "gaussian").unwrap_err(),
            SpaceError::EmptyAxis { axis: "nz" }
        );
    }

    #[test]
    fn create_mesh_unknown_profile_is_uniform() {
        let s = create_mesh(3, 3, 3, "no-such-profile").unwrap();
        assert!(s.field(Field::Rho).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn from_fields_reports_mismatched_buffer() {
        let m = mesh(2, 2, 2);
        let mut fields = DynamicFields::zeroed(8);
        fields.k = vec![0.0; 7];
        let err = MeshState::from_fields(m, vec![1.0; 8], fields).unwrap_err();
        assert_eq!(
            err,
            StateError::ShapeMismatch {
                field: Field::K,
                expected: 8,
                actual: 7,
            }
        );

        let err = MeshState::from_fields(m, vec![1.0; 9], DynamicFields::zeroed(8)).unwrap_err();
        assert!(matches!(
            err,
            StateError::ShapeMismatch {
                field: Field::Rho,
                ..
            }
        ));
    }

    #[test]
    fn commit_swaps_banks_and_advances_step() {
        let mut s = MeshState::new(mesh(2, 2, 2), InitialProfile::Uniform);
        let mut guard = s.begin_step();
        {
            let (snap, staging) = guard.split();
            for idx in 0..snap.mesh().cell_count() {
                let mut cell = snap.cell(idx);
                cell.phi = idx as f64;
                staging.write_cell(idx, &cell);
            }
        }
        assert_eq!(guard.commit(), StepId(1));
        assert_eq!(s.step_id(), StepId(1));
        assert_eq!(s.value(Field::Phi, 1, 1, 1), 7.0);
    }

    #[test]
    fn dropped_guard_leaves_state_untouched() {
        let mut s = MeshState::new(mesh(3, 3, 3), InitialProfile::Gaussian);
        let before = s.clone();
        {
            let mut guard = s.begin_step();
            let (_, staging) = guard.split();
            staging.get_mut(Field::Phi).unwrap().fill(99.0);
        }
        assert_eq!(s, before);
        assert!(s.field(Field::Phi).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn field_mut_reaches_rho_and_dynamic_banks() {
        let mut s = MeshState::new(mesh(2, 2, 2), InitialProfile::Uniform);
        s.field_mut(Field::Rho)[0] = 3.0;
        s.field_mut(Field::Theta)[1] = -1.0;
        assert_eq!(s.value(Field::Rho, 0, 0, 0), 3.0);
        assert_eq!(s.value(Field::Theta, 0, 0, 1), -1.0);
    }

    #[test]
    fn equality_ignores_staging_contents() {
        let mut a = MeshState::new(mesh(2, 2, 2), InitialProfile::Uniform);
        let b = a.clone();
        {
            let mut guard = a.begin_step();
            let (_, staging) = guard.split();
            staging.write_cell(0, &DynamicCell { phi: 5.0, ..Default::default() });
        }
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn commits_preserve_shape(nx in 1usize..5, ny in 1usize..5, nz in 1usize..5, steps in 0usize..4) {
            let m = mesh(nx, ny, nz);
            let mut s = MeshState::new(m, InitialProfile::Gaussian);
            for _ in 0..steps {
                let mut guard = s.begin_step();
                {
                    let (snap, staging) = guard.split();
                    for idx in 0..m.cell_count() {
                        let cell = snap.cell(idx);
                        staging.write_cell(idx, &cell);
                    }
                }
                let _ = guard.commit();
            }
            prop_assert_eq!(s.step_id(), StepId(steps as u64));
            for field in Field::ALL {
                prop_assert_eq!(s.field(field).len(), m.cell_count());
            }
        }
    }
}
