/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! The contract between the S(Q,ω) pipeline and a lattice-dynamics engine

use serde::{Deserialize, Serialize};

use super::errors::Result;
use super::form_factor::FormFactor;
use crate::lattice::{LatticeVector, Primitive};

/// Dense-mesh sampling used for the Debye-Waller factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub mesh: [usize; 3],
    /// Reduce the mesh by crystal symmetry. Debye-Waller factors need the full mesh.
    pub is_mesh_symmetry: bool,
    pub with_eigenvectors: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            mesh: [11, 11, 11],
            is_mesh_symmetry: false,
            with_eigenvectors: true,
        }
    }
}

impl MeshConfig {
    pub fn num_points(&self) -> usize {
        self.mesh.iter().product()
    }
}

/// Frequencies along a sequence of q-points
#[derive(Debug, Clone, PartialEq)]
pub struct BandStructure {
    /// Cumulative Cartesian distance from the start point, one per q-point
    pub distances: Vec<f64>,
    /// Band frequencies in THz, ascending at each q-point
    pub frequencies: Vec<Vec<f64>>,
}

/// A lattice-dynamics engine
///
/// The pipeline only talks to phonons through this trait, so tests can
/// substitute a mock. Implementations must be driven in order:
/// `symmetrize_force_constants`, then `solve_mesh`, then any number of
/// queries. [`super::PhononPropertyAdapter`] enforces that order.
pub trait PhononEngine {
    /// Impose permutation and translational symmetry on the force constants
    fn symmetrize_force_constants(&mut self) -> Result<()>;

    /// Diagonalize the dynamical matrix on a dense mesh and keep what the
    /// Debye-Waller factor needs
    fn solve_mesh(&mut self, config: &MeshConfig) -> Result<()>;

    /// Band frequencies (THz) at `qpoints`, with distances accumulated from `start`
    fn band_structure(
        &self,
        start: &LatticeVector<Primitive>,
        qpoints: &[LatticeVector<Primitive>],
    ) -> Result<BandStructure>;

    /// Per-mode dynamic structure factor at `G + q` for every q in `qpoints`
    ///
    /// Modes at or below `freq_min` (THz) get a structure factor of zero.
    fn dynamic_structure_factor(
        &self,
        qpoints: &[LatticeVector<Primitive>],
        g_point: &LatticeVector<Primitive>,
        temperature: f64,
        form_factor: &dyn FormFactor,
        freq_min: f64,
    ) -> Result<Vec<Vec<f64>>>;
}
