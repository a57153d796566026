/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Harmonic lattice dynamics from POSCAR, force and BORN files

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::born::{read_born, BornCharges};
use super::dsf::mode_structure_factors;
use super::dynmat::DynamicalMatrix;
use super::engine::{BandStructure, MeshConfig, PhononEngine};
use super::errors::{PhononError, Result};
use super::force_constants::{read_force_constants, ForceConstants};
use super::force_sets::read_force_sets;
use super::form_factor::FormFactor;
use super::mesh::MeshSolution;
use crate::lattice::{LatticeVector, Primitive, PrimitiveMatrix};
use crate::structure::{build_supercell, read_poscar, Crystal, PrimitiveCell};

/// Source of the supercell force constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "path", rename_all = "snake_case")]
pub enum ForceInput {
    /// Full `N x N` phonopy `FORCE_CONSTANTS`
    ForceConstants(PathBuf),
    /// Phonopy `FORCE_SETS` displacements and forces
    ForceSets(PathBuf),
}

impl ForceInput {
    pub fn path(&self) -> &Path {
        match self {
            ForceInput::ForceConstants(path) | ForceInput::ForceSets(path) => path,
        }
    }

    /// Load the force constants of `supercell`
    pub fn load(&self, supercell: &Crystal, primitive: &PrimitiveCell) -> Result<ForceConstants> {
        debug!("Reading forces from {}", self.path().display());
        match self {
            ForceInput::ForceConstants(path) => read_force_constants(path, supercell.num_atoms()),
            ForceInput::ForceSets(path) => read_force_sets(path, supercell.num_atoms())?
                .produce_force_constants(supercell, primitive),
        }
    }
}

/// Native [`PhononEngine`] built on supercell force constants
///
/// No crystal symmetry is used anywhere: the force constants must cover the
/// whole supercell and the mesh is sampled in full.
#[derive(Debug, Clone)]
pub struct HarmonicEngine {
    primitive: PrimitiveCell,
    dynamical_matrix: DynamicalMatrix,
    symmetrization_level: u32,
    mesh: Option<MeshSolution>,
}

impl HarmonicEngine {
    pub fn new(
        supercell: &Crystal,
        primitive: PrimitiveCell,
        force_constants: ForceConstants,
        born: Option<BornCharges>,
    ) -> Result<Self> {
        let dynamical_matrix = DynamicalMatrix::new(supercell, &primitive, force_constants, born)?;
        Ok(Self {
            primitive,
            dynamical_matrix,
            symmetrization_level: 1,
            mesh: None,
        })
    }

    /// Load the unit cell, force constants and optional Born charges from disk
    pub fn from_files(
        poscar: &Path,
        forces: &ForceInput,
        born: Option<&Path>,
        multiplicity: [usize; 3],
        primitive_matrix: &PrimitiveMatrix,
    ) -> Result<Self> {
        let unit = read_poscar(poscar)?;
        let supercell = build_supercell(&unit, multiplicity)?;
        let primitive = PrimitiveCell::from_supercell(&unit, &supercell, primitive_matrix)?;
        info!(
            "Unit cell with {} atoms, {}-atom supercell, {}-atom primitive cell",
            unit.num_atoms(),
            supercell.num_atoms(),
            primitive.num_atoms()
        );

        let fc = forces.load(&supercell, &primitive)?;
        let born = match born {
            Some(path) => {
                debug!("Reading Born charges from {}", path.display());
                Some(read_born(path, primitive.num_atoms())?)
            }
            None => None,
        };

        Self::new(&supercell, primitive, fc, born)
    }

    /// Number of symmetrization sweeps applied by `symmetrize_force_constants`
    pub fn with_symmetrization_level(mut self, level: u32) -> Self {
        self.symmetrization_level = level;
        self
    }

    pub fn primitive(&self) -> &PrimitiveCell {
        &self.primitive
    }

    pub fn dynamical_matrix(&self) -> &DynamicalMatrix {
        &self.dynamical_matrix
    }

    pub fn mesh(&self) -> Option<&MeshSolution> {
        self.mesh.as_ref()
    }
}

impl PhononEngine for HarmonicEngine {
    fn symmetrize_force_constants(&mut self) -> Result<()> {
        info!(
            "Symmetrizing force constants ({} sweeps)",
            self.symmetrization_level
        );
        self.dynamical_matrix
            .force_constants_mut()
            .symmetrize(self.symmetrization_level);
        // Eigenvectors from before symmetrization are stale
        self.mesh = None;
        Ok(())
    }

    fn solve_mesh(&mut self, config: &MeshConfig) -> Result<()> {
        self.mesh = Some(MeshSolution::solve(&self.dynamical_matrix, config)?);
        Ok(())
    }

    fn band_structure(
        &self,
        start: &LatticeVector<Primitive>,
        qpoints: &[LatticeVector<Primitive>],
    ) -> Result<BandStructure> {
        let lattice = self.primitive.crystal().lattice();
        let mut previous = lattice.reciprocal_to_cartesian(&start.components());
        let mut distance = 0.0;

        let mut distances = Vec::with_capacity(qpoints.len());
        let mut frequencies = Vec::with_capacity(qpoints.len());
        for q in qpoints {
            let current = lattice.reciprocal_to_cartesian(&q.components());
            distance += current.distance(&previous);
            previous = current;

            distances.push(distance);
            frequencies.push(self.dynamical_matrix.solve(&q.components())?.frequencies);
        }

        Ok(BandStructure {
            distances,
            frequencies,
        })
    }

    fn dynamic_structure_factor(
        &self,
        qpoints: &[LatticeVector<Primitive>],
        g_point: &LatticeVector<Primitive>,
        temperature: f64,
        form_factor: &dyn FormFactor,
        freq_min: f64,
    ) -> Result<Vec<Vec<f64>>> {
        let mesh = self.mesh.as_ref().ok_or(PhononError::MeshNotSolved)?;
        let crystal = self.primitive.crystal();
        let displacements = mesh.thermal_displacement_matrices(
            self.dynamical_matrix.masses(),
            temperature,
            freq_min,
        );
        for (site, b) in crystal.sites().iter().zip(&displacements) {
            debug!(
                "{} mean-square displacement {:.6} {:.6} {:.6} Å²",
                site.symbol,
                b.get(0, 0),
                b.get(1, 1),
                b.get(2, 2)
            );
        }

        let g = g_point.components();
        qpoints
            .iter()
            .map(|q| {
                let q = q.components();
                let modes = self.dynamical_matrix.solve(&q)?;
                mode_structure_factors(
                    crystal,
                    &modes,
                    &q,
                    &g,
                    &displacements,
                    temperature,
                    form_factor,
                    freq_min,
                )
            })
            .collect()
    }
}
