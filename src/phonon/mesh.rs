/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Dense Γ-centred mesh and the thermal displacement matrices derived from it

use std::f64::consts::PI;

use log::info;

use super::dynmat::{DynamicalMatrix, PhononModes};
use super::engine::MeshConfig;
use super::errors::{PhononError, Result};
use crate::lattice::{Matrix3, Vector3D};
use crate::utils::bose_einstein;
use crate::utils::constants::{AMU_SI, ANGSTROM2_PER_M2, HBAR_SI};

/// Reduced wavevectors `n / mesh` of a Γ-centred grid, first axis fastest
pub fn mesh_points(mesh: [usize; 3]) -> Vec<Vector3D> {
    let [na, nb, nc] = mesh;
    let mut points = Vec::with_capacity(na * nb * nc);
    for k in 0..nc {
        for j in 0..nb {
            for i in 0..na {
                points.push(Vector3D::new(
                    i as f64 / na as f64,
                    j as f64 / nb as f64,
                    k as f64 / nc as f64,
                ));
            }
        }
    }
    points
}

/// Normal modes on every mesh point
#[derive(Debug, Clone)]
pub struct MeshSolution {
    mesh: [usize; 3],
    qpoints: Vec<Vector3D>,
    modes: Vec<PhononModes>,
}

impl MeshSolution {
    pub fn solve(dynamical_matrix: &DynamicalMatrix, config: &MeshConfig) -> Result<Self> {
        if config.mesh.iter().any(|&n| n == 0) {
            return Err(PhononError::InvalidMesh(format!(
                "mesh must be positive along every axis, got {:?}",
                config.mesh
            )));
        }
        if config.is_mesh_symmetry {
            return Err(PhononError::InvalidMesh(
                "Debye-Waller factors need the full mesh, disable mesh symmetry".to_string(),
            ));
        }
        if !config.with_eigenvectors {
            return Err(PhononError::InvalidMesh(
                "Debye-Waller factors need mesh eigenvectors".to_string(),
            ));
        }

        let qpoints = mesh_points(config.mesh);
        info!(
            "Solving {} q-points on a {:?} mesh",
            qpoints.len(),
            config.mesh
        );
        let modes = qpoints
            .iter()
            .map(|q| dynamical_matrix.solve(q))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            mesh: config.mesh,
            qpoints,
            modes,
        })
    }

    pub fn mesh(&self) -> [usize; 3] {
        self.mesh
    }

    pub fn qpoints(&self) -> &[Vector3D] {
        &self.qpoints
    }

    pub fn modes(&self) -> &[PhononModes] {
        &self.modes
    }

    /// Mean-square displacement tensors B_j (Å²) of each primitive atom at `temperature`
    ///
    /// Modes at or below `freq_min` (THz) are skipped.
    pub fn thermal_displacement_matrices(
        &self,
        masses: &[f64],
        temperature: f64,
        freq_min: f64,
    ) -> Vec<Matrix3> {
        let mut accumulated = vec![[[0.0f64; 3]; 3]; masses.len()];

        for modes in &self.modes {
            for (band, &frequency) in modes.frequencies.iter().enumerate() {
                if frequency <= freq_min {
                    continue;
                }
                let omega = 2.0 * PI * frequency * 1.0e12;
                let occupation = 2.0 * bose_einstein(frequency, temperature) + 1.0;
                let eigenvector = modes.eigenvectors.column(band);

                for (atom, (&mass, b)) in masses.iter().zip(accumulated.iter_mut()).enumerate() {
                    let amplitude =
                        HBAR_SI * occupation / (2.0 * mass * AMU_SI * omega) * ANGSTROM2_PER_M2;
                    for (alpha, row) in b.iter_mut().enumerate() {
                        for (beta, value) in row.iter_mut().enumerate() {
                            let product = eigenvector[3 * atom + alpha]
                                * eigenvector[3 * atom + beta].conj();
                            *value += amplitude * product.re;
                        }
                    }
                }
            }
        }

        let scale = 1.0 / self.qpoints.len() as f64;
        accumulated
            .into_iter()
            .map(|b| Matrix3::new(b) * scale)
            .collect()
    }
}
