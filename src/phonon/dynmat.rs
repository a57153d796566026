/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Dynamical matrix assembled from supercell force constants

use std::f64::consts::PI;

use log::debug;
use ndarray::Array2;
use num_complex::Complex64;

use super::born::BornCharges;
use super::errors::{PhononError, Result};
use super::force_constants::ForceConstants;
use crate::lattice::{Lattice, Matrix3, Vector3D};
use crate::structure::supercell::SYMPREC;
use crate::structure::{Crystal, PrimitiveCell};
use crate::utils::eigenvalue_to_thz;
use crate::utils::linear_algebra::{hermitian_eigh, hermitize};

/// Normal modes at one wavevector
#[derive(Debug, Clone)]
pub struct PhononModes {
    /// Frequencies in THz, ascending
    pub frequencies: Vec<f64>,
    /// Mass-weighted polarization vectors stored as columns, `3 * atom + axis` rows
    pub eigenvectors: Array2<Complex64>,
}

/// Dynamical matrix D(q) of a primitive cell
#[derive(Debug, Clone)]
pub struct DynamicalMatrix {
    primitive_lattice: Lattice,
    p2s: Vec<usize>,
    s2p: Vec<usize>,
    masses: Vec<f64>,
    force_constants: ForceConstants,
    born: Option<BornCharges>,
    /// Shortest supercell images of `l` seen from `p2s[i]`, indexed `[i][l]`,
    /// in primitive fractional coordinates
    shortest_vectors: Vec<Vec<Vec<Vector3D>>>,
}

impl DynamicalMatrix {
    pub fn new(
        supercell: &Crystal,
        primitive: &PrimitiveCell,
        force_constants: ForceConstants,
        born: Option<BornCharges>,
    ) -> Result<Self> {
        if force_constants.num_atoms() != supercell.num_atoms() {
            return Err(PhononError::InvalidForceConstants(format!(
                "force constants cover {} atoms but the supercell has {}",
                force_constants.num_atoms(),
                supercell.num_atoms()
            )));
        }
        if let Some(born) = &born {
            if born.charges().len() != primitive.num_atoms() {
                return Err(PhononError::InvalidBorn(format!(
                    "{} Born charge tensors for {} primitive-cell atoms",
                    born.charges().len(),
                    primitive.num_atoms()
                )));
            }
        }

        let primitive_lattice = *primitive.crystal().lattice();
        let shortest_vectors = primitive
            .p2s()
            .iter()
            .map(|&origin| {
                (0..supercell.num_atoms())
                    .map(|target| {
                        shortest_images(supercell, origin, target)
                            .iter()
                            .map(|r| primitive_lattice.cartesian_to_fractional(r))
                            .collect()
                    })
                    .collect()
            })
            .collect();
        debug!(
            "Dynamical matrix for {} primitive atoms in a {}-atom supercell",
            primitive.num_atoms(),
            supercell.num_atoms()
        );

        Ok(Self {
            primitive_lattice,
            p2s: primitive.p2s().to_vec(),
            s2p: primitive.s2p().to_vec(),
            masses: primitive.crystal().masses(),
            force_constants,
            born,
            shortest_vectors,
        })
    }

    pub fn num_bands(&self) -> usize {
        3 * self.p2s.len()
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn force_constants(&self) -> &ForceConstants {
        &self.force_constants
    }

    pub fn force_constants_mut(&mut self) -> &mut ForceConstants {
        &mut self.force_constants
    }

    /// Hermitian D(q) for a wavevector in primitive reduced coordinates
    pub fn matrix(&self, q: &Vector3D) -> Array2<Complex64> {
        let n = self.p2s.len();
        let cells = (self.s2p.len() / n) as f64;
        let nac = self.born.as_ref().and_then(|born| {
            born.wang_correction(
                &self.primitive_lattice.reciprocal_to_cartesian(q),
                self.primitive_lattice.volume(),
            )
        });

        let mut dm = Array2::<Complex64>::zeros((3 * n, 3 * n));
        for (i, &origin) in self.p2s.iter().enumerate() {
            for (l, &j) in self.s2p.iter().enumerate() {
                let images = &self.shortest_vectors[i][l];
                let phase: Complex64 = images
                    .iter()
                    .map(|r| Complex64::from_polar(1.0, 2.0 * PI * q.dot(r)))
                    .sum::<Complex64>()
                    / images.len() as f64;

                let mut block: Matrix3 = *self.force_constants.get(origin, l);
                if let Some(nac) = &nac {
                    block = block + nac[i * n + j] * (1.0 / cells);
                }

                let coefficient = phase / (self.masses[i] * self.masses[j]).sqrt();
                for alpha in 0..3 {
                    for beta in 0..3 {
                        dm[(3 * i + alpha, 3 * j + beta)] += coefficient * block.get(alpha, beta);
                    }
                }
            }
        }

        hermitize(&dm)
    }

    /// Diagonalize D(q)
    pub fn solve(&self, q: &Vector3D) -> Result<PhononModes> {
        let (eigenvalues, eigenvectors) = hermitian_eigh(&self.matrix(q))?;
        Ok(PhononModes {
            frequencies: eigenvalues.into_iter().map(eigenvalue_to_thz).collect(),
            eigenvectors,
        })
    }
}

/// Cartesian vectors from `origin` to every equally-short periodic image of `target`
fn shortest_images(supercell: &Crystal, origin: usize, target: usize) -> Vec<Vector3D> {
    let lattice = supercell.lattice();
    let delta = supercell.site(target).position - supercell.site(origin).position;
    let reduced = delta - delta.round();

    let mut candidates = Vec::with_capacity(27);
    for i in -1..=1 {
        for j in -1..=1 {
            for k in -1..=1 {
                let shift = Vector3D::new(i as f64, j as f64, k as f64);
                candidates.push(lattice.fractional_to_cartesian(&(reduced + shift)));
            }
        }
    }

    let shortest = candidates
        .iter()
        .map(Vector3D::length)
        .fold(f64::INFINITY, f64::min);
    candidates
        .into_iter()
        .filter(|r| r.length() - shortest < SYMPREC)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::PrimitiveMatrix;
    use crate::structure::{build_supercell, Site};
    use approx::assert_relative_eq;

    fn chain_model(k: f64) -> DynamicalMatrix {
        // Simple cubic, one atom, nearest-neighbour springs along every axis
        let lattice = Lattice::new(Matrix3::diagonal([2.0, 2.0, 2.0])).unwrap();
        let unit = Crystal::new(lattice, vec![Site::new("Ar", Vector3D::origin()).unwrap()]).unwrap();
        let supercell = build_supercell(&unit, [3, 3, 3]).unwrap();
        let primitive =
            PrimitiveCell::from_supercell(&unit, &supercell, &PrimitiveMatrix::identity()).unwrap();

        let n = supercell.num_atoms();
        let mut blocks = vec![Matrix3::zeros(); n * n];
        for a in 0..n {
            blocks[a * n + a] = Matrix3::diagonal([2.0 * k, 2.0 * k, 2.0 * k]);
            for b in 0..n {
                let delta = supercell.site(b).position - supercell.site(a).position;
                let delta = delta - delta.round();
                for axis in 0..3 {
                    let others = (0..3).filter(|&x| x != axis).all(|x| delta[x].abs() < 1e-9);
                    if others && (delta[axis].abs() - 1.0 / 3.0).abs() < 1e-9 {
                        let mut d = [0.0; 3];
                        d[axis] = -k;
                        blocks[a * n + b] = blocks[a * n + b] + Matrix3::diagonal(d);
                    }
                }
            }
        }
        let fc = ForceConstants::new(n, blocks).unwrap();
        DynamicalMatrix::new(&supercell, &primitive, fc, None).unwrap()
    }

    #[test]
    fn test_acoustic_modes_vanish_at_gamma() {
        let dm = chain_model(1.0);
        let modes = dm.solve(&Vector3D::origin()).unwrap();
        for f in modes.frequencies {
            assert_relative_eq!(f, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_nearest_neighbour_dispersion() {
        let k = 1.5;
        let dm = chain_model(k);
        let mass = dm.masses()[0];
        let q = Vector3D::new(1.0 / 3.0, 0.0, 0.0);
        let modes = dm.solve(&q).unwrap();

        let longitudinal = (2.0 * k / mass * (1.0 - (2.0 * PI / 3.0).cos())).sqrt();
        let expected = longitudinal * crate::utils::constants::EV_ANGSTROM_AMU_TO_THZ;
        assert_relative_eq!(modes.frequencies[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(modes.frequencies[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(modes.frequencies[2], expected, max_relative = 1e-8);
    }

    #[test]
    fn test_rejects_mismatched_force_constants() {
        let dm = chain_model(1.0);
        let fc = ForceConstants::new(1, vec![Matrix3::zeros()]).unwrap();
        let lattice = Lattice::new(Matrix3::diagonal([2.0, 2.0, 2.0])).unwrap();
        let unit = Crystal::new(lattice, vec![Site::new("Ar", Vector3D::origin()).unwrap()]).unwrap();
        let supercell = build_supercell(&unit, [2, 1, 1]).unwrap();
        let primitive =
            PrimitiveCell::from_supercell(&unit, &supercell, &PrimitiveMatrix::identity()).unwrap();
        assert_eq!(dm.num_bands(), 3);
        assert!(DynamicalMatrix::new(&supercell, &primitive, fc, None).is_err());
    }
}
