/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Supercell and primitive-cell construction
//!
//! The supercell follows the atom ordering of `FORCE_CONSTANTS` files written
//! by phonopy: all images of unit-cell atom 0 first, then atom 1, and so on,
//! with the x translation running fastest. The primitive cell is carved out
//! of the supercell so that every supercell atom maps onto one primitive atom.

use super::crystal::{Crystal, Site};
use super::errors::{Result, StructureError};
use crate::lattice::{Matrix3, PrimitiveMatrix, Vector3D};

/// Positions closer than this (Å) are the same site
pub const SYMPREC: f64 = 1e-5;

/// Build a diagonal supercell of `unit`
pub fn build_supercell(unit: &Crystal, multiplicity: [usize; 3]) -> Result<Crystal> {
    if multiplicity.iter().any(|&n| n == 0) {
        return Err(StructureError::InvalidStructure(format!(
            "supercell multiplicity must be positive, got {:?}",
            multiplicity
        )));
    }

    let [na, nb, nc] = multiplicity;
    let scale = Matrix3::diagonal([na as f64, nb as f64, nc as f64]);
    let lattice = unit.lattice().transformed(&scale)?;

    let mut sites = Vec::with_capacity(unit.num_atoms() * na * nb * nc);
    for site in unit.sites() {
        for k in 0..nc {
            for j in 0..nb {
                for i in 0..na {
                    let position = Vector3D::new(
                        (site.position.x + i as f64) / na as f64,
                        (site.position.y + j as f64) / nb as f64,
                        (site.position.z + k as f64) / nc as f64,
                    );
                    sites.push(Site {
                        position,
                        ..site.clone()
                    });
                }
            }
        }
    }

    Crystal::new(lattice, sites)
}

/// A primitive cell together with its mapping onto a supercell
#[derive(Debug, Clone)]
pub struct PrimitiveCell {
    crystal: Crystal,
    p2s: Vec<usize>,
    s2p: Vec<usize>,
}

impl PrimitiveCell {
    /// Carve the primitive cell `Pᵀ · A_unit` out of `supercell`
    ///
    /// # Arguments
    ///
    /// * `unit` - The unit cell the supercell was built from
    /// * `supercell` - Supercell of `unit`
    /// * `matrix` - Primitive matrix relative to `unit`
    ///
    /// # Returns
    ///
    /// The primitive cell, or an error when the supercell atoms do not fold
    /// onto `n_unit · |det P|` primitive sites.
    pub fn from_supercell(
        unit: &Crystal,
        supercell: &Crystal,
        matrix: &PrimitiveMatrix,
    ) -> Result<Self> {
        let lattice = unit.lattice().transformed(&matrix.matrix().transpose())?;

        let expected = unit.num_atoms() as f64 * matrix.volume_ratio();
        if (expected - expected.round()).abs() > 1e-6 || expected.round() < 1.0 {
            return Err(StructureError::InvalidStructure(format!(
                "primitive matrix gives a non-integer atom count {:.4}",
                expected
            )));
        }
        let expected = expected.round() as usize;

        let mut p2s: Vec<usize> = Vec::with_capacity(expected);
        let mut sites: Vec<Site> = Vec::with_capacity(expected);
        let mut s2p = Vec::with_capacity(supercell.num_atoms());

        for (s, site) in supercell.sites().iter().enumerate() {
            let cartesian = supercell.cartesian_position(s);
            let fractional = lattice.cartesian_to_fractional(&cartesian);

            let found = sites.iter().position(|primitive| {
                let delta = fractional - primitive.position;
                let residual = lattice.fractional_to_cartesian(&(delta - delta.round()));
                residual.length() < SYMPREC
            });

            match found {
                Some(p) => {
                    if sites[p].symbol != site.symbol {
                        return Err(StructureError::InvalidStructure(format!(
                            "supercell atom {} ({}) overlaps primitive site {} ({})",
                            s, site.symbol, p, sites[p].symbol
                        )));
                    }
                    s2p.push(p);
                }
                None => {
                    s2p.push(sites.len());
                    p2s.push(s);
                    sites.push(Site {
                        position: wrap_fractional(&fractional),
                        ..site.clone()
                    });
                }
            }
        }

        if sites.len() != expected {
            return Err(StructureError::InvalidStructure(format!(
                "primitive matrix folds the supercell onto {} sites, expected {}",
                sites.len(),
                expected
            )));
        }

        Ok(Self {
            crystal: Crystal::new(lattice, sites)?,
            p2s,
            s2p,
        })
    }

    pub fn crystal(&self) -> &Crystal {
        &self.crystal
    }

    /// Supercell index of each primitive atom
    pub fn p2s(&self) -> &[usize] {
        &self.p2s
    }

    /// Primitive index of each supercell atom
    pub fn s2p(&self) -> &[usize] {
        &self.s2p
    }

    pub fn num_atoms(&self) -> usize {
        self.p2s.len()
    }

    /// Number of primitive cells contained in the supercell
    pub fn cells_in_supercell(&self) -> usize {
        self.s2p.len() / self.p2s.len()
    }
}

/// Wrap fractional coordinates into [0, 1)
fn wrap_fractional(v: &Vector3D) -> Vector3D {
    let wrap = |x: f64| {
        let w = x - x.floor();
        if (1.0 - w).abs() < 1e-10 {
            0.0
        } else {
            w
        }
    };
    Vector3D::new(wrap(v.x), wrap(v.y), wrap(v.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;

    fn rocksalt() -> Crystal {
        let lattice = Lattice::new(Matrix3::diagonal([5.69, 5.69, 5.69])).unwrap();
        let na = [[0.0, 0.0, 0.0], [0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]];
        let cl = [[0.5, 0.5, 0.5], [0.5, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.5]];
        let mut sites = Vec::new();
        for p in na {
            sites.push(Site::new("Na", Vector3D::from(p)).unwrap());
        }
        for p in cl {
            sites.push(Site::new("Cl", Vector3D::from(p)).unwrap());
        }
        Crystal::new(lattice, sites).unwrap()
    }

    #[test]
    fn test_supercell_ordering() {
        let unit = rocksalt();
        let supercell = build_supercell(&unit, [2, 2, 2]).unwrap();
        assert_eq!(supercell.num_atoms(), 64);

        // The x translation runs fastest
        assert!((supercell.site(1).position.x - 0.5).abs() < 1e-12);
        assert!((supercell.site(2).position.y - 0.5).abs() < 1e-12);
        assert_eq!(supercell.site(8).symbol, "Na");
        assert_eq!(supercell.site(32).symbol, "Cl");
    }

    #[test]
    fn test_fcc_primitive_cell() {
        let unit = rocksalt();
        let supercell = build_supercell(&unit, [2, 2, 2]).unwrap();
        let primitive =
            PrimitiveCell::from_supercell(&unit, &supercell, &PrimitiveMatrix::fcc()).unwrap();

        assert_eq!(primitive.num_atoms(), 2);
        assert_eq!(primitive.cells_in_supercell(), 32);
        assert_eq!(primitive.crystal().symbols(), vec!["Na", "Cl"]);
        assert_eq!(primitive.p2s(), &[0, 32]);
        assert!(primitive.s2p()[..32].iter().all(|&p| p == 0));
        assert!(primitive.s2p()[32..].iter().all(|&p| p == 1));
        assert!(
            (primitive.crystal().lattice().volume() - 5.69f64.powi(3) / 4.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_zero_multiplicity() {
        assert!(build_supercell(&rocksalt(), [2, 0, 2]).is_err());
    }
}
