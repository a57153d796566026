/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Real-space lattices and their reciprocal lattices

use super::errors::{LatticeError, Result};
use super::matrix::Matrix3;
use super::vector::Vector3D;

/// A crystal lattice with lattice vectors stored as rows (Å)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    vectors: Matrix3,
    inverse: Matrix3,
}

impl Lattice {
    /// Create a lattice, rejecting degenerate cells
    pub fn new(vectors: Matrix3) -> Result<Self> {
        let inverse = vectors.inverse().map_err(|_| {
            LatticeError::InvalidLattice("lattice vectors are linearly dependent".to_string())
        })?;
        Ok(Self { vectors, inverse })
    }

    /// Lattice vectors as matrix rows
    pub fn vectors(&self) -> &Matrix3 {
        &self.vectors
    }

    /// Cell volume in Å³
    pub fn volume(&self) -> f64 {
        self.vectors.determinant().abs()
    }

    /// Reciprocal lattice vectors as rows, without the 2π factor
    ///
    /// Row `k` is `b_k` with `a_i · b_k = δ_ik`.
    pub fn reciprocal(&self) -> Matrix3 {
        self.inverse.transpose()
    }

    pub fn fractional_to_cartesian(&self, fractional: &Vector3D) -> Vector3D {
        self.vectors.left_mul(fractional)
    }

    pub fn cartesian_to_fractional(&self, cartesian: &Vector3D) -> Vector3D {
        self.inverse.left_mul(cartesian)
    }

    /// Cartesian wavevector (Å⁻¹, without 2π) of reduced reciprocal coordinates
    pub fn reciprocal_to_cartesian(&self, reduced: &Vector3D) -> Vector3D {
        self.reciprocal().left_mul(reduced)
    }

    /// The lattice spanned by `M · A`, e.g. a supercell or a primitive cell
    pub fn transformed(&self, transform: &Matrix3) -> Result<Self> {
        Self::new(*transform * self.vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_lattice() {
        let lattice = Lattice::new(Matrix3::diagonal([2.0, 2.0, 2.0])).unwrap();
        assert_relative_eq!(lattice.volume(), 8.0, epsilon = 1e-12);

        let q = lattice.reciprocal_to_cartesian(&Vector3D::new(1.0, 0.0, 0.0));
        assert_relative_eq!(q.x, 0.5, epsilon = 1e-12);

        let frac = Vector3D::new(0.25, 0.5, 0.75);
        let back = lattice.cartesian_to_fractional(&lattice.fractional_to_cartesian(&frac));
        assert_relative_eq!(back.z, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_reciprocal_orthogonality() {
        let lattice = Lattice::new(Matrix3::new([
            [0.0, 2.8, 2.8],
            [2.8, 0.0, 2.8],
            [2.8, 2.8, 0.0],
        ]))
        .unwrap();
        let reciprocal = lattice.reciprocal();
        for i in 0..3 {
            for k in 0..3 {
                let expected = if i == k { 1.0 } else { 0.0 };
                assert_relative_eq!(
                    lattice.vectors().row(i).dot(&reciprocal.row(k)),
                    expected,
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_degenerate_lattice() {
        assert!(Lattice::new(Matrix3::diagonal([1.0, 0.0, 1.0])).is_err());
    }
}
