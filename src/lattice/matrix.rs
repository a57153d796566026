/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Dense 3x3 real matrices
//!
//! Lattice vectors are stored as rows. Vectors act on matrices from the left
//! (`v · M`), matching how fractional coordinates and basis transforms are
//! written throughout the crate.

use super::errors::{LatticeError, Result};
use super::vector::Vector3D;
use std::ops::{Add, Mul, Neg, Sub};

/// Determinants below this magnitude are treated as singular
const SINGULAR_THRESHOLD: f64 = 1e-12;

/// A 3x3 real matrix stored row-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    rows: [[f64; 3]; 3],
}

impl Matrix3 {
    /// Create a matrix from its rows
    pub fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    pub fn zeros() -> Self {
        Self::new([[0.0; 3]; 3])
    }

    /// The identity matrix
    pub fn identity() -> Self {
        Self::diagonal([1.0, 1.0, 1.0])
    }

    /// A diagonal matrix
    pub fn diagonal(d: [f64; 3]) -> Self {
        Self::new([[d[0], 0.0, 0.0], [0.0, d[1], 0.0], [0.0, 0.0, d[2]]])
    }

    /// Row-major entries
    pub fn rows(&self) -> [[f64; 3]; 3] {
        self.rows
    }

    /// Row `i` as a vector
    pub fn row(&self, i: usize) -> Vector3D {
        Vector3D::from(self.rows[i])
    }

    /// Entry at row `i`, column `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    pub fn transpose(&self) -> Self {
        let r = &self.rows;
        Self::new([
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ])
    }

    pub fn determinant(&self) -> f64 {
        let r = &self.rows;
        r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
    }

    /// Matrix inverse via the adjugate
    ///
    /// Fails with [`LatticeError::SingularMatrix`] when the determinant is
    /// numerically zero.
    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant();
        if det.abs() < SINGULAR_THRESHOLD {
            return Err(LatticeError::SingularMatrix(det));
        }

        let r = &self.rows;
        let cofactor = |a: usize, b: usize, c: usize, d: usize| r[a][b] * r[c][d] - r[a][d] * r[c][b];
        let adjugate = [
            [cofactor(1, 1, 2, 2), -cofactor(0, 1, 2, 2), cofactor(0, 1, 1, 2)],
            [-cofactor(1, 0, 2, 2), cofactor(0, 0, 2, 2), -cofactor(0, 0, 1, 2)],
            [cofactor(1, 0, 2, 1), -cofactor(0, 0, 2, 1), cofactor(0, 0, 1, 1)],
        ];

        let mut inverse = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                inverse[i][j] = adjugate[i][j] / det;
            }
        }
        Ok(Self::new(inverse))
    }

    /// Row vector times matrix, `v · M`
    pub fn left_mul(&self, v: &Vector3D) -> Vector3D {
        let r = &self.rows;
        Vector3D::new(
            v.x * r[0][0] + v.y * r[1][0] + v.z * r[2][0],
            v.x * r[0][1] + v.y * r[1][1] + v.z * r[2][1],
            v.x * r[0][2] + v.y * r[1][2] + v.z * r[2][2],
        )
    }

    /// Matrix times column vector, `M · v`
    pub fn right_mul(&self, v: &Vector3D) -> Vector3D {
        Vector3D::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    /// Quadratic form `vᵀ · M · v`
    pub fn quadratic_form(&self, v: &Vector3D) -> f64 {
        v.dot(&self.right_mul(v))
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, other: Matrix3) -> Matrix3 {
        let mut product = [[0.0; 3]; 3];
        for (i, row) in product.iter_mut().enumerate() {
            *row = other.left_mul(&self.row(i)).to_array();
        }
        Matrix3::new(product)
    }
}

impl Add for Matrix3 {
    type Output = Matrix3;

    fn add(self, other: Matrix3) -> Matrix3 {
        let mut sum = self.rows;
        for (row, other_row) in sum.iter_mut().zip(other.rows.iter()) {
            for (value, other_value) in row.iter_mut().zip(other_row.iter()) {
                *value += other_value;
            }
        }
        Matrix3::new(sum)
    }
}

impl Sub for Matrix3 {
    type Output = Matrix3;

    fn sub(self, other: Matrix3) -> Matrix3 {
        self + (-other)
    }
}

impl Mul<f64> for Matrix3 {
    type Output = Matrix3;

    fn mul(self, scale: f64) -> Matrix3 {
        let mut scaled = self.rows;
        for value in scaled.iter_mut().flatten() {
            *value *= scale;
        }
        Matrix3::new(scaled)
    }
}

impl Neg for Matrix3 {
    type Output = Matrix3;

    fn neg(self) -> Matrix3 {
        self * -1.0
    }
}

impl From<[[f64; 3]; 3]> for Matrix3 {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::new(rows)
    }
}
