/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Linear algebra utilities using the Faer library
//!
//! Dynamical matrices are assembled as `ndarray` arrays and handed to Faer
//! for the self-adjoint eigendecomposition.

use super::errors::{Result, UtilsError};
use faer::{Mat, Side};
use ndarray::Array2;
use num_complex::Complex64;

/// Convert from ndarray::Array2<Complex64> to faer::Mat<Complex64>
pub fn ndarray_to_faer(array: &Array2<Complex64>) -> Mat<Complex64> {
    let (rows, cols) = array.dim();
    Mat::from_fn(rows, cols, |i, j| array[(i, j)])
}

/// Convert from faer::Mat<Complex64> to ndarray::Array2<Complex64>
pub fn faer_to_ndarray(matrix: &Mat<Complex64>) -> Array2<Complex64> {
    Array2::from_shape_fn((matrix.nrows(), matrix.ncols()), |(i, j)| matrix[(i, j)])
}

/// Return `(A + A†) / 2`
pub fn hermitize(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    let adjoint = matrix.t().mapv(|z| z.conj());
    (matrix + &adjoint).mapv(|z| z * 0.5)
}

/// Eigendecomposition of a Hermitian matrix
///
/// # Arguments
///
/// * `matrix` - Square Hermitian matrix. Only the lower triangle is read.
///
/// # Returns
///
/// Eigenvalues in ascending order and the matching eigenvectors stored as
/// columns.
pub fn hermitian_eigh(matrix: &Array2<Complex64>) -> Result<(Vec<f64>, Array2<Complex64>)> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(UtilsError::LinearAlgebra(format!(
            "Hermitian eigensolver needs a square matrix, got {}x{}",
            rows, cols
        )));
    }
    if matrix.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
        return Err(UtilsError::LinearAlgebra(
            "matrix contains non-finite entries".to_string(),
        ));
    }

    let evd = ndarray_to_faer(matrix)
        .self_adjoint_eigen(Side::Lower)
        .map_err(|err| UtilsError::LinearAlgebra(format!("eigendecomposition failed: {:?}", err)))?;
    let values: Vec<f64> = evd.S().column_vector().iter().map(|s| s.re).collect();
    let vectors = faer_to_ndarray(&evd.U().to_owned());

    Ok((values, vectors))
}
