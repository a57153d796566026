/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the lattice module

use thiserror::Error;

/// Errors raised while building lattices or basis transforms
#[derive(Error, Debug)]
pub enum LatticeError {
    /// The matrix has (numerically) zero determinant
    #[error("Singular matrix: determinant {0:e}")]
    SingularMatrix(f64),

    /// Lattice vectors do not span a positive volume
    #[error("Invalid lattice: {0}")]
    InvalidLattice(String),
}

/// Result type for lattice operations
pub type Result<T> = std::result::Result<T, LatticeError>;
