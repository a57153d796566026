/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Lattice geometry
//!
//! Vectors, 3x3 matrices, the conventional/primitive basis mapping and
//! real-space lattices with their reciprocal lattices.

pub mod basis;
pub mod cell;
pub mod errors;
pub mod matrix;
pub mod vector;

pub use basis::{
    to_conventional, to_primitive, Basis, Conventional, LatticeVector, Primitive, PrimitiveMatrix,
};
pub use cell::Lattice;
pub use errors::{LatticeError, Result};
pub use matrix::Matrix3;
pub use vector::Vector3D;
