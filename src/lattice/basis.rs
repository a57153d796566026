/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Conventional and primitive reciprocal-lattice bases
//!
//! Reduced wavevectors are tagged with the basis they are expressed in. The
//! only way to move between the two bases is the primitive matrix `P`:
//!
//! ```text
//! v_primitive    = v_conventional · P
//! v_conventional = v_primitive · P⁻¹
//! ```

use super::errors::Result;
use super::matrix::Matrix3;
use super::vector::Vector3D;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Sub};

/// Marker trait for a named lattice basis
pub trait Basis: Copy + fmt::Debug + PartialEq {
    /// Human-readable basis name
    const NAME: &'static str;
}

/// Conventional (e.g. cubic) basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conventional;

/// Primitive basis used by the phonon engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive;

impl Basis for Conventional {
    const NAME: &'static str = "conventional";
}

impl Basis for Primitive {
    const NAME: &'static str = "primitive";
}

/// Three reduced components in the basis `B`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeVector<B: Basis> {
    components: Vector3D,
    basis: PhantomData<B>,
}

impl<B: Basis> LatticeVector<B> {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_components(Vector3D::new(x, y, z))
    }

    pub fn from_components(components: Vector3D) -> Self {
        Self {
            components,
            basis: PhantomData,
        }
    }

    pub fn zero() -> Self {
        Self::from_components(Vector3D::origin())
    }

    /// Reduced components in this basis
    pub fn components(&self) -> Vector3D {
        self.components
    }
}

impl<B: Basis> From<[f64; 3]> for LatticeVector<B> {
    fn from(v: [f64; 3]) -> Self {
        Self::from_components(Vector3D::from(v))
    }
}

impl<B: Basis> Add for LatticeVector<B> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_components(self.components + other.components)
    }
}

impl<B: Basis> Sub for LatticeVector<B> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::from_components(self.components - other.components)
    }
}

impl<B: Basis> Mul<f64> for LatticeVector<B> {
    type Output = Self;

    fn mul(self, scale: f64) -> Self {
        Self::from_components(self.components * scale)
    }
}

impl<B: Basis> fmt::Display for LatticeVector<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.components, f)
    }
}

/// Transform from the conventional basis to the primitive basis
///
/// The inverse is computed once at construction, so a `PrimitiveMatrix`
/// always maps in both directions without failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")]
pub struct PrimitiveMatrix {
    forward: Matrix3,
    inverse: Matrix3,
}

impl PrimitiveMatrix {
    /// Build the transform, rejecting singular matrices
    pub fn new(rows: [[f64; 3]; 3]) -> Result<Self> {
        let forward = Matrix3::new(rows);
        let inverse = forward.inverse()?;
        Ok(Self { forward, inverse })
    }

    /// The face-centred cubic primitive matrix
    pub fn fcc() -> Self {
        Self {
            forward: Matrix3::new([[0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]]),
            inverse: Matrix3::new([[-1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0]]),
        }
    }

    pub fn identity() -> Self {
        Self {
            forward: Matrix3::identity(),
            inverse: Matrix3::identity(),
        }
    }

    /// The matrix `P`
    pub fn matrix(&self) -> &Matrix3 {
        &self.forward
    }

    /// The matrix `P⁻¹`
    pub fn inverse(&self) -> &Matrix3 {
        &self.inverse
    }

    /// Number of unit cells per primitive cell, `|det P|`
    pub fn volume_ratio(&self) -> f64 {
        self.forward.determinant().abs()
    }
}

impl TryFrom<[[f64; 3]; 3]> for PrimitiveMatrix {
    type Error = super::errors::LatticeError;

    fn try_from(rows: [[f64; 3]; 3]) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<PrimitiveMatrix> for [[f64; 3]; 3] {
    fn from(matrix: PrimitiveMatrix) -> Self {
        matrix.forward.rows()
    }
}

/// Map a conventional-basis vector into the primitive basis, `v · P`
pub fn to_primitive(
    vector: &LatticeVector<Conventional>,
    matrix: &PrimitiveMatrix,
) -> LatticeVector<Primitive> {
    LatticeVector::from_components(matrix.forward.left_mul(&vector.components))
}

/// Map a primitive-basis vector back to the conventional basis, `v · P⁻¹`
pub fn to_conventional(
    vector: &LatticeVector<Primitive>,
    matrix: &PrimitiveMatrix,
) -> LatticeVector<Conventional> {
    LatticeVector::from_components(matrix.inverse.left_mul(&vector.components))
}
