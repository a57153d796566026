/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the phonon module

use thiserror::Error;

use crate::lattice::LatticeError;
use crate::structure::StructureError;
use crate::utils::UtilsError;

/// Errors that can occur while building or querying a phonon engine
#[derive(Error, Debug)]
pub enum PhononError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Structure error: {0}")]
    StructureError(#[from] StructureError),

    #[error("Lattice error: {0}")]
    LatticeError(#[from] LatticeError),

    #[error("Numerical error: {0}")]
    NumericalError(#[from] UtilsError),

    /// Malformed FORCE_CONSTANTS, FORCE_SETS or BORN content
    #[error("Parse error in {file} at line {line}: {message}")]
    ParseError {
        file: String,
        line: usize,
        message: String,
    },

    #[error("Invalid force constants: {0}")]
    InvalidForceConstants(String),

    /// Displacement data that cannot determine the force constants
    #[error("Invalid force sets: {0}")]
    InvalidForceSets(String),

    #[error("Invalid Born effective charges: {0}")]
    InvalidBorn(String),

    #[error("Unknown scattering species: {0}")]
    UnknownSpecies(String),

    #[error("Invalid mesh configuration: {0}")]
    InvalidMesh(String),

    /// The mesh solve must run (with eigenvectors) before Debye-Waller factors exist
    #[error("Mesh has not been solved with eigenvectors")]
    MeshNotSolved,

    /// Engine results that do not line up with the requested points
    #[error("Inconsistent engine output: {0}")]
    InconsistentOutput(String),
}

impl PhononError {
    pub(crate) fn parse(file: &str, line: usize, message: impl Into<String>) -> Self {
        PhononError::ParseError {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}

/// A specialized Result type for phonon operations
pub type Result<T> = std::result::Result<T, PhononError>;
