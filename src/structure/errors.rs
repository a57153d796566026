/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for crystal-structure input and construction

use crate::lattice::LatticeError;
use std::io;
use thiserror::Error;

/// Errors that can occur while reading or transforming crystal structures
#[derive(Error, Debug)]
pub enum StructureError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Lattice error: {0}")]
    LatticeError(#[from] LatticeError),
}

impl StructureError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        StructureError::ParseError {
            line,
            message: message.into(),
        }
    }
}

/// Result type for structure operations
pub type Result<T> = std::result::Result<T, StructureError>;
