/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the spectrum module

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectrumError {
    #[error("Energy axis is empty")]
    EmptyEnergyAxis,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Frequency and structure-factor tables that do not line up
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

pub type Result<T> = std::result::Result<T, SpectrumError>;
