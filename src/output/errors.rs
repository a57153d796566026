/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the output module

use thiserror::Error;

use crate::spectrum::SpectrumError;
use crate::utils::UtilsError;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The drawing backend failed
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Cannot plot an empty intensity field")]
    EmptyField,

    /// Logarithmic color scaling needs at least one positive intensity
    #[error("Intensity field has no positive finite values to scale")]
    NoPositiveIntensity,

    #[error("Spectrum error: {0}")]
    SpectrumError(#[from] SpectrumError),

    #[error("Statistics error: {0}")]
    UtilsError(#[from] UtilsError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
