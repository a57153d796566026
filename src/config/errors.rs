/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for configuration loading and validation

use thiserror::Error;

use crate::spectrum::SpectrumError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A value that would make the run meaningless
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid spectrum settings: {0}")]
    SpectrumError(#[from] SpectrumError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
