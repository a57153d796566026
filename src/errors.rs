/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Crate-level error aggregating every stage of a run

use thiserror::Error;

use crate::config::ConfigError;
use crate::output::OutputError;
use crate::phonon::PhononError;
use crate::spectrum::SpectrumError;

#[derive(Error, Debug)]
pub enum SqwError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Phonon error: {0}")]
    PhononError(#[from] PhononError),

    #[error("Spectrum error: {0}")]
    SpectrumError(#[from] SpectrumError),

    #[error("Output error: {0}")]
    OutputError(#[from] OutputError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SqwError>;
