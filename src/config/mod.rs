/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Run configuration
//!
//! [`SqwConfig::default`] reproduces the NaCl calculation. A JSON file can
//! override any subset of fields:
//!
//! ```json
//! {
//!   "inputs": { "forces": { "format": "force_constants", "path": "FORCE_CONSTANTS" } },
//!   "spectrum": { "temperature": 300.0 },
//!   "scattering": { "model": "scattering_lengths" }
//! }
//! ```

pub mod errors;
pub mod sections;

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

pub use errors::{ConfigError, Result};
pub use sections::{
    EngineSettings, InputFiles, OutputSettings, PathSettings, ScatteringModel, SpectrumSettings,
};

use crate::phonon::AdapterSettings;

/// File name picked up from the working directory when present
pub const CONFIG_FILE_NAME: &str = "sqw.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqwConfig {
    pub inputs: InputFiles,
    pub engine: EngineSettings,
    pub path: PathSettings,
    pub spectrum: SpectrumSettings,
    pub scattering: ScatteringModel,
    pub output: OutputSettings,
}

impl SqwConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: SqwConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Loading configuration from {}", path.as_ref().display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Check every setting before any file is read or any engine is built
    pub fn validate(&self) -> Result<()> {
        if self.path.n_points < 2 {
            return Err(ConfigError::Invalid(format!(
                "at least 2 path samples are needed, got {}",
                self.path.n_points
            )));
        }
        if self.path.direction.iter().chain(&self.path.origin).any(|x| !x.is_finite()) {
            return Err(ConfigError::Invalid(
                "path origin and direction must be finite".to_string(),
            ));
        }
        if self.engine.supercell.iter().any(|&n| n == 0) {
            return Err(ConfigError::Invalid(format!(
                "supercell multiplicity must be positive, got {:?}",
                self.engine.supercell
            )));
        }

        let mesh = &self.engine.mesh;
        if mesh.mesh.iter().any(|&n| n == 0) {
            return Err(ConfigError::Invalid(format!(
                "mesh must be positive along every axis, got {:?}",
                mesh.mesh
            )));
        }
        if mesh.is_mesh_symmetry {
            return Err(ConfigError::Invalid(
                "mesh symmetry must be disabled for Debye-Waller factors".to_string(),
            ));
        }
        if !mesh.with_eigenvectors {
            return Err(ConfigError::Invalid(
                "mesh eigenvectors are required for Debye-Waller factors".to_string(),
            ));
        }
        if self.engine.freq_min.is_nan() || self.engine.freq_min < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frequency cutoff must be non-negative, got {}",
                self.engine.freq_min
            )));
        }

        let spectrum = &self.spectrum;
        spectrum.energy.validate()?;
        spectrum.synthesis_parameters().validate()?;
        if spectrum.thz_to_mev.is_nan() || spectrum.thz_to_mev <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "THz to meV factor must be positive, got {}",
                spectrum.thz_to_mev
            )));
        }
        if spectrum.degeneracy_tolerance.is_nan() || spectrum.degeneracy_tolerance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "degeneracy tolerance must be positive, got {}",
                spectrum.degeneracy_tolerance
            )));
        }
        if self.output.width == 0 || self.output.height == 0 {
            return Err(ConfigError::Invalid("image size must be non-zero".to_string()));
        }

        Ok(())
    }

    pub fn adapter_settings(&self) -> AdapterSettings {
        AdapterSettings {
            mesh: self.engine.mesh,
            freq_min: self.engine.freq_min,
            thz_to_mev: self.spectrum.thz_to_mev,
        }
    }
}
