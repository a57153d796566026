/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Configuration sections
//!
//! Every section implements `Default` with the NaCl run, so a JSON file only
//! needs the values it changes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::lattice::{Conventional, LatticeVector, PrimitiveMatrix};
use crate::phonon::{ForceInput, FormFactor, MeshConfig, ScatteringLengths, WaasmaierKirfel};
use crate::spectrum::{EnergyAxis, SynthesisParameters, DEFAULT_DEGENERACY_TOLERANCE};
use crate::utils::constants::{BOLTZMANN_MEV, THZ_TO_MEV};

/// Input file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub poscar: PathBuf,
    pub forces: ForceInput,
    /// Born charges enable the non-analytical correction
    pub born: Option<PathBuf>,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            poscar: PathBuf::from("POSCAR"),
            forces: ForceInput::ForceSets(PathBuf::from("FORCE_SETS")),
            born: Some(PathBuf::from("BORN")),
        }
    }
}

/// Phonon engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Diagonal supercell multiplicity of the force constants
    pub supercell: [usize; 3],
    pub primitive_matrix: PrimitiveMatrix,
    pub mesh: MeshConfig,
    pub symmetrization_level: u32,
    /// THz
    pub freq_min: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            supercell: [2, 2, 2],
            primitive_matrix: PrimitiveMatrix::fcc(),
            mesh: MeshConfig::default(),
            symmetrization_level: 1,
            freq_min: 1e-3,
        }
    }
}

/// Straight path `origin → origin + direction` in the conventional basis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub origin: [f64; 3],
    pub direction: [f64; 3],
    /// Samples including the omitted origin
    pub n_points: usize,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            origin: [3.0, 3.0, 3.0],
            direction: [0.5, 0.5, 0.5],
            n_points: 51,
        }
    }
}

impl PathSettings {
    pub fn origin(&self) -> LatticeVector<Conventional> {
        let [x, y, z] = self.origin;
        LatticeVector::new(x, y, z)
    }

    pub fn direction(&self) -> LatticeVector<Conventional> {
        let [x, y, z] = self.direction;
        LatticeVector::new(x, y, z)
    }
}

/// Temperature, line shape and unit constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumSettings {
    /// Kelvin
    pub temperature: f64,
    pub energy: EnergyAxis,
    /// Half width at half maximum (meV)
    pub gamma: f64,
    /// Bose-factor regularization (meV)
    pub bose_regularization: f64,
    /// meV/K
    pub boltzmann: f64,
    pub thz_to_mev: f64,
    /// meV
    pub degeneracy_tolerance: f64,
}

impl Default for SpectrumSettings {
    fn default() -> Self {
        let gamma = 0.3;
        Self {
            temperature: 30.0,
            energy: EnergyAxis::default(),
            gamma,
            bose_regularization: gamma * 0.01,
            boltzmann: BOLTZMANN_MEV,
            thz_to_mev: THZ_TO_MEV,
            degeneracy_tolerance: DEFAULT_DEGENERACY_TOLERANCE,
        }
    }
}

impl SpectrumSettings {
    pub fn synthesis_parameters(&self) -> SynthesisParameters {
        SynthesisParameters {
            temperature: self.temperature,
            gamma: self.gamma,
            eta: self.bose_regularization,
            boltzmann: self.boltzmann,
        }
    }
}

/// Which scattering amplitude weights each species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ScatteringModel {
    /// X-ray form factors in the Waasmaier-Kirfel form
    AtomicFormFactor {
        #[serde(default)]
        parameters: WaasmaierKirfel,
    },
    /// Neutron scattering lengths
    ScatteringLengths {
        #[serde(default)]
        lengths: ScatteringLengths,
    },
}

impl Default for ScatteringModel {
    fn default() -> Self {
        ScatteringModel::AtomicFormFactor {
            parameters: WaasmaierKirfel::default(),
        }
    }
}

impl ScatteringModel {
    pub fn form_factor(&self) -> &dyn FormFactor {
        match self {
            ScatteringModel::AtomicFormFactor { parameters } => parameters,
            ScatteringModel::ScatteringLengths { lengths } => lengths,
        }
    }
}

/// Output locations and image size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub image: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            image: PathBuf::from("Sqom.png"),
            width: 1000,
            height: 700,
        }
    }
}
