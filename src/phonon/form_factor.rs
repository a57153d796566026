/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Scattering strength of each species as a function of momentum transfer

use std::collections::HashMap;
use std::f64::consts::PI;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::errors::{PhononError, Result};

/// Per-species scattering amplitude
pub trait FormFactor {
    /// Amplitude of `symbol` at momentum transfer `q_norm` (Å⁻¹, 2π included)
    fn evaluate(&self, symbol: &str, q_norm: f64) -> Result<f64>;

    /// Short description used in the report header
    fn description(&self) -> &'static str;
}

/// Waasmaier-Kirfel coefficients `a1, b1, ..., a5, b5, c`
pub type WaasmaierKirfelParameters = [f64; 11];

/// Na⁺ and Cl⁻ from D. Waasmaier and A. Kirfel, Acta Cryst. A51, 416 (1995)
pub static DEFAULT_WK1995_PARAMETERS: Lazy<HashMap<String, WaasmaierKirfelParameters>> =
    Lazy::new(|| {
        let mut table = HashMap::new();
        table.insert(
            "Na".to_string(),
            [
                3.148690, 2.594987, 4.073989, 6.046925, 0.767888, 0.070139, 0.995612, 14.1226457,
                0.968249, 0.217037, 0.045300,
            ],
        );
        table.insert(
            "Cl".to_string(),
            [
                1.061802, 0.144727, 7.139886, 1.171795, 6.524271, 19.467656, 2.355626, 60.320301,
                35.829404, 0.000436, -34.916604,
            ],
        );
        table
    });

/// Evaluate `f(s) = Σ aᵢ exp(-bᵢ s²) + c` with `s = |Q| / 4π`
pub fn atomic_form_factor_wk1995(q_norm: f64, parameters: &WaasmaierKirfelParameters) -> f64 {
    let s = q_norm / (4.0 * PI);
    let s2 = s * s;
    let gaussians: f64 = parameters[..10]
        .chunks_exact(2)
        .map(|ab| ab[0] * (-ab[1] * s2).exp())
        .sum();
    gaussians + parameters[10]
}

/// X-ray atomic form factors in the analytic Waasmaier-Kirfel form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaasmaierKirfel {
    parameters: HashMap<String, WaasmaierKirfelParameters>,
}

impl WaasmaierKirfel {
    pub fn new(parameters: HashMap<String, WaasmaierKirfelParameters>) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &HashMap<String, WaasmaierKirfelParameters> {
        &self.parameters
    }
}

impl Default for WaasmaierKirfel {
    fn default() -> Self {
        Self::new(DEFAULT_WK1995_PARAMETERS.clone())
    }
}

impl FormFactor for WaasmaierKirfel {
    fn evaluate(&self, symbol: &str, q_norm: f64) -> Result<f64> {
        self.parameters
            .get(symbol)
            .map(|parameters| atomic_form_factor_wk1995(q_norm, parameters))
            .ok_or_else(|| PhononError::UnknownSpecies(symbol.to_string()))
    }

    fn description(&self) -> &'static str {
        "atomic form factor"
    }
}

/// Q-independent neutron scattering lengths (fm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScatteringLengths {
    lengths: HashMap<String, f64>,
}

impl ScatteringLengths {
    pub fn new(lengths: HashMap<String, f64>) -> Self {
        Self { lengths }
    }
}

impl Default for ScatteringLengths {
    fn default() -> Self {
        let mut lengths = HashMap::new();
        lengths.insert("Na".to_string(), 3.63);
        lengths.insert("Cl".to_string(), 9.5770);
        Self::new(lengths)
    }
}

impl FormFactor for ScatteringLengths {
    fn evaluate(&self, symbol: &str, _q_norm: f64) -> Result<f64> {
        self.lengths
            .get(symbol)
            .copied()
            .ok_or_else(|| PhononError::UnknownSpecies(symbol.to_string()))
    }

    fn description(&self) -> &'static str {
        "scattering lengths"
    }
}
