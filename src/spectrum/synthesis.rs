/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Energy-resolved intensity from per-mode frequencies and structure factors
//!
//! Every mode is broadened by a damped-harmonic-oscillator line shape and the
//! sum is weighted by the detailed-balance factor.

use std::f64::consts::PI;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::errors::{Result, SpectrumError};
use crate::phonon::PhononPoint;

/// Line shape of one mode at energy `energy`
///
/// `4 S Γ e f / (π ((e² - f²)² + 4 e² Γ²))`, with the removable singularity at
/// `e = f = 0` defined as zero.
pub fn contribution(energy: f64, frequency: f64, structure_factor: f64, gamma: f64) -> f64 {
    let numerator = 4.0 * structure_factor * gamma * energy * frequency;
    if numerator == 0.0 {
        return 0.0;
    }
    let detuning = energy * energy - frequency * frequency;
    let denominator = PI * (detuning * detuning + 4.0 * energy * energy * gamma * gamma);
    numerator / denominator
}

/// Detailed-balance factor `1 / (1 - exp(-e / k_B T) + iη)`
///
/// The imaginary regularization keeps the factor finite at `e = 0`.
pub fn bose_factor(energy: f64, temperature: f64, boltzmann: f64, eta: f64) -> Complex64 {
    let denominator = Complex64::new(-(-energy / (boltzmann * temperature)).exp_m1(), eta);
    denominator.inv()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    /// Kelvin
    pub temperature: f64,
    /// Half width at half maximum of each mode (meV)
    pub gamma: f64,
    /// Bose-factor regularization (meV)
    pub eta: f64,
    /// meV/K
    pub boltzmann: f64,
}

impl SynthesisParameters {
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.temperature) {
            return Err(SpectrumError::InvalidParameter(format!(
                "temperature must be positive, got {} K",
                self.temperature
            )));
        }
        if !is_positive(self.gamma) {
            return Err(SpectrumError::InvalidParameter(format!(
                "line width must be positive, got {} meV",
                self.gamma
            )));
        }
        if !is_positive(self.eta) || !is_positive(self.boltzmann) {
            return Err(SpectrumError::InvalidParameter(
                "Bose regularization and Boltzmann constant must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Intensity I(point, energy) on a dense grid
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralField {
    energies: Vec<f64>,
    /// Rows are path points, columns are energies
    intensities: Array2<f64>,
}

impl SpectralField {
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn intensities(&self) -> &Array2<f64> {
        &self.intensities
    }

    pub fn num_points(&self) -> usize {
        self.intensities.nrows()
    }

    pub fn num_energies(&self) -> usize {
        self.intensities.ncols()
    }

    pub fn intensity(&self, point: usize, energy: usize) -> f64 {
        self.intensities[(point, energy)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralSynthesizer {
    parameters: SynthesisParameters,
}

impl SpectralSynthesizer {
    pub fn new(parameters: SynthesisParameters) -> Result<Self> {
        parameters.validate()?;
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &SynthesisParameters {
        &self.parameters
    }

    /// Superpose all modes of every point
    ///
    /// `frequencies` and `structure_factors` are `points × bands` tables in meV
    /// and raw engine units respectively. Degenerate bands are not reduced.
    pub fn synthesize(
        &self,
        energies: &[f64],
        frequencies: &Array2<f64>,
        structure_factors: &Array2<f64>,
    ) -> Result<SpectralField> {
        if energies.is_empty() {
            return Err(SpectrumError::EmptyEnergyAxis);
        }
        if frequencies.dim() != structure_factors.dim() {
            return Err(SpectrumError::ShapeMismatch(format!(
                "frequency table is {:?} but structure-factor table is {:?}",
                frequencies.dim(),
                structure_factors.dim()
            )));
        }

        let SynthesisParameters {
            temperature,
            gamma,
            eta,
            boltzmann,
        } = self.parameters;
        let bose: Vec<Complex64> = energies
            .iter()
            .map(|&e| bose_factor(e, temperature, boltzmann, eta))
            .collect();

        let mut intensities = Array2::<f64>::zeros((frequencies.nrows(), energies.len()));
        for (p, (f_row, s_row)) in frequencies
            .outer_iter()
            .zip(structure_factors.outer_iter())
            .enumerate()
        {
            for (m, (&e, weight)) in energies.iter().zip(&bose).enumerate() {
                let chi: f64 = f_row
                    .iter()
                    .zip(s_row.iter())
                    .map(|(&f, &s)| contribution(e, f, s, gamma))
                    .sum();
                intensities[(p, m)] = (*weight * chi).norm();
            }
        }

        Ok(SpectralField {
            energies: energies.to_vec(),
            intensities,
        })
    }
}

/// Stack per-point frequencies and structure factors into `points × bands` tables
pub fn mode_tables(points: &[PhononPoint]) -> Result<(Array2<f64>, Array2<f64>)> {
    let bands = points.first().map_or(0, PhononPoint::num_bands);
    let mut frequencies = Array2::<f64>::zeros((points.len(), bands));
    let mut structure_factors = Array2::<f64>::zeros((points.len(), bands));

    for (p, point) in points.iter().enumerate() {
        if point.frequencies.len() != bands || point.structure_factors.len() != bands {
            return Err(SpectrumError::ShapeMismatch(format!(
                "point {} has {} frequencies and {} structure factors, expected {}",
                point.point.index,
                point.frequencies.len(),
                point.structure_factors.len(),
                bands
            )));
        }
        for k in 0..bands {
            frequencies[(p, k)] = point.frequencies[k];
            structure_factors[(p, k)] = point.structure_factors[k];
        }
    }

    Ok((frequencies, structure_factors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    fn parameters() -> SynthesisParameters {
        SynthesisParameters {
            temperature: 30.0,
            gamma: 0.3,
            eta: 0.003,
            boltzmann: 0.08617330,
        }
    }

    #[rstest]
    #[case(5.0, 3.0)]
    #[case(-2.0, 7.5)]
    #[case(0.1, 0.2)]
    fn test_contribution_odd_in_frequency(#[case] energy: f64, #[case] frequency: f64) {
        let positive = contribution(energy, frequency, 1.0, 0.3);
        let negative = contribution(energy, -frequency, 1.0, 0.3);
        assert_relative_eq!(positive.abs(), negative.abs(), max_relative = 1e-12);
    }

    #[test]
    fn test_zero_guard() {
        assert_eq!(contribution(0.0, 0.0, 0.0, 0.3), 0.0);
        assert_eq!(contribution(0.0, 0.0, 1.0, 0.3), 0.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1e-12)]
    #[case(-5.0)]
    #[case(35.0)]
    fn test_bose_factor_is_finite(#[case] energy: f64) {
        let factor = bose_factor(energy, 30.0, 0.08617330, 0.003);
        assert!(factor.norm().is_finite());
    }

    #[test]
    fn test_peak_at_mode_frequency() {
        let synthesizer = SpectralSynthesizer::new(parameters()).unwrap();
        let energies = [2.0, 5.0, 8.0];
        let field = synthesizer
            .synthesize(&energies, &array![[5.0]], &array![[1.0]])
            .unwrap();
        assert_eq!(field.num_points(), 1);
        assert!(field.intensity(0, 1) > field.intensity(0, 0));
        assert!(field.intensity(0, 1) > field.intensity(0, 2));
    }

    #[test]
    fn test_shape_mismatch() {
        let synthesizer = SpectralSynthesizer::new(parameters()).unwrap();
        assert!(synthesizer
            .synthesize(&[1.0], &array![[5.0, 6.0]], &array![[1.0]])
            .is_err());
        assert!(matches!(
            synthesizer.synthesize(&[], &array![[5.0]], &array![[1.0]]),
            Err(SpectrumError::EmptyEnergyAxis)
        ));
    }

    #[rstest]
    #[case(0.0, 0.3)]
    #[case(30.0, 0.0)]
    #[case(-1.0, 0.3)]
    fn test_invalid_parameters(#[case] temperature: f64, #[case] gamma: f64) {
        let parameters = SynthesisParameters {
            temperature,
            gamma,
            ..parameters()
        };
        assert!(SpectralSynthesizer::new(parameters).is_err());
    }
}
