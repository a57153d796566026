/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! One-phonon dynamic structure factor

use std::f64::consts::PI;

use num_complex::Complex64;

use super::dynmat::PhononModes;
use super::errors::{PhononError, Result};
use super::form_factor::FormFactor;
use crate::lattice::{Matrix3, Vector3D};
use crate::structure::Crystal;
use crate::utils::bose_einstein;

/// Per-mode S at momentum transfer `G + q`
///
/// `primitive` supplies positions, species and masses; `displacements` are
/// the thermal displacement matrices of its atoms. For each mode above
/// `freq_min` (THz)
///
/// `F = Σ_j f_j(|Q|) / √(2 m_j) · exp(-½ Q·B_j·Q) · (Q·e_j) · exp(-2πi G·r_j)`
///
/// and `S = |F|² (n + 1) / f`. Softer modes contribute zero.
#[allow(clippy::too_many_arguments)]
pub fn mode_structure_factors(
    primitive: &Crystal,
    modes: &PhononModes,
    q: &Vector3D,
    g_point: &Vector3D,
    displacements: &[Matrix3],
    temperature: f64,
    form_factor: &dyn FormFactor,
    freq_min: f64,
) -> Result<Vec<f64>> {
    if displacements.len() != primitive.num_atoms() {
        return Err(PhononError::InconsistentOutput(format!(
            "{} displacement matrices for {} atoms",
            displacements.len(),
            primitive.num_atoms()
        )));
    }

    let q_cartesian = primitive
        .lattice()
        .reciprocal_to_cartesian(&(*g_point + *q))
        * (2.0 * PI);
    let q_norm = q_cartesian.length();

    // Per-atom prefactors independent of the mode
    let prefactors = primitive
        .sites()
        .iter()
        .zip(displacements)
        .map(|(site, b)| {
            let debye_waller = (-0.5 * b.quadratic_form(&q_cartesian)).exp();
            let phase = Complex64::from_polar(1.0, -2.0 * PI * g_point.dot(&site.position));
            let amplitude = form_factor.evaluate(&site.symbol, q_norm)?;
            Ok(phase * (amplitude * debye_waller / (2.0 * site.mass).sqrt()))
        })
        .collect::<Result<Vec<Complex64>>>()?;

    let q_components = q_cartesian.to_array();
    let factors = modes
        .frequencies
        .iter()
        .enumerate()
        .map(|(band, &frequency)| {
            if frequency <= freq_min {
                return 0.0;
            }
            let eigenvector = modes.eigenvectors.column(band);
            let amplitude: Complex64 = prefactors
                .iter()
                .enumerate()
                .map(|(atom, prefactor)| {
                    let projection: Complex64 = q_components
                        .iter()
                        .enumerate()
                        .map(|(alpha, &component)| eigenvector[3 * atom + alpha] * component)
                        .sum();
                    prefactor * projection
                })
                .sum();
            amplitude.norm_sqr() * (bose_einstein(frequency, temperature) + 1.0) / frequency
        })
        .collect();

    Ok(factors)
}
