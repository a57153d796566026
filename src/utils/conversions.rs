/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit conversion utilities

use super::constants;

/// Convert a phonon frequency from THz to meV
pub fn thz_to_mev(thz: f64) -> f64 {
    thz * constants::THZ_TO_MEV
}

/// Convert an energy from meV to THz
pub fn mev_to_thz(mev: f64) -> f64 {
    mev / constants::THZ_TO_MEV
}

/// Convert a dynamical-matrix eigenvalue (eV/Å²/amu) into a frequency in THz
///
/// Negative eigenvalues correspond to unstable (imaginary) modes and are
/// reported as negative frequencies, the usual lattice-dynamics convention.
pub fn eigenvalue_to_thz(eigenvalue: f64) -> f64 {
    eigenvalue.signum() * eigenvalue.abs().sqrt() * constants::EV_ANGSTROM_AMU_TO_THZ
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_conversions() {
        let thz = 5.0;
        assert_relative_eq!(mev_to_thz(thz_to_mev(thz)), thz, epsilon = 1e-12);
        assert_relative_eq!(thz_to_mev(1.0), 4.13567, epsilon = 1e-12);
    }

    #[test]
    fn test_eigenvalue_sign_convention() {
        let positive = eigenvalue_to_thz(4.0);
        let negative = eigenvalue_to_thz(-4.0);

        assert_relative_eq!(positive, 2.0 * constants::EV_ANGSTROM_AMU_TO_THZ, epsilon = 1e-10);
        assert_relative_eq!(negative, -positive, epsilon = 1e-12);
        assert_eq!(eigenvalue_to_thz(0.0), 0.0);
    }
}
