/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Thermal occupation of phonon modes

use super::constants::{BOLTZMANN_EV, THZ_TO_EV};

/// Bose-Einstein occupation number of a mode
///
/// # Arguments
///
/// * `frequency` - Mode frequency in THz
/// * `temperature` - Temperature in Kelvin
///
/// # Returns
///
/// The mean occupation n(f, T). Zero at or below 0 K, and for
/// non-positive frequencies.
pub fn bose_einstein(frequency: f64, temperature: f64) -> f64 {
    if temperature <= 0.0 || frequency <= 0.0 {
        return 0.0;
    }

    let x = frequency * THZ_TO_EV / (BOLTZMANN_EV * temperature);
    // exp_m1 keeps precision for soft modes where x << 1
    1.0 / x.exp_m1()
}
