/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical constants used in lattice-dynamics and scattering calculations
//!
//! Internal units follow the usual force-constant conventions: eV/Å² for
//! force constants, amu for masses, Å for lengths and THz for phonon
//! frequencies. Spectra are built in meV.

/// Boltzmann constant in meV/K, as used for the detailed-balance factor
pub const BOLTZMANN_MEV: f64 = 0.08617330;

/// Boltzmann constant in eV/K (CODATA 2018)
pub const BOLTZMANN_EV: f64 = 8.617333262e-5;

/// Conversion from THz to meV (h · 1 THz)
pub const THZ_TO_MEV: f64 = 4.13567;

/// Conversion from THz to eV (CODATA 2018 Planck constant)
pub const THZ_TO_EV: f64 = 4.135667696e-3;

/// sqrt(eV/Å²/amu) expressed in THz (ordinary frequency, not angular)
pub const EV_ANGSTROM_AMU_TO_THZ: f64 = 15.633302;

/// e²/(4πε₀) in eV·Å (Hartree × Bohr), the default BORN unit conversion
pub const HARTREE_BOHR: f64 = 14.399652;

/// Reduced Planck constant in J·s
pub const HBAR_SI: f64 = 1.054571817e-34;

/// Atomic mass unit in kg
pub const AMU_SI: f64 = 1.66053906660e-27;

/// Square metres per square ångström
pub const ANGSTROM2_PER_M2: f64 = 1.0e20;
