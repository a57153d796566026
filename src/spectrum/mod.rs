/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Degeneracy reduction and S(Q,ω) synthesis

pub mod degeneracy;
pub mod energy;
pub mod errors;
pub mod synthesis;

pub use degeneracy::{degenerate_sets, reduce, DegenerateGroup, DEFAULT_DEGENERACY_TOLERANCE};
pub use energy::EnergyAxis;
pub use errors::{Result, SpectrumError};
pub use synthesis::{
    bose_factor, contribution, mode_tables, SpectralField, SpectralSynthesizer,
    SynthesisParameters,
};
