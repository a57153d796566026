/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions for S(Q,ω) calculations
//!
//! This module provides physical constants, unit conversions and the small
//! numerical helpers shared by the other modules.

pub mod constants;
pub mod conversions;
pub mod errors;
pub mod linear_algebra;
pub mod statistics;
pub mod thermal;

pub use conversions::{eigenvalue_to_thz, mev_to_thz, thz_to_mev};
pub use errors::{Result, UtilsError};
pub use statistics::percentile;
pub use thermal::bose_einstein;
