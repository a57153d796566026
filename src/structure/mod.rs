/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Crystal structures
//!
//! Element data, POSCAR input and the supercell / primitive-cell pair the
//! phonon engine works with.

pub mod crystal;
pub mod database;
pub mod errors;
pub mod poscar;
pub mod supercell;

pub use crystal::{Crystal, Site};
pub use errors::{Result, StructureError};
pub use poscar::{parse_poscar, read_poscar};
pub use supercell::{build_supercell, PrimitiveCell, SYMPREC};
