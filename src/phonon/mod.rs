/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Lattice dynamics
//!
//! [`PhononEngine`] is the contract the rest of the crate relies on.
//! [`HarmonicEngine`] implements it from supercell force constants or
//! displacement-force sets, and [`PhononPropertyAdapter`] drives any engine
//! through setup and path queries.

pub mod adapter;
pub mod born;
pub mod dsf;
pub mod dynmat;
pub mod engine;
pub mod errors;
pub mod force_constants;
pub mod force_sets;
pub mod form_factor;
pub mod harmonic;
pub mod mesh;

pub use adapter::{AdapterSettings, PhononPoint, PhononPropertyAdapter};
pub use born::{parse_born, read_born, BornCharges};
pub use dynmat::{DynamicalMatrix, PhononModes};
pub use engine::{BandStructure, MeshConfig, PhononEngine};
pub use errors::{PhononError, Result};
pub use force_constants::{parse_force_constants, read_force_constants, ForceConstants};
pub use force_sets::{parse_force_sets, read_force_sets, Displacement, ForceSets};
pub use form_factor::{FormFactor, ScatteringLengths, WaasmaierKirfel};
pub use harmonic::{ForceInput, HarmonicEngine};
pub use mesh::MeshSolution;
