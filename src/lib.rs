/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # sqw-rs
//!
//! Inelastic scattering dynamic structure factor S(Q,ω) along a straight
//! reciprocal-space path, computed from harmonic lattice dynamics.
//!
//! A path given in the conventional basis is mapped to the primitive basis
//! and sampled. A [`phonon::PhononEngine`] provides band frequencies and
//! per-mode structure factors at each sample. Degenerate bands are reduced for
//! the text report, while the raw modes are broadened into an energy-resolved
//! intensity map that is rendered as an image.

pub mod config;
pub mod errors;
pub mod lattice;
pub mod output;
pub mod path;
pub mod phonon;
pub mod pipeline;
pub mod spectrum;
pub mod structure;
pub mod utils;

pub use config::SqwConfig;
pub use errors::{Result, SqwError};
pub use pipeline::{SqwPipeline, SqwRun};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
