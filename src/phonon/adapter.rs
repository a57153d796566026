/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Sequenced access to a phonon engine along a sampled path

use log::{debug, info};

use super::engine::{MeshConfig, PhononEngine};
use super::errors::{PhononError, Result};
use super::form_factor::FormFactor;
use crate::lattice::LatticeVector;
use crate::path::{PathPoint, QPath};

/// Engine-side parameters fixed for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdapterSettings {
    pub mesh: MeshConfig,
    /// Modes at or below this frequency (THz) carry no structure factor
    pub freq_min: f64,
    /// Conversion from engine frequencies (THz) to report energies (meV)
    pub thz_to_mev: f64,
}

/// Phonon properties at one sampled point
#[derive(Debug, Clone, PartialEq)]
pub struct PhononPoint {
    pub point: PathPoint,
    /// Cumulative distance from the path origin
    pub distance: f64,
    /// Band frequencies in meV, in engine order
    pub frequencies: Vec<f64>,
    pub structure_factors: Vec<f64>,
}

impl PhononPoint {
    pub fn num_bands(&self) -> usize {
        self.frequencies.len()
    }
}

/// An engine whose force constants are symmetrized and whose mesh is solved
///
/// Holding a `PhononPropertyAdapter` is proof that setup ran to completion.
#[derive(Debug)]
pub struct PhononPropertyAdapter<E: PhononEngine> {
    engine: E,
    settings: AdapterSettings,
}

impl<E: PhononEngine> PhononPropertyAdapter<E> {
    pub fn new(mut engine: E, settings: AdapterSettings) -> Result<Self> {
        engine.symmetrize_force_constants()?;
        engine.solve_mesh(&settings.mesh)?;
        info!("Phonon engine ready");
        Ok(Self { engine, settings })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn settings(&self) -> &AdapterSettings {
        &self.settings
    }

    /// Frequencies and structure factors at every point of `path`, measured from `G`
    pub fn query(
        &self,
        path: &QPath,
        temperature: f64,
        form_factor: &dyn FormFactor,
    ) -> Result<Vec<PhononPoint>> {
        let qpoints = path.qpoints();
        info!("Querying {} path points", qpoints.len());

        let bands = self.engine.band_structure(&LatticeVector::zero(), &qpoints)?;
        let structure_factors = self.engine.dynamic_structure_factor(
            &qpoints,
            path.origin(),
            temperature,
            form_factor,
            self.settings.freq_min,
        )?;

        if bands.distances.len() != qpoints.len()
            || bands.frequencies.len() != qpoints.len()
            || structure_factors.len() != qpoints.len()
        {
            return Err(PhononError::InconsistentOutput(format!(
                "{} points requested, engine returned {} distances, {} frequency sets and {} structure-factor sets",
                qpoints.len(),
                bands.distances.len(),
                bands.frequencies.len(),
                structure_factors.len()
            )));
        }

        let num_bands = bands.frequencies.first().map_or(0, Vec::len);
        let mut points = Vec::with_capacity(qpoints.len());
        for (((point, distance), frequencies), factors) in path
            .points()
            .iter()
            .zip(bands.distances)
            .zip(bands.frequencies)
            .zip(structure_factors)
        {
            if frequencies.len() != num_bands || factors.len() != num_bands {
                return Err(PhononError::InconsistentOutput(format!(
                    "point {} has {} frequencies and {} structure factors, expected {}",
                    point.index,
                    frequencies.len(),
                    factors.len(),
                    num_bands
                )));
            }
            debug!("Point {} at distance {:.6}", point.index, distance);
            points.push(PhononPoint {
                point: *point,
                distance,
                frequencies: frequencies
                    .into_iter()
                    .map(|f| f * self.settings.thz_to_mev)
                    .collect(),
                structure_factors: factors,
            });
        }

        Ok(points)
    }
}
