/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! End-to-end S(Q,ω) calculation
//!
//! Stages run strictly in order: path construction, engine setup, phonon
//! queries, report and synthesis. Nothing is written until every stage has
//! succeeded, and the report is emitted only after the image is in place.

use std::io::Write;

use log::info;
use ndarray::Array2;

use crate::config::SqwConfig;
use crate::errors::Result;
use crate::output::{render_spectrum, PlotSettings, Report};
use crate::path::QPath;
use crate::phonon::{HarmonicEngine, PhononEngine, PhononPoint, PhononPropertyAdapter};
use crate::spectrum::{mode_tables, SpectralField, SpectralSynthesizer};

/// A validated configuration ready to run
#[derive(Debug, Clone)]
pub struct SqwPipeline {
    config: SqwConfig,
}

impl SqwPipeline {
    pub fn new(config: SqwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SqwConfig {
        &self.config
    }

    /// The path this configuration samples
    pub fn path(&self) -> QPath {
        QPath::new(
            self.config.path.origin(),
            self.config.path.direction(),
            self.config.path.n_points,
            &self.config.engine.primitive_matrix,
        )
    }

    /// Build the harmonic engine from the configured input files
    pub fn load_engine(&self) -> Result<HarmonicEngine> {
        let inputs = &self.config.inputs;
        let engine = HarmonicEngine::from_files(
            inputs.poscar.as_path(),
            &inputs.forces,
            inputs.born.as_deref(),
            self.config.engine.supercell,
            &self.config.engine.primitive_matrix,
        )?;
        Ok(engine.with_symmetrization_level(self.config.engine.symmetrization_level))
    }

    /// Compute with the engine described by the configuration
    pub fn run(&self) -> Result<SqwRun> {
        self.run_with_engine(self.load_engine()?)
    }

    /// Compute with any engine, e.g. a mock in tests
    pub fn run_with_engine<E: PhononEngine>(&self, engine: E) -> Result<SqwRun> {
        let path = self.path();
        info!("Path {} with {} points", path.label(), path.len());

        let adapter = PhononPropertyAdapter::new(engine, self.config.adapter_settings())?;
        let scattering = self.config.scattering.form_factor();
        let points = adapter.query(&path, self.config.spectrum.temperature, scattering)?;

        let report = Report::build(
            &path,
            &points,
            &self.config.engine.primitive_matrix,
            self.config.spectrum.degeneracy_tolerance,
            scattering.description(),
        )?;

        let (frequencies, structure_factors) = mode_tables(&points)?;
        let synthesizer = SpectralSynthesizer::new(self.config.spectrum.synthesis_parameters())?;
        let field = synthesizer.synthesize(
            &self.config.spectrum.energy.values(),
            &frequencies,
            &structure_factors,
        )?;
        info!(
            "Synthesized a {} x {} intensity field",
            field.num_points(),
            field.num_energies()
        );

        Ok(SqwRun {
            path,
            points,
            report,
            frequencies,
            field,
        })
    }

    /// Run, write the image, then print the report to `out`
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<SqwRun> {
        self.execute_with_engine(self.load_engine()?, out)
    }

    /// [`Self::execute`] with an injected engine
    pub fn execute_with_engine<E: PhononEngine, W: Write>(
        &self,
        engine: E,
        out: &mut W,
    ) -> Result<SqwRun> {
        let run = self.run_with_engine(engine)?;
        run.write_image(&self.config)?;
        run.report.write_to(out)?;
        Ok(run)
    }
}

/// Everything one run produced, held in memory
#[derive(Debug, Clone)]
pub struct SqwRun {
    path: QPath,
    points: Vec<PhononPoint>,
    report: Report,
    /// Raw band frequencies in meV, points × bands
    frequencies: Array2<f64>,
    field: SpectralField,
}

impl SqwRun {
    pub fn path(&self) -> &QPath {
        &self.path
    }

    pub fn points(&self) -> &[PhononPoint] {
        &self.points
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn frequencies(&self) -> &Array2<f64> {
        &self.frequencies
    }

    pub fn field(&self) -> &SpectralField {
        &self.field
    }

    pub fn plot_settings(&self, config: &SqwConfig) -> PlotSettings {
        PlotSettings {
            width: config.output.width,
            height: config.output.height,
            x_label: self.path.label(),
            ..PlotSettings::default()
        }
    }

    pub fn write_image(&self, config: &SqwConfig) -> Result<()> {
        render_spectrum(
            &self.field,
            &self.frequencies,
            &self.plot_settings(config),
            &config.output.image,
        )?;
        Ok(())
    }
}
