/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use sqw_rs::lattice::{LatticeVector, Primitive};
use sqw_rs::phonon::{
    AdapterSettings, BandStructure, FormFactor, MeshConfig, PhononEngine, PhononError,
    PhononPropertyAdapter, Result as PhononResult,
};
use sqw_rs::spectrum::EnergyAxis;
use sqw_rs::{SqwConfig, SqwError, SqwPipeline};

/// Engine returning fixed modes at every point
#[derive(Debug, Default)]
struct ToyEngine {
    frequencies: Vec<f64>,
    structure_factors: Vec<f64>,
    symmetrized: bool,
    solved: bool,
    fail_mesh: bool,
}

impl ToyEngine {
    fn new(frequencies: Vec<f64>, structure_factors: Vec<f64>) -> Self {
        Self {
            frequencies,
            structure_factors,
            ..Self::default()
        }
    }
}

impl PhononEngine for ToyEngine {
    fn symmetrize_force_constants(&mut self) -> PhononResult<()> {
        self.symmetrized = true;
        Ok(())
    }

    fn solve_mesh(&mut self, _config: &MeshConfig) -> PhononResult<()> {
        if self.fail_mesh {
            return Err(PhononError::InvalidMesh("toy failure".to_string()));
        }
        assert!(self.symmetrized, "mesh solved before symmetrization");
        self.solved = true;
        Ok(())
    }

    fn band_structure(
        &self,
        _start: &LatticeVector<Primitive>,
        qpoints: &[LatticeVector<Primitive>],
    ) -> PhononResult<BandStructure> {
        if !self.solved {
            return Err(PhononError::MeshNotSolved);
        }
        Ok(BandStructure {
            distances: (1..=qpoints.len()).map(|i| i as f64 * 0.1).collect(),
            frequencies: vec![self.frequencies.clone(); qpoints.len()],
        })
    }

    fn dynamic_structure_factor(
        &self,
        qpoints: &[LatticeVector<Primitive>],
        _g_point: &LatticeVector<Primitive>,
        _temperature: f64,
        _form_factor: &dyn FormFactor,
        _freq_min: f64,
    ) -> PhononResult<Vec<Vec<f64>>> {
        if !self.solved {
            return Err(PhononError::MeshNotSolved);
        }
        Ok(vec![self.structure_factors.clone(); qpoints.len()])
    }
}

fn toy_config() -> SqwConfig {
    let mut config = SqwConfig::default();
    config.path.n_points = 2;
    config.spectrum.thz_to_mev = 1.0;
    config.spectrum.energy = EnergyAxis::new(0.0, 30.0, 31).unwrap();
    config
}

#[test]
fn test_toy_end_to_end() {
    let pipeline = SqwPipeline::new(toy_config()).unwrap();
    let run = pipeline
        .run_with_engine(ToyEngine::new(vec![5.0, 5.0], vec![0.3, 0.4]))
        .unwrap();

    let report = run.report();
    assert_eq!(report.lines.len(), 1);
    let groups = &report.lines[0].groups;
    assert_eq!(groups.len(), 1);
    assert_relative_eq!(groups[0].frequency, 5.0);
    assert_relative_eq!(groups[0].structure_factor, 0.7, epsilon = 1e-12);

    let line = report.lines[0].to_string();
    assert!(line.ends_with("  5.000000  0.700000"), "unexpected line {}", line);

    let field = run.field();
    assert_eq!(field.energies()[5], 5.0);
    assert_eq!(field.energies()[25], 25.0);
    assert!(field.intensity(0, 5) > field.intensity(0, 25));
}

#[test]
fn test_synthesis_uses_raw_modes() {
    let pipeline = SqwPipeline::new(toy_config()).unwrap();
    let merged = pipeline
        .run_with_engine(ToyEngine::new(vec![5.0, 5.0], vec![0.3, 0.4]))
        .unwrap();
    let single = pipeline
        .run_with_engine(ToyEngine::new(vec![5.0], vec![0.7]))
        .unwrap();

    // Line shapes are linear in S, so two degenerate modes equal one summed mode
    for m in 0..31 {
        assert_relative_eq!(
            merged.field().intensity(0, m),
            single.field().intensity(0, m),
            max_relative = 1e-12
        );
    }
    assert_eq!(merged.frequencies().ncols(), 2);
}

#[test]
fn test_configuration_errors_precede_engine() {
    let mut config = toy_config();
    config.path.n_points = 1;
    assert!(matches!(
        SqwPipeline::new(config),
        Err(SqwError::ConfigError(_))
    ));

    let mut config = toy_config();
    config.spectrum.temperature = -1.0;
    assert!(SqwPipeline::new(config).is_err());
}

#[test]
fn test_engine_failure_aborts_run() {
    let directory = tempfile::tempdir().unwrap();
    let mut config = toy_config();
    config.output.image = directory.path().join("Sqom.png");

    let pipeline = SqwPipeline::new(config).unwrap();
    let engine = ToyEngine {
        fail_mesh: true,
        ..ToyEngine::new(vec![5.0], vec![1.0])
    };
    assert!(matches!(
        pipeline.run_with_engine(engine),
        Err(SqwError::PhononError(_))
    ));
    assert!(!directory.path().join("Sqom.png").exists());
}

#[test]
fn test_adapter_rejects_ragged_output() {
    let settings = AdapterSettings {
        mesh: MeshConfig::default(),
        freq_min: 1e-3,
        thz_to_mev: 1.0,
    };
    let adapter =
        PhononPropertyAdapter::new(ToyEngine::new(vec![1.0, 2.0], vec![0.5]), settings).unwrap();
    let path = SqwPipeline::new(toy_config()).unwrap().path();
    let form_factor = SqwConfig::default().scattering;

    assert!(matches!(
        adapter.query(&path, 30.0, form_factor.form_factor()),
        Err(PhononError::InconsistentOutput(_))
    ));
}

#[test]
fn test_execute_writes_image_then_report() {
    let directory = tempfile::tempdir().unwrap();
    let image = directory.path().join("Sqom.png");
    let mut config = toy_config();
    config.output.image = image.clone();
    config.output.width = 320;
    config.output.height = 240;

    let pipeline = SqwPipeline::new(config).unwrap();
    let mut out = Vec::new();
    pipeline
        .execute_with_engine(ToyEngine::new(vec![5.0, 5.0], vec![0.3, 0.4]), &mut out)
        .unwrap();

    let bytes = std::fs::read(&image).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));

    let report = String::from_utf8(out).unwrap();
    assert!(report.starts_with('#'));
    assert!(report.contains("5.000000  0.700000"), "report was {}", report);
    assert!(report.ends_with("\n\n\n"));
}

#[test]
fn test_execute_without_image_prints_no_report() {
    let directory = tempfile::tempdir().unwrap();
    let mut config = toy_config();
    config.output.image = directory.path().join("missing").join("Sqom.png");

    let pipeline = SqwPipeline::new(config).unwrap();
    let mut out = Vec::new();
    let result =
        pipeline.execute_with_engine(ToyEngine::new(vec![5.0, 5.0], vec![0.3, 0.4]), &mut out);

    assert!(matches!(result, Err(SqwError::OutputError(_))));
    assert!(out.is_empty());
}
