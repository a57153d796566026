/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use sqw_rs::config::ScatteringModel;
use sqw_rs::lattice::{LatticeVector, Primitive, PrimitiveMatrix};
use sqw_rs::phonon::{
    ForceInput, FormFactor, HarmonicEngine, MeshConfig, PhononEngine, PhononError,
    ScatteringLengths,
};
use sqw_rs::utils::constants::EV_ANGSTROM_AMU_TO_THZ;
use sqw_rs::{SqwConfig, SqwPipeline};
use tempfile::{tempdir, TempDir};

const SPRING: f64 = 1.0;
const LATTICE: f64 = 2.0;
const ARGON_MASS: f64 = 39.948;

const POSCAR: &str = "simple cubic argon
1.0
2.0 0.0 0.0
0.0 2.0 0.0
0.0 0.0 2.0
Ar
1
Direct
0.0 0.0 0.0
";

const SUPERCELL_ATOMS: usize = 27;

/// Nearest-neighbour springs along the cube axes in a 3x3x3 supercell
fn spring_blocks() -> Vec<[[f64; 3]; 3]> {
    let index = |i: usize, j: usize, k: usize| (i % 3) + 3 * (j % 3) + 9 * (k % 3);
    let n = SUPERCELL_ATOMS;
    let mut blocks = vec![[[0.0f64; 3]; 3]; n * n];
    for k in 0..3 {
        for j in 0..3 {
            for i in 0..3 {
                let a = index(i, j, k);
                for axis in 0..3 {
                    blocks[a * n + a][axis][axis] += 2.0 * SPRING;
                }
                let neighbours = [
                    (index(i + 1, j, k), 0),
                    (index(i + 2, j, k), 0),
                    (index(i, j + 1, k), 1),
                    (index(i, j + 2, k), 1),
                    (index(i, j, k + 1), 2),
                    (index(i, j, k + 2), 2),
                ];
                for (b, axis) in neighbours {
                    blocks[a * n + b][axis][axis] -= SPRING;
                }
            }
        }
    }
    blocks
}

fn force_constants_text() -> String {
    let n = SUPERCELL_ATOMS;
    let blocks = spring_blocks();
    let mut text = format!("{} {}\n", n, n);
    for a in 0..n {
        for b in 0..n {
            writeln!(text, "{} {}", a + 1, b + 1).unwrap();
            for row in &blocks[a * n + b] {
                writeln!(text, "{:.10} {:.10} {:.10}", row[0], row[1], row[2]).unwrap();
            }
        }
    }
    text
}

/// Atom 1 displaced along each axis, forces `F_j = -u · Φ(1, j)`
fn force_sets_text() -> String {
    let n = SUPERCELL_ATOMS;
    let blocks = spring_blocks();
    let mut text = format!("{}\n3\n", n);
    for axis in 0..3 {
        let mut u = [0.0; 3];
        u[axis] = 0.01;
        writeln!(text, "\n1\n{:.10} {:.10} {:.10}", u[0], u[1], u[2]).unwrap();
        for b in 0..n {
            let block = &blocks[b];
            let force: Vec<f64> = (0..3)
                .map(|beta| -(0..3).map(|alpha| u[alpha] * block[alpha][beta]).sum::<f64>())
                .collect();
            writeln!(text, "{:.12} {:.12} {:.12}", force[0], force[1], force[2]).unwrap();
        }
    }
    text
}

fn write_inputs() -> (TempDir, PathBuf, ForceInput) {
    let directory = tempdir().unwrap();
    let poscar = directory.path().join("POSCAR");
    let force_constants = directory.path().join("FORCE_CONSTANTS");
    fs::write(&poscar, POSCAR).unwrap();
    fs::write(&force_constants, force_constants_text()).unwrap();
    (directory, poscar, ForceInput::ForceConstants(force_constants))
}

fn engine(poscar: &Path, forces: &ForceInput) -> HarmonicEngine {
    HarmonicEngine::from_files(poscar, forces, None, [3, 3, 3], &PrimitiveMatrix::identity())
        .unwrap()
}

fn expected_frequency(t: f64) -> f64 {
    (2.0 * SPRING / ARGON_MASS * (1.0 - (2.0 * PI * t).cos())).sqrt() * EV_ANGSTROM_AMU_TO_THZ
}

fn argon_lengths() -> ScatteringLengths {
    let mut lengths = HashMap::new();
    lengths.insert("Ar".to_string(), 1.909);
    ScatteringLengths::new(lengths)
}

#[test]
fn test_triply_degenerate_dispersion() {
    let (_directory, poscar, forces) = write_inputs();
    let mut engine = engine(&poscar, &forces);
    engine.symmetrize_force_constants().unwrap();

    let qpoints: Vec<LatticeVector<Primitive>> = (1..=5)
        .map(|k| {
            let t = 0.1 * k as f64;
            LatticeVector::new(t, t, t)
        })
        .collect();
    let bands = engine
        .band_structure(&LatticeVector::zero(), &qpoints)
        .unwrap();

    assert_eq!(bands.frequencies.len(), 5);
    for (k, frequencies) in bands.frequencies.iter().enumerate() {
        let t = 0.1 * (k + 1) as f64;
        assert_eq!(frequencies.len(), 3);
        for &f in frequencies {
            assert_relative_eq!(f, expected_frequency(t), max_relative = 1e-8);
        }
        // Distances are measured from the start point, reciprocal vectors without 2π
        assert_relative_eq!(
            bands.distances[k],
            t * 3f64.sqrt() / LATTICE,
            max_relative = 1e-10
        );
    }
}

#[test]
fn test_structure_factor_requires_mesh() {
    let (_directory, poscar, forces) = write_inputs();
    let engine = engine(&poscar, &forces);
    let result = engine.dynamic_structure_factor(
        &[LatticeVector::new(0.1, 0.1, 0.1)],
        &LatticeVector::new(1.0, 1.0, 1.0),
        30.0,
        &argon_lengths(),
        1e-3,
    );
    assert!(matches!(result, Err(PhononError::MeshNotSolved)));
}

#[test]
fn test_mesh_configuration_checked() {
    let (_directory, poscar, forces) = write_inputs();
    let mut engine = engine(&poscar, &forces);
    let config = MeshConfig {
        is_mesh_symmetry: true,
        ..MeshConfig::default()
    };
    assert!(engine.solve_mesh(&config).is_err());
}

#[test]
fn test_structure_factors() {
    let (_directory, poscar, forces) = write_inputs();
    let mut engine = engine(&poscar, &forces);
    engine.symmetrize_force_constants().unwrap();
    engine
        .solve_mesh(&MeshConfig {
            mesh: [4, 4, 4],
            ..MeshConfig::default()
        })
        .unwrap();

    let qpoints = [LatticeVector::new(0.2, 0.2, 0.2)];
    let g = LatticeVector::new(1.0, 1.0, 1.0);
    let lengths = argon_lengths();
    let cold = engine
        .dynamic_structure_factor(&qpoints, &g, 10.0, &lengths, 1e-3)
        .unwrap();
    let hot = engine
        .dynamic_structure_factor(&qpoints, &g, 300.0, &lengths, 1e-3)
        .unwrap();

    assert_eq!(cold[0].len(), 3);
    assert!(cold[0].iter().all(|&s| s >= 0.0));
    let total_cold: f64 = cold[0].iter().sum();
    let total_hot: f64 = hot[0].iter().sum();
    assert!(total_cold > 0.0);
    // Thermal population outweighs the extra Debye-Waller damping here
    assert!(total_hot > total_cold);

    // A mode cutoff above every frequency silences all modes
    let silenced = engine
        .dynamic_structure_factor(&qpoints, &g, 10.0, &lengths, 100.0)
        .unwrap();
    assert!(silenced[0].iter().all(|&s| s == 0.0));
}

#[test]
fn test_pipeline_with_harmonic_engine() {
    let (_directory, poscar, forces) = write_inputs();
    let mut config = SqwConfig::default();
    config.inputs.poscar = poscar;
    config.inputs.forces = forces;
    config.inputs.born = None;
    config.engine.supercell = [3, 3, 3];
    config.engine.primitive_matrix = PrimitiveMatrix::identity();
    config.engine.mesh.mesh = [3, 3, 3];
    config.path.origin = [1.0, 1.0, 1.0];
    config.path.n_points = 6;
    config.scattering = ScatteringModel::ScatteringLengths {
        lengths: argon_lengths(),
    };
    assert_eq!(config.scattering.form_factor().description(), "scattering lengths");

    let run = SqwPipeline::new(config).unwrap().run().unwrap();
    let report = run.report();
    assert_eq!(report.lines.len(), 5);
    for (k, line) in report.lines.iter().enumerate() {
        let t = 0.1 * (k + 1) as f64;
        assert_eq!(line.groups.len(), 1);
        assert_eq!(line.groups[0].indices, vec![0, 1, 2]);
        assert_relative_eq!(
            line.groups[0].frequency,
            expected_frequency(t) * 4.13567,
            max_relative = 1e-8
        );
        assert_relative_eq!(line.momentum_transfer.components().x, 1.0 + t, epsilon = 1e-12);
    }
    assert_eq!(report.header[4], "# Running with scattering lengths");
    assert_eq!(run.field().num_points(), 5);
}

#[test]
fn test_missing_force_constants() {
    let (directory, poscar, _) = write_inputs();
    let missing = ForceInput::ForceConstants(directory.path().join("NOPE"));
    let result = HarmonicEngine::from_files(
        poscar.as_path(),
        &missing,
        None,
        [3, 3, 3],
        &PrimitiveMatrix::identity(),
    );
    assert!(matches!(result, Err(PhononError::IoError(_))));
}

#[test]
fn test_force_sets_match_force_constants() {
    let (directory, poscar, forces) = write_inputs();
    let force_sets = directory.path().join("FORCE_SETS");
    fs::write(&force_sets, force_sets_text()).unwrap();

    let mut from_constants = engine(&poscar, &forces);
    let mut from_sets = engine(&poscar, &ForceInput::ForceSets(force_sets));
    from_constants.symmetrize_force_constants().unwrap();
    from_sets.symmetrize_force_constants().unwrap();

    let qpoints = [
        LatticeVector::new(0.1, 0.0, 0.0),
        LatticeVector::new(0.2, 0.3, 0.1),
        LatticeVector::new(0.5, 0.5, 0.5),
    ];
    let expected = from_constants
        .band_structure(&LatticeVector::zero(), &qpoints)
        .unwrap();
    let fitted = from_sets
        .band_structure(&LatticeVector::zero(), &qpoints)
        .unwrap();
    for (a, b) in expected.frequencies.iter().zip(&fitted.frequencies) {
        for (fa, fb) in a.iter().zip(b) {
            assert_relative_eq!(fa, fb, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_force_sets_need_three_directions() {
    let (directory, poscar, _) = write_inputs();
    let force_sets = directory.path().join("FORCE_SETS");
    // Keep only the x and y displacements
    let planar: String = force_sets_text()
        .replacen("\n3\n", "\n2\n", 1)
        .lines()
        .take(2 + 2 * (3 + SUPERCELL_ATOMS))
        .map(|line| format!("{}\n", line))
        .collect();
    fs::write(&force_sets, planar).unwrap();

    let result = HarmonicEngine::from_files(
        poscar.as_path(),
        &ForceInput::ForceSets(force_sets),
        None,
        [3, 3, 3],
        &PrimitiveMatrix::identity(),
    );
    assert!(matches!(result, Err(PhononError::InvalidForceSets(_))));
}
