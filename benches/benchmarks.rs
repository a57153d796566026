/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use sqw_rs::spectrum::{
    degenerate_sets, reduce, EnergyAxis, SpectralSynthesizer, SynthesisParameters,
};

/// Six NaCl-like branches along 50 path points, acoustic pairs degenerate
fn mode_tables() -> (Array2<f64>, Array2<f64>) {
    let frequencies = Array2::from_shape_fn((50, 6), |(p, band)| {
        let t = (p + 1) as f64 / 50.0;
        let branch = [4.0, 4.0, 9.0, 16.0, 16.0, 22.0][band];
        branch * (0.3 + 0.7 * (t * std::f64::consts::FRAC_PI_2).sin())
    });
    let structure_factors = Array2::from_shape_fn((50, 6), |(p, band)| {
        0.05 + 0.01 * band as f64 + 0.001 * p as f64
    });
    (frequencies, structure_factors)
}

fn synthesis_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Spectral Synthesis");
    let (frequencies, structure_factors) = mode_tables();
    let synthesizer = SpectralSynthesizer::new(SynthesisParameters {
        temperature: 30.0,
        gamma: 0.3,
        eta: 0.003,
        boltzmann: 0.08617330,
    })
    .unwrap();

    for bins in [100, 1000] {
        let energies = EnergyAxis::new(-5.0, 35.0, bins).unwrap().values();
        group.bench_function(format!("synthesize_{}_bins", bins), |b| {
            b.iter(|| {
                black_box(
                    synthesizer
                        .synthesize(black_box(&energies), &frequencies, &structure_factors)
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

fn degeneracy_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Degeneracy Reduction");
    let (frequencies, structure_factors) = mode_tables();

    group.bench_function("degenerate_sets", |b| {
        b.iter(|| {
            for row in frequencies.outer_iter() {
                black_box(degenerate_sets(black_box(row.as_slice().unwrap()), 1e-4));
            }
        })
    });

    group.bench_function("reduce", |b| {
        b.iter(|| {
            for (f, s) in frequencies.outer_iter().zip(structure_factors.outer_iter()) {
                black_box(reduce(f.as_slice().unwrap(), s.as_slice().unwrap(), 1e-4).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, synthesis_benchmark, degeneracy_benchmark);
criterion_main!(benches);
