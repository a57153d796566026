/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Collapsing degenerate phonon bands into single observables

use super::errors::{Result, SpectrumError};

/// Default tolerance (meV) below which two frequencies are considered equal
pub const DEFAULT_DEGENERACY_TOLERANCE: f64 = 1e-4;

/// Partition band indices into sets of numerically equal frequencies
///
/// Sets are seeded in index order. A later index joins the current set when
/// it lies within `tolerance` of any member already in it, so chains of close
/// frequencies link together. Every index appears in exactly one set and each
/// set is ascending.
pub fn degenerate_sets(frequencies: &[f64], tolerance: f64) -> Vec<Vec<usize>> {
    let mut assigned = vec![false; frequencies.len()];
    let mut sets = Vec::new();

    for seed in 0..frequencies.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut set = vec![seed];

        for candidate in seed + 1..frequencies.len() {
            if assigned[candidate] {
                continue;
            }
            let linked = set
                .iter()
                .any(|&member| (frequencies[member] - frequencies[candidate]).abs() < tolerance);
            if linked {
                assigned[candidate] = true;
                set.push(candidate);
            }
        }
        sets.push(set);
    }

    sets
}

/// One degenerate set reduced to a single band
#[derive(Debug, Clone, PartialEq)]
pub struct DegenerateGroup {
    pub indices: Vec<usize>,
    /// Mean frequency of the members
    pub frequency: f64,
    /// Summed structure factor of the members
    pub structure_factor: f64,
}

/// Group degenerate bands and reduce each group
pub fn reduce(
    frequencies: &[f64],
    structure_factors: &[f64],
    tolerance: f64,
) -> Result<Vec<DegenerateGroup>> {
    if frequencies.len() != structure_factors.len() {
        return Err(SpectrumError::ShapeMismatch(format!(
            "{} frequencies but {} structure factors",
            frequencies.len(),
            structure_factors.len()
        )));
    }

    Ok(degenerate_sets(frequencies, tolerance)
        .into_iter()
        .map(|indices| {
            let frequency =
                indices.iter().map(|&i| frequencies[i]).sum::<f64>() / indices.len() as f64;
            let structure_factor = indices.iter().map(|&i| structure_factors[i]).sum();
            DegenerateGroup {
                indices,
                frequency,
                structure_factor,
            }
        })
        .collect())
}
