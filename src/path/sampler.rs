/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Sampling of straight reciprocal-space segments
//!
//! A segment `G → G + d` is sampled at offsets `k/(n-1)` for `k = 1..n-1`.
//! The origin (`k = 0`) is skipped because the phonon engine reports a
//! different number of bands at Γ.

use crate::lattice::{LatticeVector, Primitive};

/// Fractional offsets along a segment, origin excluded
///
/// # Arguments
///
/// * `n_points` - Number of samples including the (skipped) origin. Values
///   below 2 give an empty sequence.
///
/// # Returns
///
/// `n_points - 1` strictly increasing offsets, the first at `1/(n_points-1)`
/// and the last at exactly `1.0`.
pub fn sample_offsets(n_points: usize) -> Vec<f64> {
    if n_points < 2 {
        return Vec::new();
    }
    let steps = (n_points - 1) as f64;
    (1..n_points).map(|k| k as f64 / steps).collect()
}

/// A sampled point of a reciprocal-space path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Position in the sampled sequence, starting at 0
    pub index: usize,
    /// Fraction of the direction vector travelled, in (0, 1]
    pub offset: f64,
    /// Reduced wavevector relative to the path origin
    pub q: LatticeVector<Primitive>,
    /// Full momentum transfer `G + q`
    pub momentum_transfer: LatticeVector<Primitive>,
}

/// Sample the segment `origin → origin + direction` in the primitive basis
pub fn sample(
    origin: &LatticeVector<Primitive>,
    direction: &LatticeVector<Primitive>,
    n_points: usize,
) -> Vec<PathPoint> {
    sample_offsets(n_points)
        .into_iter()
        .enumerate()
        .map(|(index, offset)| {
            let q = *direction * offset;
            PathPoint {
                index,
                offset,
                q,
                momentum_transfer: *origin + q,
            }
        })
        .collect()
}
