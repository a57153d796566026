/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Reciprocal-space paths
//!
//! A path is defined in the conventional basis by its origin `G` and
//! direction `d`, mapped once into the primitive basis and then sampled.

pub mod sampler;

pub use sampler::{sample, sample_offsets, PathPoint};

use crate::lattice::{to_primitive, Conventional, LatticeVector, Primitive, PrimitiveMatrix};

/// A sampled straight path `G → G + d`
#[derive(Debug, Clone)]
pub struct QPath {
    origin_conventional: LatticeVector<Conventional>,
    direction_conventional: LatticeVector<Conventional>,
    origin: LatticeVector<Primitive>,
    direction: LatticeVector<Primitive>,
    points: Vec<PathPoint>,
}

impl QPath {
    /// Map the conventional-basis segment into the primitive basis and sample it
    pub fn new(
        origin: LatticeVector<Conventional>,
        direction: LatticeVector<Conventional>,
        n_points: usize,
        matrix: &PrimitiveMatrix,
    ) -> Self {
        let origin_primitive = to_primitive(&origin, matrix);
        let direction_primitive = to_primitive(&direction, matrix);
        let points = sample(&origin_primitive, &direction_primitive, n_points);

        Self {
            origin_conventional: origin,
            direction_conventional: direction,
            origin: origin_primitive,
            direction: direction_primitive,
            points,
        }
    }

    /// Path origin `G` in the primitive basis
    pub fn origin(&self) -> &LatticeVector<Primitive> {
        &self.origin
    }

    pub fn direction(&self) -> &LatticeVector<Primitive> {
        &self.direction
    }

    pub fn origin_conventional(&self) -> &LatticeVector<Conventional> {
        &self.origin_conventional
    }

    pub fn direction_conventional(&self) -> &LatticeVector<Conventional> {
        &self.direction_conventional
    }

    /// Sampled points, origin excluded
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Reduced wavevectors `q` of all points
    pub fn qpoints(&self) -> Vec<LatticeVector<Primitive>> {
        self.points.iter().map(|point| point.q).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis label such as `[3 3 3] to [3.5 3.5 3.5]`
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.origin_conventional,
            self.origin_conventional + self.direction_conventional
        )
    }
}
