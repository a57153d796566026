/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Supercell force constants in the phonopy `FORCE_CONSTANTS` text format
//!
//! The file starts with a header holding the supercell atom count `N`
//! (optionally repeated), followed by `N × N` blocks. Each block is a line
//! with the 1-based atom pair `i j` and three rows of the 3×3 matrix in eV/Å².

use std::fs;
use std::path::Path;

use log::debug;

use super::errors::{PhononError, Result};
use crate::lattice::Matrix3;

const FILE_LABEL: &str = "FORCE_CONSTANTS";

/// Dense force-constant matrix Φ(i, j) over supercell atoms
#[derive(Debug, Clone, PartialEq)]
pub struct ForceConstants {
    num_atoms: usize,
    blocks: Vec<Matrix3>,
}

impl ForceConstants {
    pub fn new(num_atoms: usize, blocks: Vec<Matrix3>) -> Result<Self> {
        if num_atoms == 0 || blocks.len() != num_atoms * num_atoms {
            return Err(PhononError::InvalidForceConstants(format!(
                "expected {} blocks for {} atoms, got {}",
                num_atoms * num_atoms,
                num_atoms,
                blocks.len()
            )));
        }
        Ok(Self { num_atoms, blocks })
    }

    pub fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    /// Block Φ(i, j)
    pub fn get(&self, i: usize, j: usize) -> &Matrix3 {
        &self.blocks[i * self.num_atoms + j]
    }

    fn set(&mut self, i: usize, j: usize, block: Matrix3) {
        self.blocks[i * self.num_atoms + j] = block;
    }

    /// Largest |Σ_j Φ(i, j)| element over all rows
    pub fn max_acoustic_sum_violation(&self) -> f64 {
        (0..self.num_atoms)
            .map(|i| {
                let sum = (0..self.num_atoms).fold(Matrix3::zeros(), |acc, j| acc + *self.get(i, j));
                sum.rows().iter().flatten().fold(0.0f64, |m, v| m.max(v.abs()))
            })
            .fold(0.0, f64::max)
    }

    /// Impose index-permutation symmetry and the acoustic sum rule
    ///
    /// Each iteration cancels row and column averages and then averages
    /// Φ(i, j) with Φ(j, i)ᵀ. The diagonal blocks are finally replaced so every
    /// row sums to zero exactly.
    pub fn symmetrize(&mut self, level: u32) {
        let before = self.max_acoustic_sum_violation();
        for _ in 0..level {
            for _ in 0..2 {
                self.transpose();
                self.cancel_row_averages();
            }
            self.impose_permutation_symmetry();
        }
        self.impose_translational_symmetry();
        debug!(
            "Acoustic sum rule violation {:.3e} -> {:.3e} eV/Å²",
            before,
            self.max_acoustic_sum_violation()
        );
    }

    fn transpose(&mut self) {
        let n = self.num_atoms;
        let mut transposed = self.blocks.clone();
        for i in 0..n {
            for j in 0..n {
                transposed[i * n + j] = self.get(j, i).transpose();
            }
        }
        self.blocks = transposed;
    }

    fn cancel_row_averages(&mut self) {
        let n = self.num_atoms;
        for i in 0..n {
            let sum = (0..n).fold(Matrix3::zeros(), |acc, j| acc + *self.get(i, j));
            let mean = sum * (1.0 / n as f64);
            for j in 0..n {
                let block = *self.get(i, j) - mean;
                self.set(i, j, block);
            }
        }
    }

    fn impose_permutation_symmetry(&mut self) {
        let n = self.num_atoms;
        for i in 0..n {
            for j in i..n {
                let average = (*self.get(i, j) + self.get(j, i).transpose()) * 0.5;
                self.set(i, j, average);
                self.set(j, i, average.transpose());
            }
        }
    }

    fn impose_translational_symmetry(&mut self) {
        let n = self.num_atoms;
        for i in 0..n {
            self.set(i, i, Matrix3::zeros());
            let sum = (0..n).fold(Matrix3::zeros(), |acc, j| acc + *self.get(i, j));
            self.set(i, i, -(sum + sum.transpose()) * 0.5);
        }
    }
}

/// Read a `FORCE_CONSTANTS` file for a supercell of `num_atoms` atoms
pub fn read_force_constants<P: AsRef<Path>>(path: P, num_atoms: usize) -> Result<ForceConstants> {
    let content = fs::read_to_string(path)?;
    parse_force_constants(&content, num_atoms)
}

pub fn parse_force_constants(content: &str, num_atoms: usize) -> Result<ForceConstants> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_number, header) = lines
        .next()
        .ok_or_else(|| PhononError::parse(FILE_LABEL, 1, "file is empty"))?;
    let counts = parse_numbers::<usize>(header, line_number)?;
    match counts.as_slice() {
        [n] | [n, _] if *n != num_atoms => {
            return Err(PhononError::InvalidForceConstants(format!(
                "file holds {} atoms but the supercell has {}",
                n, num_atoms
            )))
        }
        [_] => {}
        [n, m] if n == m => {}
        [_, _] => {
            return Err(PhononError::InvalidForceConstants(
                "compact force constants are not supported, write the full N x N matrix"
                    .to_string(),
            ))
        }
        _ => return Err(PhononError::parse(FILE_LABEL, line_number, "expected atom count")),
    }

    let mut blocks = vec![Matrix3::zeros(); num_atoms * num_atoms];
    let mut seen = vec![false; num_atoms * num_atoms];

    for _ in 0..num_atoms * num_atoms {
        let (line_number, pair_line) = lines.next().ok_or_else(|| {
            PhononError::parse(FILE_LABEL, line_number, "unexpected end of file")
        })?;
        let pair = parse_numbers::<usize>(pair_line, line_number)?;
        let (i, j) = match pair.as_slice() {
            [i, j] if (1..=num_atoms).contains(i) && (1..=num_atoms).contains(j) => (i - 1, j - 1),
            _ => {
                return Err(PhononError::parse(
                    FILE_LABEL,
                    line_number,
                    format!("invalid atom pair '{}'", pair_line),
                ))
            }
        };

        let mut rows = [[0.0; 3]; 3];
        for row in rows.iter_mut() {
            let (line_number, row_line) = lines.next().ok_or_else(|| {
                PhononError::parse(FILE_LABEL, line_number, "truncated force-constant block")
            })?;
            let values = parse_numbers::<f64>(row_line, line_number)?;
            if values.len() != 3 {
                return Err(PhononError::parse(
                    FILE_LABEL,
                    line_number,
                    format!("expected 3 values, found {}", values.len()),
                ));
            }
            row.copy_from_slice(&values);
        }

        let index = i * num_atoms + j;
        if seen[index] {
            return Err(PhononError::parse(
                FILE_LABEL,
                line_number,
                format!("duplicate block for pair {} {}", i + 1, j + 1),
            ));
        }
        seen[index] = true;
        blocks[index] = Matrix3::new(rows);
    }

    ForceConstants::new(num_atoms, blocks)
}

fn parse_numbers<T: std::str::FromStr>(line: &str, line_number: usize) -> Result<Vec<T>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|_| {
                PhononError::parse(FILE_LABEL, line_number, format!("invalid number '{}'", token))
            })
        })
        .collect()
}
