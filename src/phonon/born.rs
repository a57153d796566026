/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Born effective charges and the non-analytical term correction
//!
//! `BORN` holds an optional unit-conversion factor, the high-frequency
//! dielectric tensor and one Born charge tensor per primitive-cell atom,
//! each written as nine numbers on a line. Lines starting with `#` are ignored.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use super::errors::{PhononError, Result};
use crate::lattice::{Matrix3, Vector3D};
use crate::utils::constants::HARTREE_BOHR;

const FILE_LABEL: &str = "BORN";

/// |q| below which no non-analytical correction is applied (Å⁻¹, without 2π)
pub const NAC_Q_THRESHOLD: f64 = 1e-5;

#[derive(Debug, Clone, PartialEq)]
pub struct BornCharges {
    factor: f64,
    dielectric: Matrix3,
    charges: Vec<Matrix3>,
}

impl BornCharges {
    pub fn new(factor: f64, dielectric: Matrix3, charges: Vec<Matrix3>) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PhononError::InvalidBorn(format!(
                "unit conversion factor must be positive, got {}",
                factor
            )));
        }
        if dielectric.determinant().abs() < 1e-12 {
            return Err(PhononError::InvalidBorn(
                "dielectric tensor is singular".to_string(),
            ));
        }
        Ok(Self {
            factor,
            dielectric,
            charges,
        })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn dielectric(&self) -> &Matrix3 {
        &self.dielectric
    }

    pub fn charges(&self) -> &[Matrix3] {
        &self.charges
    }

    /// Wang-method force-constant term between primitive atoms at wavevector `q`
    ///
    /// `q_cartesian` excludes the 2π factor and `volume` is the primitive-cell
    /// volume in Å³. Returns `None` at Γ, where the direction of approach is
    /// undefined. The result is indexed `[i * n + j]` and is added to every
    /// supercell force constant between images of `i` and `j`, divided by the
    /// number of primitive cells in the supercell.
    pub fn wang_correction(&self, q_cartesian: &Vector3D, volume: f64) -> Option<Vec<Matrix3>> {
        if q_cartesian.length() < NAC_Q_THRESHOLD {
            return None;
        }

        let screening = self.dielectric.quadratic_form(q_cartesian);
        let constant = self.factor * 4.0 * PI / volume / screening;
        let projected: Vec<Vector3D> = self
            .charges
            .iter()
            .map(|z| z.left_mul(q_cartesian))
            .collect();

        let n = projected.len();
        let mut blocks = Vec::with_capacity(n * n);
        for a in &projected {
            for b in &projected {
                let (a, b) = (a.to_array(), b.to_array());
                let mut rows = [[0.0; 3]; 3];
                for (alpha, row) in rows.iter_mut().enumerate() {
                    for (beta, value) in row.iter_mut().enumerate() {
                        *value = a[alpha] * b[beta] * constant;
                    }
                }
                blocks.push(Matrix3::new(rows));
            }
        }
        Some(blocks)
    }
}

pub fn read_born<P: AsRef<Path>>(path: P, num_atoms: usize) -> Result<BornCharges> {
    let content = fs::read_to_string(path)?;
    parse_born(&content, num_atoms)
}

/// Parse `BORN` content for a primitive cell of `num_atoms` atoms
pub fn parse_born(content: &str, num_atoms: usize) -> Result<BornCharges> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .peekable();

    let mut factor = HARTREE_BOHR;
    if let Some(&(line_number, first)) = lines.peek() {
        let values = parse_numbers(first, line_number)?;
        if values.len() == 1 {
            factor = values[0];
            lines.next();
        }
    }

    let (line_number, line) = lines
        .next()
        .ok_or_else(|| PhononError::parse(FILE_LABEL, 1, "missing dielectric tensor"))?;
    let dielectric = parse_tensor(line, line_number)?;

    let mut charges = Vec::with_capacity(num_atoms);
    for (line_number, line) in lines {
        charges.push(parse_tensor(line, line_number)?);
    }
    if charges.len() != num_atoms {
        return Err(PhononError::InvalidBorn(format!(
            "found {} Born charge tensors for {} primitive-cell atoms",
            charges.len(),
            num_atoms
        )));
    }

    BornCharges::new(factor, dielectric, charges)
}

fn parse_tensor(line: &str, line_number: usize) -> Result<Matrix3> {
    let values = parse_numbers(line, line_number)?;
    if values.len() != 9 {
        return Err(PhononError::parse(
            FILE_LABEL,
            line_number,
            format!("expected 9 tensor components, found {}", values.len()),
        ));
    }
    Ok(Matrix3::new([
        [values[0], values[1], values[2]],
        [values[3], values[4], values[5]],
        [values[6], values[7], values[8]],
    ]))
}

fn parse_numbers(line: &str, line_number: usize) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                PhononError::parse(FILE_LABEL, line_number, format!("invalid number '{}'", token))
            })
        })
        .collect()
}
