/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Displacement-force data sets in the phonopy `FORCE_SETS` text format
//!
//! ```text
//! N                  supercell atom count
//! n                  number of displacements
//!
//! a                  1-based index of the displaced atom
//! ux uy uz           displacement in Å
//! fx fy fz           N lines of forces in eV/Å
//! ...
//! ```
//!
//! Force constants are fitted without crystal symmetry. Every primitive atom
//! therefore needs displacements spanning all three Cartesian directions, and
//! the remaining supercell rows follow from lattice translations alone.

use std::fs;
use std::path::Path;

use log::{debug, info};

use super::errors::{PhononError, Result};
use super::force_constants::ForceConstants;
use crate::lattice::{Matrix3, Vector3D};
use crate::structure::{Crystal, PrimitiveCell, SYMPREC};

const FILE_LABEL: &str = "FORCE_SETS";

/// Normalized Gram determinants below this do not span three directions
const SPAN_THRESHOLD: f64 = 1e-6;

/// One displaced atom and the forces it induces on every supercell atom
#[derive(Debug, Clone, PartialEq)]
pub struct Displacement {
    /// 0-based supercell index of the displaced atom
    pub atom: usize,
    /// Å
    pub displacement: Vector3D,
    /// eV/Å, one entry per supercell atom
    pub forces: Vec<Vector3D>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForceSets {
    num_atoms: usize,
    displacements: Vec<Displacement>,
}

impl ForceSets {
    pub fn new(num_atoms: usize, displacements: Vec<Displacement>) -> Result<Self> {
        for (k, entry) in displacements.iter().enumerate() {
            if entry.atom >= num_atoms {
                return Err(PhononError::InvalidForceSets(format!(
                    "displacement {} moves atom {} of a {}-atom supercell",
                    k + 1,
                    entry.atom + 1,
                    num_atoms
                )));
            }
            if entry.forces.len() != num_atoms {
                return Err(PhononError::InvalidForceSets(format!(
                    "displacement {} lists {} forces for {} atoms",
                    k + 1,
                    entry.forces.len(),
                    num_atoms
                )));
            }
        }
        Ok(Self {
            num_atoms,
            displacements,
        })
    }

    pub fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    pub fn displacements(&self) -> &[Displacement] {
        &self.displacements
    }

    /// Fit the full supercell force constants
    ///
    /// Each displacement is first translated onto the supercell atom that
    /// represents its primitive atom, with the mean force (drift) removed.
    /// The row Φ(p, ·) is the least-squares solution of `F = -U · Φ`, and every
    /// other row is a lattice translation of one of these.
    pub fn produce_force_constants(
        &self,
        supercell: &Crystal,
        primitive: &PrimitiveCell,
    ) -> Result<ForceConstants> {
        let n = self.num_atoms;
        if n != supercell.num_atoms() {
            return Err(PhononError::InvalidForceSets(format!(
                "file holds {} atoms but the supercell has {}",
                n,
                supercell.num_atoms()
            )));
        }
        let s2p = primitive.s2p();
        let p2s = primitive.p2s();

        let mut records: Vec<Vec<(Vector3D, Vec<Vector3D>)>> = vec![Vec::new(); p2s.len()];
        for entry in &self.displacements {
            let p = s2p[entry.atom];
            let drift = entry
                .forces
                .iter()
                .fold(Vector3D::origin(), |acc, f| acc + *f)
                * (1.0 / n as f64);
            let map = translation_map(supercell, entry.atom, p2s[p])?;

            let mut forces = vec![Vector3D::origin(); n];
            for (j, force) in entry.forces.iter().enumerate() {
                forces[map[j]] = *force - drift;
            }
            records[p].push((entry.displacement, forces));
        }

        let mut blocks = vec![Matrix3::zeros(); n * n];
        for (p, set) in records.iter().enumerate() {
            let inverse = gram_inverse(set.iter().map(|(u, _)| u), p)?;
            let row: Vec<Matrix3> = (0..n)
                .map(|j| {
                    let projected = set.iter().fold(Matrix3::zeros(), |acc, (u, forces)| {
                        acc + outer(u, &forces[j])
                    });
                    -(inverse * projected)
                })
                .collect();

            for i in (0..n).filter(|&i| s2p[i] == p) {
                let map = translation_map(supercell, p2s[p], i)?;
                for (j, block) in row.iter().enumerate() {
                    blocks[i * n + map[j]] = *block;
                }
            }
            debug!(
                "Fitted force constants of primitive atom {} from {} displacements",
                p,
                set.len()
            );
        }

        info!(
            "Built {}x{} force constants from {} displacements",
            n,
            n,
            self.displacements.len()
        );
        ForceConstants::new(n, blocks)
    }
}

/// Inverse of `Σ u uᵀ`, rejecting sets that do not span three directions
fn gram_inverse<'a>(
    displacements: impl Iterator<Item = &'a Vector3D>,
    atom: usize,
) -> Result<Matrix3> {
    let gram = displacements.fold(Matrix3::zeros(), |acc, u| acc + outer(u, u));
    let scale = (gram.get(0, 0) + gram.get(1, 1) + gram.get(2, 2)) / 3.0;
    if scale <= 0.0 {
        return Err(PhononError::InvalidForceSets(format!(
            "primitive atom {} is never displaced",
            atom
        )));
    }

    let normalized = gram * (1.0 / scale);
    if normalized.determinant() < SPAN_THRESHOLD {
        return Err(PhononError::InvalidForceSets(format!(
            "displacements of primitive atom {} do not span three directions",
            atom
        )));
    }
    Ok(normalized.inverse()? * (1.0 / scale))
}

fn outer(a: &Vector3D, b: &Vector3D) -> Matrix3 {
    let mut rows = [[0.0; 3]; 3];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = a[i] * b[j];
        }
    }
    Matrix3::new(rows)
}

/// Supercell permutation induced by the translation carrying atom `from` onto `to`
///
/// `map[j]` is the atom found at `r_j + (r_to - r_from)`.
fn translation_map(supercell: &Crystal, from: usize, to: usize) -> Result<Vec<usize>> {
    let n = supercell.num_atoms();
    if from == to {
        return Ok((0..n).collect());
    }

    let lattice = supercell.lattice();
    let shift = supercell.site(to).position - supercell.site(from).position;
    (0..n)
        .map(|j| {
            let target = supercell.site(j).position + shift;
            supercell
                .sites()
                .iter()
                .position(|site| {
                    let delta = target - site.position;
                    lattice
                        .fractional_to_cartesian(&(delta - delta.round()))
                        .length()
                        < SYMPREC
                })
                .ok_or_else(|| {
                    PhononError::InvalidForceSets(format!(
                        "atom {} has no image under the translation from atom {} to atom {}",
                        j + 1,
                        from + 1,
                        to + 1
                    ))
                })
        })
        .collect()
}

/// Read a `FORCE_SETS` file for a supercell of `num_atoms` atoms
pub fn read_force_sets<P: AsRef<Path>>(path: P, num_atoms: usize) -> Result<ForceSets> {
    let content = fs::read_to_string(path)?;
    parse_force_sets(&content, num_atoms)
}

pub fn parse_force_sets(content: &str, num_atoms: usize) -> Result<ForceSets> {
    let mut cursor = Cursor::new(content);

    let (line_number, header) = cursor.take("the atom count")?;
    if parse_numbers::<f64>(header, line_number)?.len() == 6 {
        return Err(PhononError::InvalidForceSets(
            "per-structure (type-2) force sets are not supported".to_string(),
        ));
    }
    let file_atoms = single_count(header, line_number)?;
    if file_atoms != num_atoms {
        return Err(PhononError::InvalidForceSets(format!(
            "file holds {} atoms but the supercell has {}",
            file_atoms, num_atoms
        )));
    }

    let count = cursor.count("the displacement count")?;
    let mut displacements = Vec::with_capacity(count);
    for _ in 0..count {
        let atom = cursor.count("a displaced atom")?;
        if atom == 0 || atom > num_atoms {
            return Err(PhononError::InvalidForceSets(format!(
                "displaced atom {} outside 1..={}",
                atom, num_atoms
            )));
        }
        let displacement = cursor.vector("a displacement")?;
        let forces = (0..num_atoms)
            .map(|_| cursor.vector("a force"))
            .collect::<Result<Vec<_>>>()?;
        displacements.push(Displacement {
            atom: atom - 1,
            displacement,
            forces,
        });
    }

    ForceSets::new(num_atoms, displacements)
}

/// Non-empty lines with their 1-based line numbers
struct Cursor<'a> {
    lines: Vec<(usize, &'a str)>,
    next: usize,
}

impl<'a> Cursor<'a> {
    fn new(content: &'a str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();
        Self { lines, next: 0 }
    }

    fn take(&mut self, what: &str) -> Result<(usize, &'a str)> {
        let line = self.lines.get(self.next).copied().ok_or_else(|| {
            let last = self.lines.last().map_or(1, |(number, _)| *number);
            PhononError::parse(
                FILE_LABEL,
                last,
                format!("unexpected end of file, expected {}", what),
            )
        })?;
        self.next += 1;
        Ok(line)
    }

    fn count(&mut self, what: &str) -> Result<usize> {
        let (line_number, line) = self.take(what)?;
        single_count(line, line_number)
    }

    fn vector(&mut self, what: &str) -> Result<Vector3D> {
        let (line_number, line) = self.take(what)?;
        match parse_numbers::<f64>(line, line_number)?.as_slice() {
            [x, y, z] => Ok(Vector3D::new(*x, *y, *z)),
            values => Err(PhononError::parse(
                FILE_LABEL,
                line_number,
                format!("expected 3 values for {}, found {}", what, values.len()),
            )),
        }
    }
}

fn single_count(line: &str, line_number: usize) -> Result<usize> {
    match parse_numbers::<usize>(line, line_number)?.as_slice() {
        [n] => Ok(*n),
        _ => Err(PhononError::parse(FILE_LABEL, line_number, "expected a single count")),
    }
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
