/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Reader for VASP POSCAR structure files
//!
//! Supports VASP 5 files with a species line as well as VASP 4 files whose
//! species are given in the comment line, positive scale factors or negative
//! volumes, an optional `Selective dynamics` line and both `Direct` and
//! `Cartesian` coordinates.

use super::crystal::{Crystal, Site};
use super::errors::{Result, StructureError};
use crate::lattice::{Lattice, Matrix3, Vector3D};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a POSCAR file from disk
pub fn read_poscar<P: AsRef<Path>>(path: P) -> Result<Crystal> {
    let file = File::open(path.as_ref())?;
    parse_poscar(BufReader::new(file))
}

/// Parse a POSCAR from any buffered reader
pub fn parse_poscar<R: BufRead>(reader: R) -> Result<Crystal> {
    let mut lines = PoscarLines::new(reader)?;

    let comment = lines.next_line()?;

    let (line, scale_text) = lines.next_numbered()?;
    let scale = parse_float(line, scale_text.split_whitespace().next().unwrap_or(""))?;
    if scale == 0.0 {
        return Err(StructureError::parse(line, "scale factor must not be zero"));
    }

    let mut rows = [[0.0; 3]; 3];
    for row in rows.iter_mut() {
        let (line, text) = lines.next_numbered()?;
        *row = parse_triple(line, &text)?;
    }
    let raw = Matrix3::new(rows);

    // A negative scale is the target cell volume
    let factor = if scale < 0.0 {
        (scale.abs() / raw.determinant().abs()).cbrt()
    } else {
        scale
    };
    let mut scaled = rows;
    for row in scaled.iter_mut() {
        for value in row.iter_mut() {
            *value *= factor;
        }
    }
    let lattice = Lattice::new(Matrix3::new(scaled))?;

    let (line, text) = lines.next_numbered()?;
    let first_token = text.split_whitespace().next().unwrap_or("");
    let (symbols, counts) = if first_token.parse::<usize>().is_ok() {
        let counts = parse_counts(line, &text)?;
        let symbols: Vec<String> = comment.split_whitespace().map(str::to_string).collect();
        if symbols.len() < counts.len() {
            return Err(StructureError::parse(
                line,
                "species must be given either on the species line or in the comment",
            ));
        }
        (symbols[..counts.len()].to_vec(), counts)
    } else {
        let symbols: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let (count_line, count_text) = lines.next_numbered()?;
        let counts = parse_counts(count_line, &count_text)?;
        if counts.len() != symbols.len() {
            return Err(StructureError::parse(
                count_line,
                format!("{} species but {} counts", symbols.len(), counts.len()),
            ));
        }
        (symbols, counts)
    };

    let (mut line, mut mode) = lines.next_numbered()?;
    if mode.trim_start().starts_with(|c: char| c == 'S' || c == 's') {
        (line, mode) = lines.next_numbered()?;
    }
    let cartesian = match mode.trim_start().chars().next() {
        Some('C' | 'c' | 'K' | 'k') => true,
        Some('D' | 'd') => false,
        _ => {
            return Err(StructureError::parse(
                line,
                format!("expected Direct or Cartesian, found '{}'", mode.trim()),
            ))
        }
    };

    let mut sites = Vec::with_capacity(counts.iter().sum());
    for (symbol, &count) in symbols.iter().zip(counts.iter()) {
        for _ in 0..count {
            let (line, text) = lines.next_numbered()?;
            let coords = Vector3D::from(parse_triple(line, &text)?);
            let position = if cartesian {
                lattice.cartesian_to_fractional(&(coords * factor))
            } else {
                coords
            };
            sites.push(Site::new(symbol, position)?);
        }
    }

    Crystal::new(lattice, sites)
}

/// Line source that skips nothing but remembers line numbers
struct PoscarLines {
    lines: Vec<String>,
    cursor: usize,
}

impl PoscarLines {
    fn new<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self { lines, cursor: 0 })
    }

    fn next_line(&mut self) -> Result<String> {
        self.next_numbered().map(|(_, text)| text)
    }

    fn next_numbered(&mut self) -> Result<(usize, String)> {
        let line = self.cursor + 1;
        let text = self
            .lines
            .get(self.cursor)
            .cloned()
            .ok_or_else(|| StructureError::parse(line, "unexpected end of file"))?;
        self.cursor += 1;
        Ok((line, text))
    }
}

fn parse_float(line: usize, token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| StructureError::parse(line, format!("invalid number '{}'", token)))
}

fn parse_triple(line: usize, text: &str) -> Result<[f64; 3]> {
    let values = text
        .split_whitespace()
        .take(3)
        .map(|token| parse_float(line, token))
        .collect::<Result<Vec<f64>>>()?;
    if values.len() != 3 {
        return Err(StructureError::parse(line, "expected three numbers"));
    }
    Ok([values[0], values[1], values[2]])
}

fn parse_counts(line: usize, text: &str) -> Result<Vec<usize>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| StructureError::parse(line, format!("invalid atom count '{}'", token)))
        })
        .collect()
}
