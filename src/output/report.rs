/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Plain-text table of degeneracy-reduced phonon properties

use std::fmt;
use std::io::{self, Write};

use crate::lattice::{to_conventional, Conventional, LatticeVector, PrimitiveMatrix};
use crate::path::QPath;
use crate::phonon::PhononPoint;
use crate::spectrum::{reduce, DegenerateGroup, Result};

/// One reported path point
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub distance: f64,
    /// Momentum transfer `G + q` in the conventional basis
    pub momentum_transfer: LatticeVector<Conventional>,
    pub groups: Vec<DegenerateGroup>,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.momentum_transfer.components();
        let frequencies: Vec<String> = self
            .groups
            .iter()
            .map(|group| format!("{:.6}", group.frequency))
            .collect();
        let factors: Vec<String> = self
            .groups
            .iter()
            .map(|group| format!("{:.6}", group.structure_factor))
            .collect();
        write!(
            f,
            "{:.6}  {:.6} {:.6} {:.6}  {}  {}",
            self.distance,
            q.x,
            q.y,
            q.z,
            frequencies.join(" "),
            factors.join(" ")
        )
    }
}

/// Header comments followed by one line per point
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub header: Vec<String>,
    pub lines: Vec<ReportLine>,
}

impl Report {
    /// Reduce every point's degenerate bands and assemble the table
    pub fn build(
        path: &QPath,
        points: &[PhononPoint],
        matrix: &PrimitiveMatrix,
        tolerance: f64,
        scattering: &str,
    ) -> Result<Self> {
        let lines = points
            .iter()
            .map(|point| {
                Ok(ReportLine {
                    distance: point.distance,
                    momentum_transfer: to_conventional(&point.point.momentum_transfer, matrix),
                    groups: reduce(&point.frequencies, &point.structure_factors, tolerance)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let groups = lines.iter().map(|line| line.groups.len()).max().unwrap_or(0);
        let origin = path.origin();
        let header = vec![
            format!(
                "# Distance from Gamma point, {} band frequencies in meV, {} dynamic structure factors",
                groups, groups
            ),
            "# For degenerate bands, summations are made.".to_string(),
            "# Gamma point is omitted due to different number of bands.".to_string(),
            String::new(),
            format!("# Running with {}", scattering),
            format!(
                "# {} (Primitive: {} to {})",
                path.label(),
                origin,
                *origin + *path.direction()
            ),
        ];

        Ok(Self { header, lines })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in &self.header {
            writeln!(writer, "{}", line)?;
        }
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathPoint;

    fn toy_point() -> (QPath, PhononPoint) {
        let path = QPath::new(
            LatticeVector::new(3.0, 3.0, 3.0),
            LatticeVector::new(0.5, 0.5, 0.5),
            2,
            &PrimitiveMatrix::fcc(),
        );
        let point: PathPoint = path.points()[0];
        let phonon = PhononPoint {
            point,
            distance: 0.25,
            frequencies: vec![5.0, 5.0],
            structure_factors: vec![0.3, 0.4],
        };
        (path, phonon)
    }

    #[test]
    fn test_report_line() {
        let (path, point) = toy_point();
        let report = Report::build(
            &path,
            &[point],
            &PrimitiveMatrix::fcc(),
            1e-4,
            "atomic form factor",
        )
        .unwrap();

        assert_eq!(report.lines.len(), 1);
        assert_eq!(
            report.lines[0].to_string(),
            "0.250000  3.500000 3.500000 3.500000  5.000000  0.700000"
        );
        assert_eq!(report.header[4], "# Running with atomic form factor");
        assert_eq!(
            report.header[5],
            "# [3 3 3] to [3.5 3.5 3.5] (Primitive: [3 3 3] to [3.5 3.5 3.5])"
        );
    }

    #[test]
    fn test_write_to() {
        let (path, point) = toy_point();
        let report =
            Report::build(&path, &[point], &PrimitiveMatrix::fcc(), 1e-4, "scattering lengths")
                .unwrap();
        let mut buffer = Vec::new();
        report.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Distance from Gamma point, 1 band frequencies"));
        assert!(text.ends_with("0.700000\n\n\n"));
    }
}
