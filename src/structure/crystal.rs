/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Periodic crystal structures

use super::database;
use super::errors::{Result, StructureError};
use crate::lattice::{Lattice, Vector3D};

/// A single atomic site of a crystal
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// Species label (element symbol)
    pub symbol: String,
    /// Fractional coordinates in the crystal's lattice
    pub position: Vector3D,
    /// Mass in amu
    pub mass: f64,
}

impl Site {
    /// Create a site, taking the mass from the element table
    pub fn new(symbol: &str, position: Vector3D) -> Result<Self> {
        let element = database::element_from_label(symbol);
        let mass = database::atomic_mass(element)
            .ok_or_else(|| StructureError::UnknownElement(symbol.to_string()))?;
        Ok(Self {
            symbol: element.to_string(),
            position,
            mass,
        })
    }
}

/// A lattice decorated with atomic sites
#[derive(Debug, Clone, PartialEq)]
pub struct Crystal {
    lattice: Lattice,
    sites: Vec<Site>,
}

impl Crystal {
    pub fn new(lattice: Lattice, sites: Vec<Site>) -> Result<Self> {
        if sites.is_empty() {
            return Err(StructureError::InvalidStructure(
                "a crystal needs at least one site".to_string(),
            ));
        }
        Ok(Self { lattice, sites })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, index: usize) -> &Site {
        &self.sites[index]
    }

    pub fn num_atoms(&self) -> usize {
        self.sites.len()
    }

    /// Cartesian position of a site in Å
    pub fn cartesian_position(&self, index: usize) -> Vector3D {
        self.lattice.fractional_to_cartesian(&self.sites[index].position)
    }

    pub fn masses(&self) -> Vec<f64> {
        self.sites.iter().map(|site| site.mass).collect()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.sites.iter().map(|site| site.symbol.as_str()).collect()
    }
}
