/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use serde::{Deserialize, Serialize};

use super::errors::{Result, SpectrumError};

/// Evenly spaced energies from `start` to `stop` inclusive (meV)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyAxis {
    pub start: f64,
    pub stop: f64,
    pub num: usize,
}

impl Default for EnergyAxis {
    fn default() -> Self {
        Self {
            start: -5.0,
            stop: 35.0,
            num: 100,
        }
    }
}

impl EnergyAxis {
    pub fn new(start: f64, stop: f64, num: usize) -> Result<Self> {
        let axis = Self { start, stop, num };
        axis.validate()?;
        Ok(axis)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num == 0 {
            return Err(SpectrumError::EmptyEnergyAxis);
        }
        if !self.start.is_finite() || !self.stop.is_finite() {
            return Err(SpectrumError::InvalidParameter(format!(
                "energy axis bounds must be finite, got {} to {}",
                self.start, self.stop
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.num
    }

    pub fn is_empty(&self) -> bool {
        self.num == 0
    }

    /// Sample energies, both end points included
    pub fn values(&self) -> Vec<f64> {
        match self.num {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let step = (self.stop - self.start) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.stop
                        } else {
                            self.start + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }
}
