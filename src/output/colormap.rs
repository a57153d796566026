/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Perceptually uniform false-color map

use plotters::style::RGBColor;

/// Inferno sampled at eleven evenly spaced points from 0 to 1
const INFERNO: [(u8, u8, u8); 11] = [
    (0, 0, 4),
    (22, 11, 57),
    (66, 10, 104),
    (106, 23, 110),
    (147, 38, 103),
    (188, 55, 84),
    (221, 81, 58),
    (243, 118, 27),
    (252, 165, 10),
    (246, 215, 70),
    (252, 255, 164),
];

/// Color for a normalized value, clamped into [0, 1]
pub fn inferno(value: f64) -> RGBColor {
    let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let scaled = t * (INFERNO.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(INFERNO.len() - 2);
    let fraction = scaled - lower as f64;

    let (r0, g0, b0) = INFERNO[lower];
    let (r1, g1, b1) = INFERNO[lower + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * fraction).round() as u8;
    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Logarithmic normalization between `vmin` and `vmax`, clipped to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNorm {
    log_min: f64,
    log_max: f64,
}

impl LogNorm {
    /// Bounds must be positive. Equal bounds map everything to 0.
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self {
            log_min: vmin.log10(),
            log_max: vmax.log10(),
        }
    }

    pub fn log_bounds(&self) -> (f64, f64) {
        (self.log_min, self.log_max)
    }

    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.log_max - self.log_min;
        if value <= 0.0 || !span.is_finite() || span <= 0.0 {
            return 0.0;
        }
        ((value.log10() - self.log_min) / span).clamp(0.0, 1.0)
    }
}
