/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! S(Q,ω) heat map with the phonon dispersion on top

use std::error::Error;
use std::fs;
use std::path::Path;

use log::info;
use ndarray::Array2;
use plotters::prelude::*;
use tempfile::Builder;

use super::colormap::{inferno, LogNorm};
use super::errors::{OutputError, Result};
use crate::spectrum::SpectralField;
use crate::utils::percentile;

/// Percentiles of the intensity distribution used as color limits
pub const COLOR_PERCENTILES: (f64, f64) = (5.0, 95.0);

/// Everything the renderer needs besides the data
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub width: u32,
    pub height: u32,
    pub x_label: String,
    pub y_label: String,
    pub colorbar_label: String,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
            x_label: String::new(),
            y_label: "Energy (meV)".to_string(),
            colorbar_label: "S(Q,ω)".to_string(),
        }
    }
}

/// Logarithmic color limits from the 5th and 95th percentile of the intensities
///
/// Zero, negative and non-finite intensities are masked out before the
/// percentiles are taken. They are drawn with the lowest color.
pub fn color_limits(intensities: &Array2<f64>) -> Result<LogNorm> {
    let values: Vec<f64> = intensities
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    if values.is_empty() {
        return Err(OutputError::NoPositiveIntensity);
    }
    let vmin = percentile(&values, COLOR_PERCENTILES.0)?;
    let vmax = percentile(&values, COLOR_PERCENTILES.1)?;
    Ok(LogNorm::new(vmin, vmax))
}

/// `points` evenly spaced positions from 0 to 1
pub fn path_positions(points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// Render `field` and the branch `frequencies` (points × bands, meV) to `output`
///
/// The image is drawn into a temporary file next to `output` and renamed
/// over it only once drawing succeeded.
pub fn render_spectrum(
    field: &SpectralField,
    frequencies: &Array2<f64>,
    settings: &PlotSettings,
    output: &Path,
) -> Result<()> {
    if field.num_points() == 0 || field.num_energies() == 0 {
        return Err(OutputError::EmptyField);
    }
    let norm = color_limits(field.intensities())?;

    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let extension = output
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("png");
    let staging = Builder::new()
        .prefix(".sqw-")
        .suffix(&format!(".{}", extension))
        .tempfile_in(directory)?;

    draw(field, frequencies, &norm, settings, staging.path())
        .map_err(|err| OutputError::RenderError(err.to_string()))?;

    if fs::metadata(staging.path())?.len() == 0 {
        return Err(OutputError::RenderError(
            "backend produced an empty image".to_string(),
        ));
    }
    staging.persist(output).map_err(|err| err.error)?;
    info!("Wrote {}", output.display());
    Ok(())
}

fn draw(
    field: &SpectralField,
    frequencies: &Array2<f64>,
    norm: &LogNorm,
    settings: &PlotSettings,
    target: &Path,
) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(target, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let colorbar_width = (settings.width / 8).max(90);
    let (main, bar) = root.split_horizontally(settings.width.saturating_sub(colorbar_width) as i32);

    let energies = field.energies();
    let positions = path_positions(field.num_points());
    let (e_min, e_max) = (energies[0], energies[energies.len() - 1]);
    let half_dx = cell_half_width(&positions);
    let half_de = cell_half_width(energies);

    let mut chart = ChartBuilder::on(&main)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            -half_dx..1.0 + half_dx,
            (e_min - half_de).min(e_max + half_de)..(e_max + half_de).max(e_min - half_de),
        )?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(settings.x_label.as_str())
        .y_desc(settings.y_label.as_str())
        .draw()?;

    let intensities = field.intensities();
    chart.draw_series(positions.iter().enumerate().flat_map(|(p, &x)| {
        energies.iter().enumerate().map(move |(m, &e)| {
            let color = inferno(norm.normalize(intensities[(p, m)]));
            Rectangle::new(
                [(x - half_dx, e - half_de), (x + half_dx, e + half_de)],
                color.filled(),
            )
        })
    }))?;

    chart.draw_series(positions.iter().enumerate().flat_map(|(p, &x)| {
        frequencies
            .row(p)
            .to_vec()
            .into_iter()
            .map(move |f| Circle::new((x, f), 2, GREEN.mix(0.5).filled()))
    }))?;

    let (log_min, log_max) = norm.log_bounds();
    if !log_min.is_finite() || !log_max.is_finite() {
        return Err(format!("non-finite color limits {} to {}", log_min, log_max).into());
    }
    let span = if log_max > log_min { log_max - log_min } else { 1.0 };
    let mut colorbar = ChartBuilder::on(&bar)
        .margin_top(10)
        .margin_bottom(50)
        .margin_right(10)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, log_min..log_min + span)?;
    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(settings.colorbar_label.as_str())
        .y_label_formatter(&|v: &f64| format!("{:.1e}", 10f64.powf(*v)))
        .draw()?;

    let steps = 128;
    colorbar.draw_series((0..steps).map(|k| {
        let lower = log_min + span * k as f64 / steps as f64;
        let upper = log_min + span * (k + 1) as f64 / steps as f64;
        Rectangle::new(
            [(0.0, lower), (1.0, upper)],
            inferno((k as f64 + 0.5) / steps as f64).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Half of the spacing between neighbouring samples, 0.5 for a single sample
fn cell_half_width(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.5;
    }
    ((values[values.len() - 1] - values[0]) / (values.len() - 1) as f64 / 2.0).abs()
}
