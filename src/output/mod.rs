/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Text report and rendered image of a run

pub mod colormap;
pub mod errors;
pub mod plot;
pub mod report;

pub use colormap::{inferno, LogNorm};
pub use errors::{OutputError, Result};
pub use plot::{render_spectrum, PlotSettings};
pub use report::{Report, ReportLine};
