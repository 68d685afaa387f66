//! Write the chart to disk.
//!
//! The figure JSON is exactly what `/api/chart` serves, so an exported file
//! can be fed to `Plotly.newPlot` offline.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::chart::{ChartSpec, render_svg};
use crate::error::AppError;

/// Write the Plotly figure JSON (pretty-printed).
pub fn write_figure_json(path: &Path, spec: &ChartSpec) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create figure JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &spec.to_figure())
        .map_err(|e| AppError::io(format!("Failed to write figure JSON: {e}")))?;

    Ok(())
}

/// Render and write the static SVG chart.
pub fn write_chart_svg(path: &Path, spec: &ChartSpec, width: u32, height: u32) -> Result<(), AppError> {
    let svg = render_svg(spec, width, height)?;

    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create SVG '{}': {e}", path.display())))?;
    file.write_all(svg.as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write SVG: {e}")))?;

    Ok(())
}
