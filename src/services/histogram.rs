use plotters::prelude::*;
use thiserror::Error;

use crate::services::simulation_types::RoiHistogram;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Draws the Monte Carlo ROI distribution as a bar chart PNG.
pub fn write_histogram_png(output_path: &str, histogram: &RoiHistogram) -> Result<(), HistogramError> {
    if histogram.counts.is_empty() || histogram.bin_edges.len() != histogram.counts.len() + 1 {
        return Ok(());
    }

    let min_value = histogram.bin_edges[0];
    let mut max_value = histogram.bin_edges[histogram.bin_edges.len() - 1];
    if max_value - min_value < f64::EPSILON {
        max_value = min_value + 1.0;
    }
    let max_count = histogram.counts.iter().copied().max().unwrap_or(1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Simulated ROI Distribution", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(min_value..max_value, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("ROI (%)")
        .y_desc("Frequency")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(
            histogram
                .bin_edges
                .windows(2)
                .zip(&histogram.counts)
                .map(|(edges, count)| {
                    let right = if edges[1] > edges[0] { edges[1] } else { max_value };
                    Rectangle::new([(edges[0], 0), (right, *count)], bar_style)
                }),
        )
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
