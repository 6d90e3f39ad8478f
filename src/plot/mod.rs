//! Comparative usage visualization.
//!
//! Builds one point per notable entity (total usage rate on the x axis,
//! top-cut usage rate on the y axis) and renders two PNG scatter plots with
//! the [`plotters`] crate: one clamped to a zoomed-in range for the crowded
//! low-usage corner, one scaled to the maximum observed rate.
//!
//! Label placement is a greedy, order-dependent heuristic: consecutive points
//! that sit close together in rate space get progressively taller label
//! offsets. It reduces collisions between neighbors; it does not guarantee
//! zero overlap.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::config::PlotConfig;
use crate::models::{TournamentMeta, UsagePoint, UsageSummary};

/// Errors that can occur during plot generation.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),
}

/// Paths of the two rendered images.
#[derive(Debug, Clone)]
pub struct PlotPaths {
    pub zoomed: PathBuf,
    pub full: PathBuf,
}

/// Select and order the points to plot.
///
/// Included entities are the union of everything in the top-cut table and
/// every field entity at or above the configured usage floor. Points are
/// ordered by top-cut rate descending, then total rate descending; the
/// label-offset pass depends on this order.
pub fn build_points(summary: &UsageSummary, config: &PlotConfig) -> Vec<UsagePoint> {
    let field_size = summary.field_size as f64;
    let top_cut_size = summary.top_cut_size as f64;

    let mut points: Vec<UsagePoint> = summary
        .field
        .iter()
        .filter_map(|(name, stats)| {
            let total_rate = stats.count as f64 / field_size;
            let in_top_cut = summary.top_cut.contains_key(name);
            if !in_top_cut && total_rate < config.usage_floor {
                return None;
            }
            let top_cut_rate = summary
                .top_cut
                .get(name)
                .map_or(0.0, |s| s.count as f64 / top_cut_size);
            Some(UsagePoint {
                name: name.clone(),
                total_rate,
                top_cut_rate,
            })
        })
        .collect();

    points.sort_by(|a, b| {
        b.top_cut_rate
            .total_cmp(&a.top_cut_rate)
            .then(b.total_rate.total_cmp(&a.total_rate))
    });
    points
}

/// Compute a vertical label offset per point.
///
/// Walks the sorted point list keeping a running padding: a point within
/// `proximity_threshold` (Euclidean rate-space distance) of its predecessor
/// stacks another `padding_increment` on top, anything further away resets
/// back to `label_offset`.
pub fn label_offsets(points: &[UsagePoint], config: &PlotConfig) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(points.len());
    let mut padding = config.label_offset;

    for (index, point) in points.iter().enumerate() {
        if index > 0 {
            let previous = &points[index - 1];
            let dx = point.total_rate - previous.total_rate;
            let dy = point.top_cut_rate - previous.top_cut_rate;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance <= config.proximity_threshold {
                padding += config.padding_increment;
            } else {
                padding = config.label_offset;
            }
        }
        offsets.push(padding);
    }

    offsets
}

fn render_scatter(
    points: &[UsagePoint],
    offsets: &[f64],
    meta: &TournamentMeta,
    config: &PlotConfig,
    axis_bound: f64,
    output_path: &Path,
) -> Result<(), PlotError> {
    let root = BitMapBackend::new(output_path, (config.image_width, config.image_height));
    let drawing_area = root.into_drawing_area();

    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let caption = format!("{} usage vs top cut", meta.name);
    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(caption, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..axis_bound, 0.0..axis_bound)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Usage (all entrants)")
        .y_desc("Usage (top cut)")
        .x_label_formatter(&|v| format!("{:.0}%", v * 100.0))
        .y_label_formatter(&|v| format!("{:.0}%", v * 100.0))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Equal-usage reference line.
    chart
        .draw_series(LineSeries::new(vec![(0.0, 0.0), (1.0, 1.0)], &BLACK))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.total_rate, p.top_cut_rate), 4, BLUE.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(points.iter().zip(offsets.iter()).map(|(p, &offset)| {
            Text::new(
                p.name.clone(),
                (p.total_rate, p.top_cut_rate + offset),
                ("sans-serif", 14),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Render the zoomed-in and zoomed-out scatter plots into `output_dir`.
pub fn render_plots(
    summary: &UsageSummary,
    config: &PlotConfig,
    output_dir: &Path,
) -> Result<PlotPaths, PlotError> {
    std::fs::create_dir_all(output_dir)?;

    let points = build_points(summary, config);
    let offsets = label_offsets(&points, config);

    let max_rate = points
        .iter()
        .map(|p| p.total_rate.max(p.top_cut_rate))
        .fold(0.0, f64::max);

    let zoomed = output_dir.join(format!("{}-usage-zoomed.png", summary.tournament.name));
    render_scatter(
        &points,
        &offsets,
        &summary.tournament,
        config,
        config.zoom_bound,
        &zoomed,
    )?;

    let full = output_dir.join(format!("{}-usage-full.png", summary.tournament.name));
    render_scatter(
        &points,
        &offsets,
        &summary.tournament,
        config,
        max_rate + config.axis_margin,
        &full,
    )?;

    info!(
        points = points.len(),
        zoomed = %zoomed.display(),
        full = %full.display(),
        "rendered usage plots"
    );

    Ok(PlotPaths { zoomed, full })
}
