//! Relative performance metrics with improvement/reduction multipliers

use super::{
    category_range, configure_category_axes, draw_grouped_bars, draw_label, draw_legend,
    text_style, with_canvas, PERFORMANCE_CHART_FILE,
};
use crate::config::ChartConfig;
use crate::types::{Change, ComparisonPoint, ComparisonSeries, Direction, Result};
use plotters::prelude::*;
use std::path::PathBuf;

const BASELINE_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const MLA_COLOR: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
const IMPROVEMENT_COLOR: RGBColor = RGBColor(0x00, 0x80, 0x00);
const REDUCTION_COLOR: RGBColor = RGBColor(0xff, 0x00, 0x00);

const Y_MAX: f64 = 600.0;
/// Gap between the taller bar and its multiplier label, in data units
const LABEL_GAP: f64 = 10.0;

/// Baseline normalised to 100% (speed to 1); MLA relative to it
fn relative_performance() -> ComparisonSeries {
    ComparisonSeries::new("Relative Performance", "%")
        .with_point("Inference Speed", 1.0, 570.0)
        .with_point("Memory Usage", 100.0, 6.7)
        .with_point("Bandwidth Requirement", 100.0, 15.0)
        .with_point("GPU Utilization", 60.0, 158.3)
}

pub(crate) fn change_color(change: &Change) -> RGBColor {
    match change.direction {
        Direction::Improvement => IMPROVEMENT_COLOR,
        Direction::Reduction => REDUCTION_COLOR,
    }
}

/// Render `mla_performance_metrics.png` and return its path
pub fn render_performance_metrics_chart(config: &ChartConfig) -> Result<PathBuf> {
    let style = &config.style;
    let metrics = relative_performance();
    let changes = metrics
        .points
        .iter()
        .map(ComparisonPoint::change)
        .collect::<Result<Vec<_>>>()?;

    let path = config.path_for(PERFORMANCE_CHART_FILE);
    with_canvas(&path, (10.0, 6.0), style, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(
                "MLA vs Traditional MHA Performance Metrics",
                text_style(style, style.title_size_pt, false),
            )
            .margin(style.px(8.0))
            .x_label_area_size(style.px(30.0))
            .y_label_area_size(style.px(48.0))
            .build_cartesian_2d(category_range(metrics.len()), 0.0..Y_MAX)?;

        configure_category_axes(&mut chart, &metrics.labels(), None, "Relative Performance (%)", style)?;
        draw_grouped_bars(
            &mut chart,
            &metrics,
            ("Traditional MHA", "MLA"),
            (BASELINE_COLOR.to_rgba(), MLA_COLOR.to_rgba()),
            style,
        )?;

        for (i, (point, change)) in metrics.points.iter().zip(&changes).enumerate() {
            let top = point.baseline.max(point.compressed);
            let font = style
                .bold_font(style.font_size_pt)
                .color(&change_color(change));
            draw_label(&mut chart, change.to_string(), (i as f64, top + LABEL_GAP), 0.0, font, style)?;
        }

        draw_legend(&mut chart, SeriesLabelPosition::UpperRight, style)
    })?;
    Ok(path)
}
