//! Inference latency per application scenario, with speedup annotations

use super::{
    category_range, configure_category_axes, draw_grouped_bars, draw_label, draw_legend,
    text_style, with_canvas, BAR_WIDTH, LATENCY_CHART_FILE,
};
use crate::config::ChartConfig;
use crate::types::{ComparisonSeries, Result};
use plotters::prelude::*;
use std::path::PathBuf;

const BASELINE_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
const MLA_COLOR: RGBColor = RGBColor(0x27, 0xae, 0x60);
const SPEEDUP_COLOR: RGBColor = RGBColor(0x00, 0x64, 0x00);
const BAR_ALPHA: f64 = 0.8;

/// Data-unit offsets of the value and speedup labels above the bars
const VALUE_GAP_MS: f64 = 20.0;
const SPEEDUP_GAP_MS: f64 = 100.0;

fn application_latency() -> ComparisonSeries {
    ComparisonSeries::new("Latency", "ms")
        .with_point("Dialog Generation (8K tokens)", 450.0, 125.0)
        .with_point("Document Summary (32K tokens)", 2100.0, 580.0)
        .with_point("Code Generation (16K tokens)", 890.0, 215.0)
}

/// Group annotation, e.g. "3.6x faster"
pub fn speedup_label(speedup: f64) -> String {
    format!("{:.1}x faster", speedup)
}

/// Render `mla_latency_comparison.png` and return its path
pub fn render_latency_comparison_chart(config: &ChartConfig) -> Result<PathBuf> {
    let style = &config.style;
    let latency = application_latency();
    let speedups = latency.speedups("Speedup")?;
    let y_max = (latency.max_value() + SPEEDUP_GAP_MS) * 1.15;

    let path = config.path_for(LATENCY_CHART_FILE);
    with_canvas(&path, (10.0, 6.0), style, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(
                "Inference Latency Comparison Across Applications",
                text_style(style, style.title_size_pt, false),
            )
            .margin(style.px(8.0))
            .x_label_area_size(style.px(30.0))
            .y_label_area_size(style.px(48.0))
            .build_cartesian_2d(category_range(latency.len()), 0.0..y_max)?;

        configure_category_axes(&mut chart, &latency.labels(), None, "Latency (ms)", style)?;
        draw_grouped_bars(
            &mut chart,
            &latency,
            ("Traditional MHA", "MLA"),
            (BASELINE_COLOR.mix(BAR_ALPHA), MLA_COLOR.mix(BAR_ALPHA)),
            style,
        )?;

        for (i, (point, speedup)) in latency.points.iter().zip(speedups.values()).enumerate() {
            let x = i as f64;
            for (center, value) in [
                (x - BAR_WIDTH / 2.0, point.baseline),
                (x + BAR_WIDTH / 2.0, point.compressed),
            ] {
                draw_label(
                    &mut chart,
                    format!("{}ms", value),
                    (center, value + VALUE_GAP_MS),
                    0.0,
                    text_style(style, 9.0, false),
                    style,
                )?;
            }

            let top = point.baseline.max(point.compressed);
            draw_label(
                &mut chart,
                speedup_label(speedup),
                (x, top + SPEEDUP_GAP_MS),
                0.0,
                style.bold_font(11.0).color(&SPEEDUP_COLOR),
                style,
            )?;
        }

        draw_legend(&mut chart, SeriesLabelPosition::UpperRight, style)
    })?;
    Ok(path)
}
