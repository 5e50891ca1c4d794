//! KV cache memory comparison: grouped bars per tier and the compression rate line

use super::{
    category_range, configure_category_axes, draw_grouped_bars, draw_label, draw_legend,
    text_style, with_canvas, Canvas, BAR_WIDTH, MEMORY_CHART_FILE,
};
use crate::config::{ChartConfig, ChartStyle};
use crate::types::{ComparisonSeries, Result};
use plotters::prelude::*;
use std::path::PathBuf;

const BASELINE_COLOR: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
const MLA_COLOR: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
const RATE_COLOR: RGBColor = RGBColor(0xd6, 0x27, 0x28);

/// Sequence length in K tokens, baseline GB, MLA GB
const KV_CACHE_GB: [(u32, f64, f64); 4] = [
    (4, 15.6, 1.95),
    (16, 62.4, 7.8),
    (32, 124.8, 15.6),
    (128, 499.2, 62.4),
];

/// Visible band of the compression rate panel, in percent
const RATE_AXIS: std::ops::Range<f64> = 85.0..90.0;

/// The 128K bars reach the top right of the size panel; the short 4K bars leave the top left free
const SIZE_LEGEND_POSITION: SeriesLabelPosition = SeriesLabelPosition::UpperLeft;

fn kv_cache_series() -> ComparisonSeries {
    KV_CACHE_GB
        .iter()
        .fold(ComparisonSeries::new("KV Cache Size", "GB"), |series, &(k, mha, mla)| {
            series.with_point(format!("{}K", k), mha, mla)
        })
}

/// Top of the size panel's value axis
fn size_axis_max(memory: &ComparisonSeries) -> f64 {
    memory.max_value() * 1.1
}

/// Render `mla_memory_comparison.png` and return its path
pub fn render_memory_comparison_chart(config: &ChartConfig) -> Result<PathBuf> {
    let style = &config.style;
    let memory = kv_cache_series();

    // (sequence length, compression rate) pairs for the line panel
    let mut rates = Vec::with_capacity(KV_CACHE_GB.len());
    for (&(k, _, _), point) in KV_CACHE_GB.iter().zip(&memory.points) {
        rates.push((k as f64, point.compression_rate()?));
    }

    let path = config.path_for(MEMORY_CHART_FILE);
    with_canvas(&path, (14.0, 6.0), style, |root| {
        let panels = root.split_evenly((1, 2));
        draw_size_panel(&panels[0], &memory, style)?;
        draw_rate_panel(&panels[1], &rates, style)?;
        Ok(())
    })?;
    Ok(path)
}

fn draw_size_panel(area: &Canvas<'_>, memory: &ComparisonSeries, style: &ChartStyle) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption("KV Cache Memory Comparison", text_style(style, style.title_size_pt, false))
        .margin(style.px(8.0))
        .x_label_area_size(style.px(36.0))
        .y_label_area_size(style.px(48.0))
        .build_cartesian_2d(category_range(memory.len()), 0.0..size_axis_max(memory))?;

    configure_category_axes(
        &mut chart,
        &memory.labels(),
        Some("Sequence Length (K tokens)"),
        "KV Cache Size (GB)",
        style,
    )?;
    draw_grouped_bars(
        &mut chart,
        memory,
        ("Traditional MHA", "MLA"),
        (BASELINE_COLOR.to_rgba(), MLA_COLOR.to_rgba()),
        style,
    )?;

    for (i, point) in memory.points.iter().enumerate() {
        let x = i as f64;
        for (center, value) in [
            (x - BAR_WIDTH / 2.0, point.baseline),
            (x + BAR_WIDTH / 2.0, point.compressed),
        ] {
            draw_label(
                &mut chart,
                format!("{:.1}", value),
                (center, value),
                3.0,
                text_style(style, style.font_size_pt, false),
                style,
            )?;
        }
    }

    draw_legend(&mut chart, SIZE_LEGEND_POSITION, style)
}

fn draw_rate_panel(area: &Canvas<'_>, rates: &[(f64, f64)], style: &ChartStyle) -> Result<()> {
    let x_max = rates.iter().map(|&(x, _)| x).fold(0.0, f64::max) * 1.06;
    let mut chart = ChartBuilder::on(area)
        .caption("Memory Compression Rate", text_style(style, style.title_size_pt, false))
        .margin(style.px(8.0))
        .x_label_area_size(style.px(36.0))
        .y_label_area_size(style.px(48.0))
        .build_cartesian_2d(0.0..x_max, RATE_AXIS)?;

    let label_style = text_style(style, style.font_size_pt, false);
    chart
        .configure_mesh()
        .x_desc("Sequence Length (K tokens)")
        .y_desc("Memory Reduction (%)")
        .label_style(label_style.clone())
        .axis_desc_style(label_style)
        .bold_line_style(RGBColor::from(style.grid_color).mix(0.3).stroke_width(1))
        .light_line_style(RGBColor::from(style.background).stroke_width(1))
        .draw()?;

    chart.draw_series(AreaSeries::new(
        rates.iter().copied(),
        RATE_AXIS.start,
        RATE_COLOR.mix(0.3).filled(),
    ))?;
    chart.draw_series(LineSeries::new(
        rates.iter().copied(),
        RATE_COLOR.stroke_width(style.px(2.0)),
    ))?;
    chart.draw_series(
        rates
            .iter()
            .map(|&point| Circle::new(point, style.px(4.0), RATE_COLOR.filled())),
    )?;

    for &(x, rate) in rates {
        draw_label(
            &mut chart,
            format!("{:.1}%", rate),
            (x, rate),
            5.0,
            text_style(style, style.font_size_pt, false),
            style,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{png_dimensions, test_config};
    use super::*;

    #[test]
    fn test_memory_chart_written_at_figure_size() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let path = render_memory_comparison_chart(&config).unwrap();

        assert_eq!(path, dir.path().join(MEMORY_CHART_FILE));
        assert_eq!(png_dimensions(&path), config.style.figure_size(14.0, 6.0));
    }

    #[test]
    fn test_size_legend_corner_is_clear() {
        let memory = kv_cache_series();
        let top = size_axis_max(&memory);
        let first = &memory.points[0];
        let last = &memory.points[memory.len() - 1];

        assert!(matches!(SIZE_LEGEND_POSITION, SeriesLabelPosition::UpperLeft));
        // leftmost bars and their labels stay in the bottom tenth of the panel
        assert!(first.baseline.max(first.compressed) < top * 0.1);
        // the rightmost baseline bar and its label reach into the upper right corner
        assert!(last.baseline > top * 0.9);
    }

    #[test]
    fn test_every_tier_compresses_by_87_5_percent() {
        for &(_, mha, mla) in &KV_CACHE_GB {
            let rate = (mha - mla) / mha * 100.0;
            assert!(RATE_AXIS.contains(&rate));
            assert_eq!(format!("{:.1}%", rate), "87.5%");
        }
    }
}
