//! Horizontal ASCII bar charts

use crate::config::TextLayout;
use crate::types::{MetricSeries, Result};
use std::io::Write;

/// Bar length for `value` on a `width`-glyph scale, clamped to `[0, width]`
///
/// `max_value` must be positive; callers obtain it from
/// [`MetricSeries::scale_max`], which rejects anything else.
pub fn bar_length(value: f64, max_value: f64, width: usize) -> usize {
    let scaled = (width as f64 * value / max_value).floor();
    if scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(width)
    }
}

/// Print a titled bar chart for `series`
///
/// Each line is `label | bar value unit`, labels left-aligned to the widest
/// label. Bars are scaled against the series' explicit maximum if it has
/// one, otherwise against its largest value. Nothing is written if the
/// series is empty, holds a negative value, or scales against a
/// non-positive maximum.
pub fn render_bar_chart<W: Write>(
    out: &mut W,
    title: &str,
    series: &MetricSeries,
    layout: &TextLayout,
) -> Result<()> {
    series.validate()?;
    let max_value = series.scale_max()?;
    let label_width = series
        .labels()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);

    log::debug!(
        "Bar chart '{}': {} bars, max {}",
        series.name,
        series.points.len(),
        max_value
    );

    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", layout.section_rule())?;
    for point in &series.points {
        let length = bar_length(point.value, max_value, layout.bar_width);
        let bar: String = std::iter::repeat(layout.bar_glyph).take(length).collect();
        writeln!(
            out,
            "{:<width$} | {} {}{}",
            point.label,
            bar,
            point.value,
            series.unit,
            width = label_width
        )?;
    }
    writeln!(out)?;
    Ok(())
}
