//! Raster chart rendering
//!
//! Four independent PNG charts summarising the MLA comparison. Each chart
//! function owns its canvas for exactly one call: the bitmap is created,
//! drawn, written to disk and released inside [`with_canvas`], so charts can
//! be rendered in any order without leaking drawing state between them.

use crate::config::{ChartConfig, ChartStyle};
use crate::types::{ComparisonSeries, ReportError, Result};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub mod diagram;
pub mod latency;
pub mod memory;
pub mod performance;

pub use diagram::render_compression_diagram;
pub use latency::render_latency_comparison_chart;
pub use memory::render_memory_comparison_chart;
pub use performance::render_performance_metrics_chart;

pub const MEMORY_CHART_FILE: &str = "mla_memory_comparison.png";
pub const PERFORMANCE_CHART_FILE: &str = "mla_performance_metrics.png";
pub const LATENCY_CHART_FILE: &str = "mla_latency_comparison.png";
pub const DIAGRAM_FILE: &str = "mla_compression_visualization.png";

/// Width of one bar of a grouped pair, in category units
pub(crate) const BAR_WIDTH: f64 = 0.35;

pub(crate) type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
pub(crate) type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ReportError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ReportError::Render(e.to_string())
    }
}

type ChartFn = fn(&ChartConfig) -> Result<PathBuf>;

/// Render all four charts in order, printing a confirmation after each file
///
/// Stops at the first failure; charts already written stay on disk.
pub fn generate_all_charts<W: Write>(config: &ChartConfig, out: &mut W) -> Result<Vec<PathBuf>> {
    let steps: [(ChartFn, &str); 4] = [
        (render_memory_comparison_chart, "Memory comparison chart generated"),
        (render_performance_metrics_chart, "Performance metrics chart generated"),
        (render_latency_comparison_chart, "Latency comparison chart generated"),
        (render_compression_diagram, "Compression mechanism visualization generated"),
    ];

    writeln!(out, "Generating MLA visualization charts...")?;
    out.flush()?;

    let mut written = Vec::with_capacity(steps.len());
    for (render, confirmation) in steps {
        let path = render(config)?;
        writeln!(out, "✓ {}", confirmation)?;
        out.flush()?;
        written.push(path);
    }

    writeln!(out)?;
    writeln!(out, "All charts have been saved to {}/", config.output_dir.display())?;
    out.flush()?;
    Ok(written)
}

/// Acquire a bitmap canvas, run `draw` on it, write it to `path` and release it
pub(crate) fn with_canvas<F>(path: &Path, figure_in: (f64, f64), style: &ChartStyle, draw: F) -> Result<()>
where
    F: FnOnce(&Canvas<'_>) -> Result<()>,
{
    let (width, height) = style.figure_size(figure_in.0, figure_in.1);
    log::debug!("Rendering {:?} at {}x{} px", path, width, height);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&RGBColor::from(style.background))?;
    draw(&root)?;
    root.present()?;

    log::info!("Chart written: {:?}", path);
    Ok(())
}

/// X range that centres `count` categories on 0, 1, 2, ..
pub(crate) fn category_range(count: usize) -> Range<f64> {
    -0.5..(count as f64 - 0.5)
}

/// Tick hint for `count` categories over [`category_range`]
///
/// The hint is the largest point count plotters may place, so allowing one
/// tick per category keeps it from stepping by half a category.
pub(crate) fn category_ticks(count: usize) -> usize {
    count.max(1)
}

/// Category name for an x tick; empty for ticks that fall between categories
pub(crate) fn category_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Text style in the configured font and text colour
pub(crate) fn text_style<'a>(style: &'a ChartStyle, points: f64, bold: bool) -> TextStyle<'a> {
    let font = if bold {
        style.bold_font(points)
    } else {
        style.font(points)
    };
    font.color(&RGBColor::from(style.text_color))
}

/// Category x axis, value y axis, horizontal grid only
pub(crate) fn configure_category_axes(
    chart: &mut Chart<'_, '_>,
    labels: &[String],
    x_desc: Option<&str>,
    y_desc: &str,
    style: &ChartStyle,
) -> Result<()> {
    let label_style = text_style(style, style.font_size_pt, false);
    let formatter = |x: &f64| category_label(labels, *x);

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(category_ticks(labels.len()))
        .x_label_formatter(&formatter)
        .y_desc(y_desc)
        .label_style(label_style.clone())
        .axis_desc_style(label_style)
        .bold_line_style(RGBColor::from(style.grid_color).stroke_width(1))
        .light_line_style(RGBColor::from(style.background).stroke_width(1));
    if let Some(desc) = x_desc {
        mesh.x_desc(desc);
    }
    if !style.show_grid {
        mesh.disable_y_mesh();
    }
    mesh.draw()?;
    Ok(())
}

/// Baseline bar left of each category centre, compressed bar right of it
pub(crate) fn draw_grouped_bars(
    chart: &mut Chart<'_, '_>,
    series: &ComparisonSeries,
    names: (&str, &str),
    colors: (RGBAColor, RGBAColor),
    style: &ChartStyle,
) -> Result<()> {
    let (baseline_color, compressed_color) = colors;
    let swatch = style.px(4.0) as i32;

    chart
        .draw_series(series.points.iter().enumerate().map(|(i, point)| {
            let x = i as f64;
            Rectangle::new([(x - BAR_WIDTH, 0.0), (x, point.baseline)], baseline_color.filled())
        }))?
        .label(names.0)
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - swatch), (x + 2 * swatch, y + swatch)], baseline_color.filled())
        });

    chart
        .draw_series(series.points.iter().enumerate().map(|(i, point)| {
            let x = i as f64;
            Rectangle::new([(x, 0.0), (x + BAR_WIDTH, point.compressed)], compressed_color.filled())
        }))?
        .label(names.1)
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - swatch), (x + 2 * swatch, y + swatch)], compressed_color.filled())
        });

    Ok(())
}

/// Centred text whose bottom edge sits `lift_pt` points above `at`
pub(crate) fn draw_label(
    chart: &mut Chart<'_, '_>,
    text: String,
    at: (f64, f64),
    lift_pt: f64,
    font: TextStyle<'_>,
    style: &ChartStyle,
) -> Result<()> {
    let lift = if lift_pt > 0.0 { style.px(lift_pt) as i32 } else { 0 };
    let font = font.pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(std::iter::once(
        EmptyElement::at(at) + Text::new(text, (0, -lift), font),
    ))?;
    Ok(())
}

/// Multi-line centred text block anchored at `at`
pub(crate) fn draw_text_block(
    chart: &mut Chart<'_, '_>,
    lines: &[&str],
    at: (f64, f64),
    anchor: VPos,
    font: TextStyle<'_>,
) -> Result<()> {
    let line_height = (font.font.get_size() * 1.2).round() as i32;
    let count = lines.len() as i32;
    let font = font.pos(Pos::new(HPos::Center, anchor));

    for (k, line) in lines.iter().enumerate() {
        let k = k as i32;
        let dy = match anchor {
            VPos::Top => k * line_height,
            VPos::Center => k * line_height - (count - 1) * line_height / 2,
            VPos::Bottom => -(count - 1 - k) * line_height,
        };
        chart.draw_series(std::iter::once(
            EmptyElement::at(at) + Text::new(line.to_string(), (0, dy), font.clone()),
        ))?;
    }
    Ok(())
}

/// Legend box at `position`, which must leave the value labels uncovered
pub(crate) fn draw_legend<'a, 'b: 'a>(
    chart: &mut Chart<'a, 'b>,
    position: SeriesLabelPosition,
    style: &ChartStyle,
) -> Result<()> {
    chart
        .configure_series_labels()
        .position(position)
        .background_style(RGBColor::from(style.background).mix(0.8).filled())
        .border_style(RGBColor::from(style.grid_color).stroke_width(1))
        .label_font(text_style(style, style.font_size_pt, false))
        .draw()?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{ChartConfig, ChartStyle};
    use std::path::Path;

    /// Low resolution keeps chart tests fast
    pub fn test_config(dir: &Path) -> ChartConfig {
        ChartConfig::new()
            .with_output_dir(dir)
            .with_style(ChartStyle::new().with_dpi(60))
    }

    /// Width and height from a PNG IHDR chunk
    pub fn png_dimensions(path: &Path) -> (u32, u32) {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "not a PNG: {:?}", path);
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::test_config;
    use super::*;
    use plotters::coord::ranged1d::Ranged;
    use std::fs;

    /// Records, for every completed line, how many PNG files existed when it was written
    struct ProgressSink<'a> {
        dir: &'a Path,
        pending: Vec<u8>,
        lines: Vec<(String, usize)>,
    }

    impl Write for ProgressSink<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.pending.extend_from_slice(buf);
            while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..=pos).collect();
                let pngs = fs::read_dir(self.dir)?
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().extension().map_or(false, |ext| ext == "png"))
                    .count();
                let text = String::from_utf8_lossy(&line).trim_end().to_string();
                self.lines.push((text, pngs));
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_category_label() {
        let labels = vec!["4K".to_string(), "16K".to_string()];
        assert_eq!(category_label(&labels, 0.0), "4K");
        assert_eq!(category_label(&labels, 1.0000000001), "16K");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_range(4), -0.5..3.5);
    }

    #[test]
    fn test_category_ticks_land_on_categories() {
        for count in 1..=6 {
            let coord: RangedCoordf64 = category_range(count).into();
            let ticks = coord.key_points(category_ticks(count));
            assert_eq!(ticks.len(), count, "{} categories: {:?}", count, ticks);
            for (i, tick) in ticks.iter().enumerate() {
                assert!((tick - i as f64).abs() < 1e-9, "{} categories: {:?}", count, ticks);
            }
        }
    }

    #[test]
    fn test_generate_all_charts() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let mut sink = ProgressSink {
            dir: dir.path(),
            pending: Vec::new(),
            lines: Vec::new(),
        };

        let written = generate_all_charts(&config, &mut sink).unwrap();

        let expected = [
            MEMORY_CHART_FILE,
            PERFORMANCE_CHART_FILE,
            LATENCY_CHART_FILE,
            DIAGRAM_FILE,
        ];
        assert_eq!(written.len(), 4);
        for (path, name) in written.iter().zip(expected) {
            assert_eq!(path, &dir.path().join(name));
            assert!(fs::metadata(path).unwrap().len() > 0);
        }

        let confirmations: Vec<&(String, usize)> =
            sink.lines.iter().filter(|(line, _)| line.starts_with('✓')).collect();
        assert_eq!(confirmations.len(), 4);
        for (index, (_, pngs_on_disk)) in confirmations.iter().enumerate() {
            // each confirmation follows its own file and precedes the next one
            assert_eq!(*pngs_on_disk, index + 1);
        }
        assert_eq!(sink.lines[0].0, "Generating MLA visualization charts...");
        assert_eq!(
            sink.lines.last().unwrap().0,
            format!("All charts have been saved to {}/", dir.path().display())
        );
    }

    #[test]
    fn test_missing_output_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir.path().join("does-not-exist"));
        let mut out = Vec::new();

        let err = generate_all_charts(&config, &mut out).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)), "unexpected error: {}", err);

        let printed = String::from_utf8(out).unwrap();
        assert!(!printed.contains('✓'));
    }
}
