//! Schematic of the MLA compression pipeline
//!
//! Not data driven: block sizes only suggest relative volume. Drawn on a
//! 20 x 12 unit canvas with hidden axes.

use super::{draw_text_block, text_style, with_canvas, Chart, DIAGRAM_FILE};
use crate::config::{ChartConfig, ChartStyle};
use crate::types::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::VPos;
use std::path::PathBuf;

const ORIGINAL_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);
const LATENT_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
const HEAD_COLOR: RGBColor = RGBColor(0x2e, 0xcc, 0x71);
const HIGHLIGHT_COLOR: RGBColor = RGBColor(0xff, 0xff, 0x00);

const CANVAS_WIDTH: f64 = 20.0;
const CANVAS_HEIGHT: f64 = 12.0;

/// Original K,V block, width x height
const ORIGINAL_SIZE: (f64, f64) = (8.0, 4.0);
const LATENT_WIDTH: f64 = 1.0;
/// Reconstructed heads are drawn at this fraction of the original block
const HEAD_SCALE: f64 = 0.3;
const HEAD_COUNT: usize = 3;

const ARROW_LENGTH: f64 = 1.5;
const ARROW_HEAD_WIDTH: f64 = 0.3;
const ARROW_HEAD_LENGTH: f64 = 0.2;

const COMPRESSION_LABEL: &str = "93.3% Compression Rate";

/// Render `mla_compression_visualization.png` and return its path
pub fn render_compression_diagram(config: &ChartConfig) -> Result<PathBuf> {
    let style = &config.style;
    let path = config.path_for(DIAGRAM_FILE);

    with_canvas(&path, (12.0, 8.0), style, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption("MLA Compression Mechanism", text_style(style, 18.0, true))
            .margin(style.px(20.0))
            .build_cartesian_2d(0.0..CANVAS_WIDTH, 0.0..CANVAS_HEIGHT)?;

        let outline = BLACK.stroke_width(style.px(2.0));
        let (width, height) = ORIGINAL_SIZE;

        // Original K,V
        draw_block(&mut chart, (1.0, 5.0), (width, height), ORIGINAL_COLOR, outline)?;
        draw_text_block(
            &mut chart,
            &["Original K,V", "(d_model × seq_len)", "~100GB"],
            (5.0, 7.0),
            VPos::Center,
            text_style(style, 12.0, true),
        )?;

        // Projection
        draw_arrow(&mut chart, (9.5, 7.0), style)?;
        draw_text_block(
            &mut chart,
            &["Low-rank", "Projection"],
            (10.25, 7.5),
            VPos::Bottom,
            text_style(style, 10.0, false),
        )?;

        // Latent vector
        draw_block(&mut chart, (12.0, 5.0), (LATENT_WIDTH, height), LATENT_COLOR, outline)?;
        draw_text_block(
            &mut chart,
            &["Latent", "Vector", "(d_c × seq_len)", "~6.7GB"],
            (12.5, 7.0),
            VPos::Center,
            text_style(style, 12.0, true),
        )?;

        // Reconstruction
        draw_arrow(&mut chart, (13.5, 7.0), style)?;
        draw_text_block(
            &mut chart,
            &["Reconstruction", "for each head"],
            (14.25, 7.5),
            VPos::Bottom,
            text_style(style, 10.0, false),
        )?;

        let head_outline = BLACK.stroke_width(style.px(1.0));
        for i in 0..HEAD_COUNT {
            draw_block(
                &mut chart,
                (16.0, 3.0 + 2.0 * i as f64),
                (width * HEAD_SCALE, height * HEAD_SCALE),
                HEAD_COLOR,
                head_outline,
            )?;
        }
        draw_text_block(
            &mut chart,
            &["Reconstructed", "K¹,V¹", "...", "Kⁿ,Vⁿ"],
            (17.2, 7.0),
            VPos::Center,
            text_style(style, 10.0, false),
        )?;

        draw_compression_label(&mut chart, style)
    })?;
    Ok(path)
}

/// Filled rectangle with an outline
fn draw_block(
    chart: &mut Chart<'_, '_>,
    origin: (f64, f64),
    size: (f64, f64),
    fill: RGBColor,
    outline: ShapeStyle,
) -> Result<()> {
    let corners = [origin, (origin.0 + size.0, origin.1 + size.1)];
    chart.draw_series([
        Rectangle::new(corners, fill.filled()),
        Rectangle::new(corners, outline),
    ])?;
    Ok(())
}

/// Horizontal arrow of `ARROW_LENGTH` starting at `from`; the head extends past it
fn draw_arrow(chart: &mut Chart<'_, '_>, from: (f64, f64), style: &ChartStyle) -> Result<()> {
    let (x, y) = from;
    let shaft_end = x + ARROW_LENGTH;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x, y), (shaft_end, y)],
        BLACK.stroke_width(style.px(2.0)),
    )))?;
    chart.draw_series(std::iter::once(Polygon::new(
        vec![
            (shaft_end, y + ARROW_HEAD_WIDTH / 2.0),
            (shaft_end + ARROW_HEAD_LENGTH, y),
            (shaft_end, y - ARROW_HEAD_WIDTH / 2.0),
        ],
        BLACK.filled(),
    )))?;
    Ok(())
}

/// Highlighted "93.3% Compression Rate" box under the pipeline
fn draw_compression_label(chart: &mut Chart<'_, '_>, style: &ChartStyle) -> Result<()> {
    let center = (7.0, 2.0);
    let (half_width, half_height) = (2.8, 0.4);

    chart.draw_series(std::iter::once(Rectangle::new(
        [
            (center.0 - half_width, center.1 - half_height),
            (center.0 + half_width, center.1 + half_height),
        ],
        HIGHLIGHT_COLOR.mix(0.8).filled(),
    )))?;
    draw_text_block(
        chart,
        &[COMPRESSION_LABEL],
        center,
        VPos::Center,
        text_style(style, 16.0, false),
    )
}
