//! Report configuration types
//!
//! Rendering parameters are passed explicitly to every renderer instead of
//! living in process-wide state, so each chart or text block can be rendered
//! on its own and in any order.

use plotters::style::{FontDesc, FontFamily, FontStyle, RGBColor};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory the chart binary writes into
pub const DEFAULT_OUTPUT_DIR: &str = "/workspace";

/// Layout constants for the terminal report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLayout {
    /// Glyph count of a bar at the scaling maximum
    pub bar_width: usize,
    /// Glyph repeated to draw a bar
    pub bar_glyph: char,
    /// Width of the `=` rule under bar chart and section titles
    pub section_rule_width: usize,
    /// Width of the `=` rule under table titles and report banners
    pub banner_rule_width: usize,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            bar_width: 40,
            bar_glyph: '█',
            section_rule_width: 60,
            banner_rule_width: 80,
        }
    }
}

impl TextLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the maximum bar length
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Builder method: set the bar glyph
    pub fn with_bar_glyph(mut self, glyph: char) -> Self {
        self.bar_glyph = glyph;
        self
    }

    pub fn section_rule(&self) -> String {
        "=".repeat(self.section_rule_width)
    }

    pub fn banner_rule(&self) -> String {
        "=".repeat(self.banner_rule_width)
    }
}

/// An opaque RGB colour that can be written to and read from config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Visual style shared by all raster charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Font family name ("sans-serif", "serif", "monospace" or a system font)
    pub font_family: String,
    /// Output resolution; figure sizes are given in inches
    pub dpi: u32,
    /// Tick, legend and annotation text size in points
    pub font_size_pt: f64,
    /// Panel title size in points
    pub title_size_pt: f64,
    pub background: Rgb,
    pub text_color: Rgb,
    pub grid_color: Rgb,
    /// Draw horizontal grid lines behind the data
    pub show_grid: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            dpi: 300,
            font_size_pt: 10.0,
            title_size_pt: 12.0,
            background: Rgb(255, 255, 255),
            text_color: Rgb(38, 38, 38),
            grid_color: Rgb(204, 204, 204),
            show_grid: true,
        }
    }
}

impl ChartStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the output resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Builder method: set the font family
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Convert a length in points to pixels at the configured resolution
    pub fn px(&self, points: f64) -> u32 {
        (points * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }

    /// Pixel dimensions of a figure given in inches
    pub fn figure_size(&self, width_in: f64, height_in: f64) -> (u32, u32) {
        (
            (width_in * self.dpi as f64).round() as u32,
            (height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Regular font at `points` size
    pub fn font(&self, points: f64) -> FontDesc<'_> {
        FontDesc::new(
            FontFamily::from(self.font_family.as_str()),
            self.px(points) as f64,
            FontStyle::Normal,
        )
    }

    /// Bold font at `points` size
    pub fn bold_font(&self, points: f64) -> FontDesc<'_> {
        self.font(points).style(FontStyle::Bold)
    }
}

/// Where and how the graphic reporter writes its images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Existing directory that receives the image files
    pub output_dir: PathBuf,
    #[serde(default)]
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method: replace the chart style
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Full path of an output file
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
