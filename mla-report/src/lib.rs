//! MLA Report Library
//!
//! Renders a fixed comparison of Multi-head Latent Attention (MLA) against
//! traditional multi-head attention (MHA): KV cache memory, inference
//! latency, and the speedup and compression ratios derived from them.
//!
//! # Architecture
//!
//! Two independent renderers read literal figures and write to a sink:
//! - [`text`] renders ASCII bar charts and comparison tables to any
//!   `std::io::Write` (the `mla-text-report` binary passes stdout)
//! - [`charts`] renders four PNG charts with `plotters` into a configured
//!   directory (the `mla-charts` binary)
//!
//! Nothing is measured. Every figure is a constant chosen by the report
//! author, so rendering is a pure function of those constants.
//!
//! # Example Usage
//!
//! ```no_run
//! use mla_report::{charts, text, ChartConfig};
//!
//! // Terminal report
//! let mut stdout = std::io::stdout().lock();
//! text::generate_full_report(&mut stdout).unwrap();
//!
//! // Charts into ./charts
//! let config = ChartConfig::new().with_output_dir("charts");
//! charts::generate_all_charts(&config, &mut stdout).unwrap();
//! ```

// Public modules
pub mod charts;
pub mod config;
pub mod text;
pub mod types;

// Re-export main types for convenience
pub use config::{ChartConfig, ChartStyle, Rgb, TextLayout, DEFAULT_OUTPUT_DIR};
pub use types::{
    Change, ComparisonPoint, ComparisonSeries, DataPoint, Direction, MetricSeries,
    ReportError, Result,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: default configuration points at the fixed output directory
        let config = ChartConfig::default();
        assert_eq!(config.output_dir(), std::path::Path::new(DEFAULT_OUTPUT_DIR));
        assert!(!VERSION.is_empty());
    }
}
