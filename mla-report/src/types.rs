//! Core types for the MLA report generators
//!
//! Every figure in the reports is a literal chosen by the report author. The
//! types here only pair those literals with their labels so that label and
//! value sequences can never drift out of alignment, and derive the ratios
//! (speedup, compression rate, change multiplier) the reports print.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while rendering a report or chart
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Scaling maximum must be positive and finite, got {0}")]
    NonPositiveMaximum(f64),

    #[error("Negative or non-finite value {value} for '{label}'")]
    NegativeValue { label: String, value: f64 },

    #[error("Series has no data points: {0}")]
    EmptySeries(String),

    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Zero denominator while computing ratio for '{0}'")]
    ZeroDenominator(String),

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A single labelled value (one bar in a chart)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category label (e.g. "4K tokens")
    pub label: String,
    /// Non-negative value
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// An ordered series of labelled values with a unit and an optional scaling hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Series name (e.g. "Traditional MHA")
    pub name: String,
    /// Unit suffix printed after each value (e.g. "ms")
    #[serde(default)]
    pub unit: String,
    /// Data points in display order
    pub points: Vec<DataPoint>,
    /// Explicit scaling maximum; defaults to the largest value
    #[serde(default)]
    pub max_hint: Option<f64>,
}

impl MetricSeries {
    /// Create an empty series
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            points: Vec::new(),
            max_hint: None,
        }
    }

    /// Builder method: append a data point
    pub fn with_point(mut self, label: impl Into<String>, value: f64) -> Self {
        self.points.push(DataPoint::new(label, value));
        self
    }

    /// Builder method: set the explicit scaling maximum
    pub fn with_max(mut self, max: f64) -> Self {
        self.max_hint = Some(max);
        self
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Reject values that would make bar lengths meaningless
    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(ReportError::EmptySeries(self.name.clone()));
        }
        for point in &self.points {
            if !point.value.is_finite() || point.value < 0.0 {
                return Err(ReportError::NegativeValue {
                    label: point.label.clone(),
                    value: point.value,
                });
            }
        }
        Ok(())
    }

    /// Maximum used to scale bars: the explicit hint, or the largest value
    pub fn scale_max(&self) -> Result<f64> {
        let max = match self.max_hint {
            Some(max) => max,
            None => self
                .values()
                .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
                .ok_or_else(|| ReportError::EmptySeries(self.name.clone()))?,
        };
        if !max.is_finite() || max <= 0.0 {
            return Err(ReportError::NonPositiveMaximum(max));
        }
        Ok(max)
    }
}

/// One category measured under both the baseline and the compressed variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub label: String,
    pub baseline: f64,
    pub compressed: f64,
}

impl ComparisonPoint {
    pub fn new(label: impl Into<String>, baseline: f64, compressed: f64) -> Self {
        Self {
            label: label.into(),
            baseline,
            compressed,
        }
    }

    /// Speedup multiplier `baseline / compressed`
    pub fn speedup(&self) -> Result<f64> {
        if self.compressed == 0.0 {
            return Err(ReportError::ZeroDenominator(self.label.clone()));
        }
        Ok(self.baseline / self.compressed)
    }

    /// Percentage reduction of the compressed value relative to baseline
    pub fn compression_rate(&self) -> Result<f64> {
        if self.baseline == 0.0 {
            return Err(ReportError::ZeroDenominator(self.label.clone()));
        }
        Ok((self.baseline - self.compressed) / self.baseline * 100.0)
    }

    /// Change multiplier `max / min`, labelled by which side is larger
    pub fn change(&self) -> Result<Change> {
        let (hi, lo) = if self.compressed > self.baseline {
            (self.compressed, self.baseline)
        } else {
            (self.baseline, self.compressed)
        };
        if lo == 0.0 {
            return Err(ReportError::ZeroDenominator(self.label.clone()));
        }
        let direction = if self.compressed > self.baseline {
            Direction::Improvement
        } else {
            Direction::Reduction
        };
        Ok(Change {
            direction,
            factor: hi / lo,
        })
    }
}

/// Which way a compared metric moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Compressed value is larger than baseline
    Improvement,
    /// Compressed value is smaller than or equal to baseline
    Reduction,
}

/// A change multiplier between baseline and compressed values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub direction: Direction,
    /// Always ≥ 1
    pub factor: f64,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Improvement => write!(f, "{:.1}x", self.factor),
            Direction::Reduction => write!(f, "{:.1}x reduction", self.factor),
        }
    }
}

/// Paired baseline/compressed measurements over a shared set of categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    pub points: Vec<ComparisonPoint>,
}

impl ComparisonSeries {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            points: Vec::new(),
        }
    }

    /// Builder method: append a category
    pub fn with_point(mut self, label: impl Into<String>, baseline: f64, compressed: f64) -> Self {
        self.points.push(ComparisonPoint::new(label, baseline, compressed));
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    /// Baseline side as a standalone series
    pub fn baseline_series(&self, name: impl Into<String>) -> MetricSeries {
        self.project(name, |p| p.baseline)
    }

    /// Compressed side as a standalone series
    pub fn compressed_series(&self, name: impl Into<String>) -> MetricSeries {
        self.project(name, |p| p.compressed)
    }

    /// Per-category speedup `baseline / compressed`, unit "x"
    pub fn speedups(&self, name: impl Into<String>) -> Result<MetricSeries> {
        let mut series = MetricSeries::new(name, "x");
        for point in &self.points {
            series = series.with_point(point.label.clone(), point.speedup()?);
        }
        Ok(series)
    }

    /// Per-category compression rate in percent
    pub fn compression_rates(&self) -> Result<Vec<f64>> {
        self.points.iter().map(ComparisonPoint::compression_rate).collect()
    }

    /// Largest value on either side
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.baseline.max(p.compressed))
            .fold(0.0, f64::max)
    }

    fn project(&self, name: impl Into<String>, pick: impl Fn(&ComparisonPoint) -> f64) -> MetricSeries {
        let mut series = MetricSeries::new(name, self.unit.clone());
        for point in &self.points {
            series = series.with_point(point.label.clone(), pick(point));
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latency() -> ComparisonSeries {
        ComparisonSeries::new("latency", "ms")
            .with_point("dialog", 450.0, 125.0)
            .with_point("summary", 2100.0, 580.0)
            .with_point("code", 890.0, 215.0)
    }

    #[test]
    fn test_speedup_matches_elementwise_ratio() {
        let series = latency();
        let speedups = series.speedups("speedup").unwrap();
        assert_eq!(speedups.unit, "x");
        for (point, speedup) in series.points.iter().zip(speedups.values()) {
            assert_eq!(speedup, point.baseline / point.compressed);
        }
        assert_eq!(format!("{:.1}x faster", speedups.points[0].value), "3.6x faster");
    }

    #[test]
    fn test_compression_rate() {
        let point = ComparisonPoint::new("4K", 15.6, 1.95);
        let rate = point.compression_rate().unwrap();
        assert!((rate - 87.5).abs() < 1e-9);
        assert_eq!(format!("{:.1}%", rate), "87.5%");
    }

    #[test]
    fn test_zero_denominators_are_errors() {
        let point = ComparisonPoint::new("empty", 0.0, 0.0);
        assert!(matches!(point.speedup(), Err(ReportError::ZeroDenominator(_))));
        assert!(matches!(point.compression_rate(), Err(ReportError::ZeroDenominator(_))));
        assert!(matches!(point.change(), Err(ReportError::ZeroDenominator(_))));
    }

    #[test]
    fn test_change_direction_and_label() {
        let speed = ComparisonPoint::new("speed", 1.0, 570.0).change().unwrap();
        assert_eq!(speed.direction, Direction::Improvement);
        assert_eq!(speed.to_string(), "570.0x");

        let memory = ComparisonPoint::new("memory", 100.0, 6.7).change().unwrap();
        assert_eq!(memory.direction, Direction::Reduction);
        assert_eq!(memory.to_string(), "14.9x reduction");

        let gpu = ComparisonPoint::new("gpu", 60.0, 158.3).change().unwrap();
        assert_eq!(gpu.to_string(), "2.6x");
    }

    #[test]
    fn test_scale_max_defaults_to_largest_value() {
        let series = latency().baseline_series("baseline");
        assert_eq!(series.scale_max().unwrap(), 2100.0);
        assert_eq!(series.clone().with_max(5000.0).scale_max().unwrap(), 5000.0);
    }

    #[test]
    fn test_scale_max_rejects_zero() {
        let series = MetricSeries::new("zeros", "").with_point("a", 0.0);
        assert!(matches!(series.scale_max(), Err(ReportError::NonPositiveMaximum(_))));

        let series = MetricSeries::new("hint", "").with_point("a", 1.0).with_max(0.0);
        assert!(matches!(series.scale_max(), Err(ReportError::NonPositiveMaximum(_))));
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            MetricSeries::new("empty", "").validate(),
            Err(ReportError::EmptySeries(_))
        ));
        assert!(matches!(
            MetricSeries::new("neg", "").with_point("a", -1.0).validate(),
            Err(ReportError::NegativeValue { .. })
        ));
        assert!(MetricSeries::new("ok", "").with_point("a", 0.0).validate().is_ok());
    }

    #[test]
    fn test_projection_keeps_labels_aligned() {
        let series = latency();
        let compressed = series.compressed_series("MLA");
        assert_eq!(compressed.labels().collect::<Vec<_>>(), vec!["dialog", "summary", "code"]);
        assert_eq!(compressed.values().collect::<Vec<_>>(), vec![125.0, 580.0, 215.0]);
        assert_eq!(series.max_value(), 2100.0);
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ReportError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ReportError::IoError(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
