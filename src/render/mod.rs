//! Chart rendering behind a swappable backend.
//!
//! The pipeline renders through the [`Renderer`] trait so headless and test
//! environments can substitute [`NullRenderer`] for the terminal backend.

mod text;

pub use text::TextRenderer;

use crate::error::{PipelineError, Result};
use chrono::NaiveDate;

/// Line style of one plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// One named series on a chart.
///
/// `start` offsets the series along the date axis, so a forecast can be
/// drawn after the history it continues.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub style: LineStyle,
    pub start: usize,
}

impl ChartSeries {
    /// A solid series starting at the beginning of the axis.
    pub fn solid(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            style: LineStyle::Solid,
            start: 0,
        }
    }

    /// A dashed series starting at the beginning of the axis.
    pub fn dashed(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            style: LineStyle::Dashed,
            start: 0,
        }
    }

    /// Offset the series along the date axis.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }
}

/// A chart: title, axis labels, a shared date axis, and one or more series.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub dates: Vec<NaiveDate>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Create a chart over the given date axis.
    pub fn new(title: impl Into<String>, dates: Vec<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            x_label: "Time".to_string(),
            y_label: "Value".to_string(),
            dates,
            series: Vec::new(),
        }
    }

    /// Add a series to the chart.
    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Check that every series fits on the date axis.
    pub fn validate(&self) -> Result<()> {
        for series in &self.series {
            let end = series.start + series.values.len();
            if end > self.dates.len() {
                return Err(PipelineError::DimensionMismatch {
                    expected: self.dates.len(),
                    got: end,
                });
            }
        }
        Ok(())
    }
}

/// Rendering backend for charts.
///
/// Rendering completes before the call returns; the pipeline relies on
/// this to sequence its output.
pub trait Renderer {
    fn render(&self, chart: &ChartSpec) -> Result<()>;
}

/// Renderer that draws nothing, for tests and `--no-charts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, chart: &ChartSpec) -> Result<()> {
        chart.validate()
    }
}
