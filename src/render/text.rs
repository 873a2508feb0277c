//! Terminal chart backend.
//!
//! Draws a fixed-size character grid: solid series plot as `*`, dashed
//! series as `+`, with y-axis scale marks and date labels along the x-axis.

use crate::error::Result;
use crate::render::{ChartSpec, LineStyle, Renderer};
use std::fmt::Write as _;

const MARGIN: usize = 10;

/// ASCII line-chart renderer writing to stdout.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    /// Plot area width in columns.
    pub width: usize,
    /// Plot area height in rows.
    pub height: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            width: 72,
            height: 18,
        }
    }
}

impl TextRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    fn glyph(style: LineStyle) -> char {
        match style {
            LineStyle::Solid => '*',
            LineStyle::Dashed => '+',
        }
    }

    /// Draw the chart to a string.
    pub fn draw(&self, chart: &ChartSpec) -> Result<String> {
        chart.validate()?;

        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{:^total$}", chart.title, total = MARGIN + self.width);
        let _ = writeln!(out, "{:^total$}", "-".repeat(chart.title.len()), total = MARGIN + self.width);

        let n = chart.dates.len();
        let finite: Vec<f64> = chart
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .collect();

        if n == 0 || finite.is_empty() {
            let _ = writeln!(out, "{:^total$}", "(no data)", total = MARGIN + self.width);
            return Ok(out);
        }

        let mut low = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut high = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if low == high {
            low -= 1.0;
            high += 1.0;
        }

        let mut grid = vec![vec![' '; self.width]; self.height];
        for series in &chart.series {
            let glyph = Self::glyph(series.style);
            for (offset, value) in series.values.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let index = series.start + offset;
                let column = if n <= 1 {
                    0
                } else {
                    index * (self.width - 1) / (n - 1)
                };
                let level = (value - low) / (high - low) * (self.height - 1) as f64;
                let row = self.height - 1 - level.round() as usize;
                grid[row][column] = glyph;
            }
        }

        for (row_index, row) in grid.iter().enumerate() {
            let line: String = row.iter().collect();
            let label = if row_index == 0 {
                format!("{high:>8.1}")
            } else if row_index == self.height - 1 {
                format!("{low:>8.1}")
            } else if row_index == self.height / 2 {
                format!("{:>8.1}", (low + high) / 2.0)
            } else {
                " ".repeat(8)
            };
            let _ = writeln!(out, "{label} |{line}");
        }

        let _ = writeln!(out, "{:>9}+{}", " ", "-".repeat(self.width));

        // Date labels at the ends and midpoint of the axis.
        let format_date = |i: usize| chart.dates[i].format("%Y-%m-%d").to_string();
        let first = format_date(0);
        let last = format_date(n - 1);
        let middle = format_date(n / 2);
        let mut axis = " ".repeat(MARGIN);
        axis.push_str(&first);
        let mid_start = MARGIN + self.width / 2;
        while axis.len() < mid_start {
            axis.push(' ');
        }
        if n > 2 {
            axis.push_str(&middle);
        }
        let last_start = (MARGIN + self.width).saturating_sub(last.len());
        while axis.len() < last_start {
            axis.push(' ');
        }
        if n > 1 {
            axis.push_str(&last);
        }
        let _ = writeln!(out, "{axis}");

        let _ = writeln!(
            out,
            "{:>width$}",
            format!("{} ->", chart.x_label),
            width = MARGIN + self.width
        );
        for series in &chart.series {
            let _ = writeln!(
                out,
                "{:MARGIN$}{} {} ({})",
                "",
                Self::glyph(series.style),
                series.name,
                chart.y_label
            );
        }

        Ok(out)
    }
}

impl Renderer for TextRenderer {
    fn render(&self, chart: &ChartSpec) -> Result<()> {
        let canvas = self.draw(chart)?;
        println!("{canvas}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartSeries;
    use chrono::NaiveDate;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n as i64)
            .map(|i| start + chrono::Duration::days(i))
            .collect()
    }

    #[test]
    fn draw_contains_title_axis_and_legend() {
        let chart = ChartSpec::new("Daily Transactions", dates(10))
            .with_series(ChartSeries::solid("Actual Data", (0..10).map(|i| i as f64).collect()));

        let canvas = TextRenderer::default().draw(&chart).unwrap();
        assert!(canvas.contains("Daily Transactions"));
        assert!(canvas.contains("2024-01-01"));
        assert!(canvas.contains("2024-01-10"));
        assert!(canvas.contains("* Actual Data"));
    }

    #[test]
    fn dashed_series_uses_a_distinct_glyph() {
        let chart = ChartSpec::new("Forecast", dates(10))
            .with_series(ChartSeries::solid("Actual Data", vec![1.0; 6]))
            .with_series(ChartSeries::dashed("Forecast", vec![2.0; 4]).with_start(6));

        let canvas = TextRenderer::default().draw(&chart).unwrap();
        assert!(canvas.contains('*'));
        assert!(canvas.contains('+'));
        assert!(canvas.contains("+ Forecast"));
    }

    #[test]
    fn extremes_appear_on_the_y_axis() {
        let chart = ChartSpec::new("t", dates(5))
            .with_series(ChartSeries::solid("s", vec![0.0, 10.0, 20.0, 30.0, 40.0]));

        let canvas = TextRenderer::default().draw(&chart).unwrap();
        assert!(canvas.contains("40.0"));
        assert!(canvas.contains("0.0"));
    }

    #[test]
    fn empty_chart_draws_placeholder() {
        let chart = ChartSpec::new("t", vec![]);
        let canvas = TextRenderer::default().draw(&chart).unwrap();
        assert!(canvas.contains("(no data)"));
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let chart = ChartSpec::new("t", dates(4))
            .with_series(ChartSeries::solid("s", vec![5.0; 4]));
        let canvas = TextRenderer::default().draw(&chart).unwrap();
        assert!(canvas.contains('*'));
    }
}
