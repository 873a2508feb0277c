//! Pipeline orchestration: load, explore, clean, forecast.
//!
//! The stages run in strict order. A load failure aborts the run before any
//! later stage; every later error propagates to the caller unhandled, so a
//! fit failure terminates the process the way the pipeline's callers expect.

use crate::clean;
use crate::core::{DailySeries, DataTable, ForecastPath};
use crate::error::Result;
use crate::explore;
use crate::ingest;
use crate::models::arima::{Arima, ArimaOrder};
use crate::models::Forecaster;
use crate::render::{ChartSeries, ChartSpec, Renderer, TextRenderer};
use std::path::PathBuf;
use tracing::{error, info};

/// Pipeline configuration.
///
/// Defaults reproduce the retail transaction setup: `DateTime` timestamps,
/// `TransactionNo` counts, an ARIMA(5,1,0) fit, and a 30-day horizon.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path of the transaction CSV.
    pub path: PathBuf,
    /// Name of the timestamp column.
    pub time_column: String,
    /// Name of the numeric column to aggregate and forecast.
    pub target_column: String,
    /// Forecast horizon in days.
    pub horizon: usize,
    /// Model order for the fit.
    pub order: ArimaOrder,
    /// Rows shown by the exploration preview.
    pub preview_rows: usize,
}

impl PipelineConfig {
    /// Configuration with the default columns, order, and horizon.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            time_column: "DateTime".to_string(),
            target_column: "TransactionNo".to_string(),
            horizon: 30,
            order: ArimaOrder { p: 5, d: 1, q: 0 },
            preview_rows: explore::PREVIEW_ROWS,
        }
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// All stages ran; the forecast is attached.
    Completed(ForecastPath),
    /// Loading failed; no later stage was executed.
    Aborted,
}

impl PipelineOutcome {
    /// The forecast, when the run completed.
    pub fn forecast(&self) -> Option<&ForecastPath> {
        match self {
            PipelineOutcome::Completed(path) => Some(path),
            PipelineOutcome::Aborted => None,
        }
    }
}

/// The four-stage forecasting pipeline.
pub struct Pipeline {
    config: PipelineConfig,
    renderer: Box<dyn Renderer>,
}

impl Pipeline {
    /// Pipeline with the terminal chart renderer.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_renderer(config, Box::new(TextRenderer::default()))
    }

    /// Pipeline with a custom rendering backend.
    pub fn with_renderer(config: PipelineConfig, renderer: Box<dyn Renderer>) -> Self {
        Self { config, renderer }
    }

    /// Run all stages in order.
    ///
    /// Returns `Aborted` when loading fails; any later error propagates.
    pub fn run(&self) -> Result<PipelineOutcome> {
        info!(path = %self.config.path.display(), "loading transaction data");
        let mut table = match ingest::load_table(&self.config.path) {
            Ok(table) => {
                info!(
                    rows = table.n_rows(),
                    columns = table.n_columns(),
                    "data loaded successfully"
                );
                table
            }
            Err(e) => {
                error!("error loading data: {e}");
                return Ok(PipelineOutcome::Aborted);
            }
        };

        explore::explore(&table, self.config.preview_rows);

        clean::clean(
            &mut table,
            &self.config.time_column,
            &self.config.target_column,
        )?;
        info!("data cleaned");

        let forecast = self.forecast_stage(&mut table)?;

        println!(
            "Forecasted values for the next {} time periods:",
            forecast.horizon()
        );
        for (date, value) in forecast.iter() {
            println!("{date}: {value:.6}");
        }

        Ok(PipelineOutcome::Completed(forecast))
    }

    /// Aggregate by day, fit, and forecast.
    fn forecast_stage(&self, table: &mut DataTable) -> Result<ForecastPath> {
        // Re-parse defensively; a no-op when the cleaner already ran.
        clean::parse_timestamps(table, &self.config.time_column)?;
        table.set_index(&self.config.time_column)?;

        let daily = DailySeries::aggregate(table, &self.config.target_column)?;
        info!(days = daily.len(), "aggregated transactions by day");

        let actual = ChartSpec::new("Time Series - Actual Data", daily.dates().to_vec())
            .with_series(ChartSeries::solid("Actual Data", daily.values().to_vec()));
        self.renderer.render(&actual)?;

        let mut model = Arima::with_order(self.config.order);
        model.fit(&daily)?;
        println!("{}", model.summary()?);

        let values = model.predict(self.config.horizon)?;
        let dates = daily.future_dates(self.config.horizon)?;

        let mut axis = daily.dates().to_vec();
        axis.extend_from_slice(&dates);
        let overlay = ChartSpec::new("Time Series Forecast - ARIMA", axis)
            .with_series(ChartSeries::solid("Actual Data", daily.values().to_vec()))
            .with_series(
                ChartSeries::dashed("Forecasted Data", values.clone())
                    .with_start(daily.len()),
            );
        self.renderer.render(&overlay)?;

        ForecastPath::new(dates, values)
    }
}
