//! # retail-forecast
//!
//! Daily transaction aggregation and ARIMA forecasting for retail
//! transaction logs.
//!
//! The pipeline loads a transaction CSV, prints an exploratory report,
//! cleans the timestamp and count columns, aggregates counts by calendar
//! day, fits an ARIMA(5,1,0) model, and forecasts 30 days forward, with a
//! chart at each stage rendered through a swappable backend.

#![allow(clippy::needless_range_loop)]

pub mod clean;
pub mod core;
pub mod error;
pub mod explore;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod utils;

pub use error::{PipelineError, Result};

pub mod prelude {
    pub use crate::core::{DailySeries, DataTable, ForecastPath};
    pub use crate::error::{PipelineError, Result};
    pub use crate::models::arima::{Arima, ArimaOrder};
    pub use crate::models::Forecaster;
    pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
    pub use crate::render::{NullRenderer, Renderer, TextRenderer};
}
