//! CLI entry point for the transaction forecasting pipeline.

use anyhow::Result;
use clap::Parser;
use retail_forecast::pipeline::{Pipeline, PipelineConfig, PipelineOutcome};
use retail_forecast::render::{NullRenderer, Renderer, TextRenderer};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Aggregate retail transactions by day and forecast with ARIMA",
    long_about = "Loads a transaction CSV, prints an exploratory report, aggregates\n\
                  transaction counts by calendar day, fits an ARIMA(5,1,0) model and\n\
                  forecasts 30 days forward.\n\n\
                  EXAMPLES:\n  \
                  # Defaults match the bakery transaction layout\n  \
                  retail-forecast -i Bakery.csv\n\n  \
                  # Custom columns and horizon\n  \
                  retail-forecast -i sales.csv --time-column Timestamp --target-column Qty --horizon 14"
)]
struct Args {
    /// Path to the transaction CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Name of the timestamp column
    #[arg(long, default_value = "DateTime")]
    time_column: String,

    /// Name of the count column to aggregate and forecast
    #[arg(long, default_value = "TransactionNo")]
    target_column: String,

    /// Forecast horizon in days
    #[arg(long, default_value = "30")]
    horizon: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,
}

/// Initialize the tracing subscriber, honoring `RUST_LOG` when set.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = PipelineConfig::new(&args.input);
    config.time_column = args.time_column;
    config.target_column = args.target_column;
    config.horizon = args.horizon;

    let renderer: Box<dyn Renderer> = if args.no_charts {
        Box::new(NullRenderer)
    } else {
        Box::new(TextRenderer::default())
    };

    let pipeline = Pipeline::with_renderer(config, renderer);
    match pipeline.run()? {
        PipelineOutcome::Completed(_) => {}
        PipelineOutcome::Aborted => {
            // The load error has already been reported; end the run quietly.
            warn!("pipeline aborted: no data loaded");
        }
    }

    Ok(())
}
