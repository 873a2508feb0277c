//! Shared numeric utilities.

pub mod ols;
pub mod stats;

pub use ols::{ols_fit, OlsFit};
pub use stats::{mean, quantile, std_dev, two_sided_p_value, variance};
