//! Textual model-fit summary.

/// One row of the coefficient table.
#[derive(Debug, Clone)]
pub struct CoefficientRow {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub z: f64,
    pub p_value: f64,
}

/// Fit summary: coefficient table plus information criteria.
///
/// Rendered through `Display` in the familiar regression-output layout.
#[derive(Debug, Clone)]
pub struct ModelSummary {
    /// Model description, e.g. `ARIMA(5,1,0)`.
    pub model: String,
    /// Number of observations on the differenced scale.
    pub n_obs: usize,
    pub coefficients: Vec<CoefficientRow>,
    pub sigma2: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
}

const WIDTH: usize = 70;

impl std::fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(WIDTH);
        let thin_rule = "-".repeat(WIDTH);

        writeln!(f, "{:^WIDTH$}", "Model Results")?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<24}{:>10}   {:<18}{:>13}",
            "Model:", self.model, "No. Observations:", self.n_obs
        )?;
        writeln!(
            f,
            "{:<24}{:>10.3}   {:<18}{:>13.3}",
            "Log Likelihood:", self.log_likelihood, "AIC:", self.aic
        )?;
        writeln!(
            f,
            "{:<24}{:>10.3}   {:<18}{:>13.3}",
            "Sigma2:", self.sigma2, "BIC:", self.bic
        )?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<10}{:>12}{:>12}{:>12}{:>12}",
            "", "coef", "std err", "z", "P>|z|"
        )?;
        writeln!(f, "{thin_rule}")?;
        for row in &self.coefficients {
            writeln!(
                f,
                "{:<10}{:>12.4}{:>12.3}{:>12.3}{:>12.3}",
                row.name, row.estimate, row.std_error, row.z, row.p_value
            )?;
        }
        write!(f, "{rule}")
    }
}
