//! Paths command implementation
//!
//! Simulates GBM paths and summarises the terminal distribution against
//! its risk-neutral moments.

use serde::Serialize;
use tracing::info;

use pricer_core::math::statistics::{mean, quantile_sorted, sample_std};
use pricer_core::types::MarketParams;
use pricer_pricing::mc::simulate_paths;

use super::{Context, MarketArgs, SimulationArgs};
use crate::output::{print_json, OutputFormat, Table};
use crate::Result;

/// Terminal-distribution summary of a simulated path set.
#[derive(Debug, Clone, Serialize)]
pub struct PathSummary {
    /// Number of paths
    pub n_paths: usize,
    /// Steps per path
    pub n_steps: usize,
    /// RNG seed
    pub seed: u64,
    /// Sample mean of S_T
    pub mean: f64,
    /// Risk-neutral mean S₀·e^{rT}
    pub expected_mean: f64,
    /// Sample standard deviation of S_T
    pub std_dev: f64,
    /// Smallest S_T
    pub min: f64,
    /// 5th percentile
    pub p05: f64,
    /// Median
    pub median: f64,
    /// 95th percentile
    pub p95: f64,
    /// Largest S_T
    pub max: f64,
}

/// Simulates and summarises.
pub fn compute(params: &MarketParams, n_steps: usize, n_paths: usize, seed: u64) -> Result<PathSummary> {
    let paths = simulate_paths(params, n_steps, n_paths, seed)?;
    let mut terminal = paths.terminal_prices();
    terminal.sort_by(f64::total_cmp);

    Ok(PathSummary {
        n_paths,
        n_steps,
        seed,
        mean: mean(&terminal),
        expected_mean: params.spot() * (params.rate() * params.maturity()).exp(),
        std_dev: sample_std(&terminal),
        min: terminal[0],
        p05: quantile_sorted(&terminal, 0.05)?,
        median: quantile_sorted(&terminal, 0.5)?,
        p95: quantile_sorted(&terminal, 0.95)?,
        max: terminal[terminal.len() - 1],
    })
}

/// Run the paths command
pub fn run(ctx: &Context, market: &MarketArgs, sim: &SimulationArgs) -> Result<()> {
    let params = market.resolve(&ctx.config.market)?;
    let (n_steps, n_paths, seed) = sim.resolve(&ctx.config.simulation);

    info!("Simulating {} GBM paths of {} steps (seed {})", n_paths, n_steps, seed);
    let summary = compute(&params, n_steps, n_paths, seed)?;

    match ctx.format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Table => {
            let mut table = Table::new(&["Statistic", "S_T"]);
            table.row(["Mean".to_string(), format!("{:.4}", summary.mean)]);
            table.row(["S₀·e^{rT}".to_string(), format!("{:.4}", summary.expected_mean)]);
            table.row(["Std dev".to_string(), format!("{:.4}", summary.std_dev)]);
            table.row(["Min".to_string(), format!("{:.4}", summary.min)]);
            table.row(["5%".to_string(), format!("{:.4}", summary.p05)]);
            table.row(["Median".to_string(), format!("{:.4}", summary.median)]);
            table.row(["95%".to_string(), format!("{:.4}", summary.p95)]);
            table.row(["Max".to_string(), format!("{:.4}", summary.max)]);
            table.print();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::OptionType;

    #[test]
    fn test_summary_matches_risk_neutral_mean() {
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
        let summary = compute(&params, 50, 20_000, 7).unwrap();

        // Standard error of the mean is about 0.15 here
        assert!((summary.mean - summary.expected_mean).abs() < 1.0);
        assert!(summary.min <= summary.p05 && summary.p05 <= summary.median);
        assert!(summary.median <= summary.p95 && summary.p95 <= summary.max);
    }

    #[test]
    fn test_zero_paths_rejected() {
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
        assert!(compute(&params, 10, 0, 1).is_err());
    }
}
