//! Hedge command implementation
//!
//! Runs the Monte Carlo delta-hedging simulation and reports the
//! distribution of hedging errors.

use clap::Args;
use serde::Serialize;
use tracing::info;

use pricer_core::types::MarketParams;
use pricer_pricing::mc::{
    simulate_hedging_with_config, DeltaSourceKind, HedgingConfig, HedgingResult,
    HedgingStatistics, RebalanceFrequency,
};

use super::{Context, MarketArgs, SimulationArgs};
use crate::output::{fmt_opt, print_json, OutputFormat, Table};
use crate::Result;

/// Arguments of `hedgelab hedge`.
#[derive(Args, Debug, Clone, Default)]
pub struct HedgeArgs {
    #[command(flatten)]
    market: MarketArgs,

    #[command(flatten)]
    sim: SimulationArgs,

    /// Rebalance every k native steps
    #[arg(short = 'k', long, conflicts_with = "frequency")]
    rebalance: Option<usize>,

    /// Calendar rebalancing frequency (daily, weekly, monthly)
    #[arg(long)]
    frequency: Option<RebalanceFrequency>,

    /// Hedge-ratio model (analytic or lattice)
    #[arg(short = 'd', long)]
    delta_source: Option<DeltaSourceKind>,

    /// Lattice steps over the full maturity; implies the lattice source
    #[arg(long)]
    lattice_steps: Option<usize>,

    /// Keep per-path trajectories in JSON output
    #[arg(long)]
    trajectories: bool,
}

/// Hedge settings after flags are layered over the configuration.
#[derive(Debug, Clone, Copy)]
pub struct HedgeSettings {
    /// Native time steps
    pub n_steps: usize,
    /// Number of paths
    pub n_paths: usize,
    /// RNG seed
    pub seed: u64,
    /// Rebalancing interval k in native steps
    pub rebalance_every: usize,
    /// Hedge-ratio model
    pub delta_source: DeltaSourceKind,
    /// Keep per-path trajectories
    pub trajectories: bool,
}

impl HedgeSettings {
    fn config(&self) -> Result<HedgingConfig> {
        let mut builder = HedgingConfig::builder()
            .n_steps(self.n_steps)
            .n_paths(self.n_paths)
            .rebalance_every(self.rebalance_every)
            .delta_source(self.delta_source)
            .seed(self.seed);
        if !self.trajectories {
            builder = builder.n_display(0);
        }
        Ok(builder.build()?)
    }
}

/// Summary output of `hedgelab hedge` without trajectories.
#[derive(Debug, Clone, Serialize)]
pub struct HedgeReport {
    /// Effective simulation configuration
    pub config: HedgingConfig,
    /// Rebalancing dates per path, inception included
    pub rebalance_count: usize,
    /// Premium received at inception
    pub premium: f64,
    /// Hedging-error statistics
    pub statistics: HedgingStatistics,
}

impl From<&HedgingResult> for HedgeReport {
    fn from(result: &HedgingResult) -> Self {
        Self {
            config: result.config.clone(),
            rebalance_count: result.config.rebalance_count(),
            premium: result.premium,
            statistics: result.statistics,
        }
    }
}

/// Runs the simulation for resolved settings.
pub fn compute(params: &MarketParams, settings: &HedgeSettings) -> Result<HedgingResult> {
    let config = settings.config()?;
    Ok(simulate_hedging_with_config(params, &config)?)
}

/// Run the hedge command
pub fn run(ctx: &Context, args: &HedgeArgs) -> Result<()> {
    let params = args.market.resolve(&ctx.config.market)?;
    let (n_steps, n_paths, seed) = args.sim.resolve(&ctx.config.simulation);
    let trajectories = args.trajectories;

    let frequency = args.frequency.unwrap_or(ctx.config.simulation.rebalance);
    let rebalance_every = args
        .rebalance
        .unwrap_or_else(|| frequency.interval(n_steps, params.maturity()));

    let mut delta_source = args.delta_source.unwrap_or(ctx.config.simulation.delta_source);
    if let Some(steps) = args.lattice_steps {
        delta_source = DeltaSourceKind::Lattice { steps: Some(steps) };
    }

    let settings = HedgeSettings {
        n_steps,
        n_paths,
        seed,
        rebalance_every,
        delta_source,
        trajectories,
    };
    info!(
        "Delta hedging {} paths, {} steps, rebalance every {} step(s), {} deltas",
        n_paths, n_steps, rebalance_every, delta_source
    );
    let result = compute(&params, &settings)?;

    match ctx.format {
        OutputFormat::Json if trajectories => print_json(&result)?,
        OutputFormat::Json => print_json(&HedgeReport::from(&result))?,
        OutputFormat::Table => {
            let stats = &result.statistics;
            println!(
                "\n{} paths × {} steps, rebalanced every {} step(s) ({} dates), {} deltas",
                n_paths,
                n_steps,
                rebalance_every,
                result.config.rebalance_count(),
                delta_source
            );

            let mut table = Table::new(&["Statistic", "Value"]);
            table.row(["Premium".to_string(), format!("{:.6}", result.premium)]);
            table.row(["Mean error".to_string(), format!("{:+.6}", stats.mean)]);
            table.row(["Std dev".to_string(), format!("{:.6}", stats.std_dev)]);
            table.row(["VaR 95%".to_string(), format!("{:+.6}", stats.var_95)]);
            table.row(["VaR 99%".to_string(), format!("{:+.6}", stats.var_99)]);
            table.row(["Mean |error|".to_string(), format!("{:.6}", stats.mean_abs_error)]);
            table.row(["Std / premium".to_string(), fmt_opt(stats.error_to_premium, 4)]);
            table.print();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::OptionType;

    fn settings(trajectories: bool) -> HedgeSettings {
        HedgeSettings {
            n_steps: 52,
            n_paths: 200,
            seed: 42,
            rebalance_every: 1,
            delta_source: DeltaSourceKind::Analytic,
            trajectories,
        }
    }

    #[test]
    fn test_trajectories_only_when_requested() {
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();

        let lean = compute(&params, &settings(false)).unwrap();
        assert!(lean.trajectories.is_empty());

        let full = compute(&params, &settings(true)).unwrap();
        assert_eq!(full.trajectories.len(), 100);
        assert_eq!(lean.errors, full.errors);
    }

    #[test]
    fn test_report_carries_statistics() {
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
        let result = compute(&params, &settings(false)).unwrap();
        let report = HedgeReport::from(&result);

        assert_eq!(report.rebalance_count, 52);
        assert_eq!(report.statistics, result.statistics);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["statistics"]["var_95"].is_number());
    }

    #[test]
    fn test_interval_beyond_grid_rejected() {
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
        let bad = HedgeSettings {
            rebalance_every: 53,
            ..settings(false)
        };
        assert!(compute(&params, &bad).is_err());
    }
}
