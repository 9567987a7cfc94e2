//! Stress command implementation
//!
//! Re-prices the option under the preset market scenarios, reports the
//! expiry break-even and optionally a Greek surface over spot and
//! volatility.

use clap::Args;
use serde::Serialize;
use tracing::info;

use pricer_core::types::MarketParams;
use pricer_models::analytical::{price_black_scholes, Greek};
use pricer_risk::scenarios::{
    greeks_grid, payoff_profile, stress_test, GreeksGrid, PayoffProfile, ScenarioResult,
    DEFAULT_PROFILE_POINTS,
};

use super::{Context, MarketArgs};
use crate::output::{fmt_opt, print_json, OutputFormat, Table};
use crate::Result;

/// Arguments of `hedgelab stress`.
#[derive(Args, Debug, Clone)]
pub struct StressArgs {
    #[command(flatten)]
    market: MarketArgs,

    /// Also compute a surface of this Greek over spot and volatility
    #[arg(short, long)]
    greek: Option<Greek>,

    /// Points per axis of the Greek surface
    #[arg(long, default_value_t = 9)]
    grid_points: usize,

    /// Points of the expiry payoff profile
    #[arg(long, default_value_t = DEFAULT_PROFILE_POINTS)]
    profile_points: usize,
}

/// Output of `hedgelab stress`.
#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    /// Black-Scholes value under current inputs
    pub base_price: f64,
    /// One entry per preset scenario
    pub scenarios: Vec<ScenarioResult>,
    /// Expiry payoff and P&L of a long position
    pub profile: PayoffProfile,
    /// Greek surface, when requested
    pub grid: Option<GreeksGrid>,
}

/// Runs every scenario analysis.
pub fn compute(
    params: &MarketParams,
    greek: Option<Greek>,
    grid_points: usize,
    profile_points: usize,
) -> Result<StressReport> {
    let (base_price, _) = price_black_scholes(params)?;
    let scenarios = stress_test(params)?;
    let profile = payoff_profile(params, base_price, profile_points);
    let grid = greek
        .map(|g| greeks_grid(params, g, grid_points, grid_points))
        .transpose()?;

    Ok(StressReport {
        base_price,
        scenarios,
        profile,
        grid,
    })
}

/// Run the stress command
pub fn run(ctx: &Context, args: &StressArgs) -> Result<()> {
    let params = args.market.resolve(&ctx.config.market)?;

    info!("Running stress scenarios");
    let report = compute(&params, args.greek, args.grid_points, args.profile_points)?;

    match ctx.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            println!("\nBase price {:.6}", report.base_price);

            let mut table = Table::new(&["Scenario", "Spot", "Vol", "Price", "P&L", "P&L %"]);
            for r in &report.scenarios {
                table.row([
                    r.scenario.name().to_string(),
                    format!("{:.2}", r.spot),
                    format!("{:.1}%", 100.0 * r.volatility),
                    format!("{:.4}", r.price),
                    format!("{:+.4}", r.pnl),
                    fmt_opt(r.pnl_pct, 1),
                ]);
            }
            table.print();

            println!(
                "Break-even at expiry: {:.4} (premium {:.4})",
                report.profile.break_even, report.profile.premium
            );

            if let Some(grid) = &report.grid {
                println!("\n{} surface (rows: vol, columns: spot)", grid.greek);
                let mut headers = vec!["Vol \\ Spot".to_string()];
                headers.extend(grid.spots.iter().map(|s| format!("{:.1}", s)));
                let mut surface = Table::new(headers.as_slice());
                for (i, vol) in grid.vols.iter().enumerate() {
                    let mut row = vec![format!("{:.1}%", 100.0 * vol)];
                    row.extend((0..grid.spots.len()).map(|j| format!("{:.4}", grid.value(i, j))));
                    surface.row(row);
                }
                surface.print();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::OptionType;
    use pricer_risk::scenarios::StressScenario;

    fn atm_call() -> MarketParams {
        MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    #[test]
    fn test_report_without_grid() {
        let report = compute(&atm_call(), None, 9, 50).unwrap();
        assert_eq!(report.scenarios.len(), StressScenario::ALL.len());
        assert_eq!(report.profile.spots.len(), 50);
        assert_eq!(report.profile.premium, report.base_price);
        assert!(report.grid.is_none());
    }

    #[test]
    fn test_report_with_grid() {
        let report = compute(&atm_call(), Some(Greek::Gamma), 5, 10).unwrap();
        let grid = report.grid.unwrap();
        assert_eq!(grid.greek, Greek::Gamma);
        assert_eq!(grid.spots.len(), 5);
        assert_eq!(grid.vols.len(), 5);
        assert!(grid.values.iter().flatten().all(|g| *g >= 0.0));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(compute(&atm_call(), Some(Greek::Delta), 0, 10).is_err());
    }
}
