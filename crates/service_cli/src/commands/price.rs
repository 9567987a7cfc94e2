//! Price command implementation
//!
//! Prices one European option with Black-Scholes and a CRR lattice and
//! shows the two side by side.

use serde::Serialize;
use tracing::info;

use pricer_core::types::MarketParams;
use pricer_models::analytical::{price_black_scholes, Greeks};
use pricer_models::lattice::price_crr;

use super::{Context, MarketArgs};
use crate::output::{print_json, OutputFormat, Table};
use crate::Result;

/// Price and hedge ratio from one model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelQuote {
    /// Option value
    pub price: f64,
    /// ∂V/∂S
    pub delta: f64,
}

/// Output of `hedgelab price`.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    /// Inputs
    pub params: MarketParams,
    /// Lattice steps
    pub steps: usize,
    /// Closed form
    pub black_scholes: ModelQuote,
    /// Lattice
    pub crr: ModelQuote,
    /// CRR minus Black-Scholes price
    pub price_difference: f64,
    /// Black-Scholes sensitivities
    pub greeks: Greeks,
}

/// Prices with both models.
pub fn compute(params: &MarketParams, steps: usize) -> Result<PriceReport> {
    let (bs_price, greeks) = price_black_scholes(params)?;
    let crr = price_crr(params, steps, false)?;

    Ok(PriceReport {
        params: *params,
        steps,
        black_scholes: ModelQuote {
            price: bs_price,
            delta: greeks.delta,
        },
        crr: ModelQuote {
            price: crr.price,
            delta: crr.delta,
        },
        price_difference: crr.price - bs_price,
        greeks,
    })
}

/// Run the price command
pub fn run(ctx: &Context, market: &MarketArgs, steps: Option<usize>) -> Result<()> {
    let params = market.resolve(&ctx.config.market)?;
    let steps = steps.unwrap_or(ctx.config.lattice.steps);

    info!("Pricing {} with CRR({}) and Black-Scholes", params.option_type(), steps);
    let report = compute(&params, steps)?;

    match ctx.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            println!(
                "\n{} S={} K={} T={} r={} σ={}",
                params.option_type(),
                params.spot(),
                params.strike(),
                params.maturity(),
                params.rate(),
                params.volatility()
            );

            let mut table = Table::new(&["Model", "Price", "Delta"]);
            table.row([
                "Black-Scholes".to_string(),
                format!("{:.6}", report.black_scholes.price),
                format!("{:.6}", report.black_scholes.delta),
            ]);
            table.row([
                format!("CRR({})", steps),
                format!("{:.6}", report.crr.price),
                format!("{:.6}", report.crr.delta),
            ]);
            table.row([
                "Difference".to_string(),
                format!("{:+.6}", report.price_difference),
                format!("{:+.6}", report.crr.delta - report.black_scholes.delta),
            ]);
            table.print();

            let g = &report.greeks;
            let mut greeks = Table::new(&["Greek", "Value", "Quoted"]);
            greeks.row(["Delta".to_string(), format!("{:.6}", g.delta), format!("{:.6}", g.delta)]);
            greeks.row(["Gamma".to_string(), format!("{:.6}", g.gamma), format!("{:.6}", g.gamma)]);
            greeks.row([
                "Vega".to_string(),
                format!("{:.6}", g.vega),
                format!("{:.6} /vol pt", g.vega_per_point()),
            ]);
            greeks.row([
                "Theta".to_string(),
                format!("{:.6}", g.theta),
                format!("{:.6} /day", g.theta_per_day()),
            ]);
            greeks.row([
                "Rho".to_string(),
                format!("{:.6}", g.rho),
                format!("{:.6} /rate pt", g.rho_per_point()),
            ]);
            greeks.print();
        }
    }

    info!("Pricing complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionType;

    #[test]
    fn test_models_agree_at_reference_point() {
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
        let report = compute(&params, 200).unwrap();

        assert_relative_eq!(report.black_scholes.price, 10.4506, epsilon = 1e-3);
        assert!(report.price_difference.abs() < 0.05);
        assert!((report.crr.delta - report.black_scholes.delta).abs() < 0.01);
    }

    #[test]
    fn test_zero_steps_is_rejected() {
        let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
        assert!(compute(&params, 0).is_err());
    }

    #[test]
    fn test_report_serialises() {
        let params = MarketParams::new(100.0, 95.0, 0.5, 0.03, 0.25, OptionType::Put).unwrap();
        let json = serde_json::to_value(compute(&params, 50).unwrap()).unwrap();
        assert_eq!(json["steps"], 50);
        assert_eq!(json["params"]["option_type"], "put");
        assert!(json["greeks"]["vega"].as_f64().unwrap() > 0.0);
    }
}
