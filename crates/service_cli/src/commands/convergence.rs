//! Convergence command implementation
//!
//! Sweeps CRR step counts against the Black-Scholes reference and
//! reports the fitted convergence order.

use tracing::{info, warn};

use pricer_risk::convergence::analyze_convergence;

use super::{Context, MarketArgs};
use crate::output::{fmt_opt, print_json, OutputFormat, Table};
use crate::Result;

/// Run the convergence command
pub fn run(
    ctx: &Context,
    market: &MarketArgs,
    max_steps: Option<usize>,
    observe: &[usize],
) -> Result<()> {
    let params = market.resolve(&ctx.config.market)?;
    let max_steps = max_steps.unwrap_or(ctx.config.lattice.max_steps);

    info!("Sweeping CRR lattice up to {} steps", max_steps);
    let series = analyze_convergence(&params, max_steps)?;

    match ctx.format {
        OutputFormat::Json => print_json(&series)?,
        OutputFormat::Table => {
            println!(
                "\nBlack-Scholes price={:.6} delta={:.6}",
                series.bs_price, series.bs_delta
            );
            println!(
                "Fitted order: price {} delta {}",
                fmt_opt(series.price_order, 3),
                fmt_opt(series.delta_order, 3)
            );

            let rows = series.observed_table(observe);
            if rows.len() < observe.len() {
                warn!("Some requested step counts were not part of the sweep and are omitted");
            }

            let mut table = Table::new(&[
                "N",
                "CRR Price",
                "Price Error",
                "N × Error",
                "CRR Delta",
                "Delta Error",
            ]);
            for row in &rows {
                table.row([
                    row.steps.to_string(),
                    format!("{:.6}", row.price),
                    format!("{:.2e}", row.price_error),
                    format!("{:.4}", row.scaled_price_error),
                    format!("{:.6}", row.delta),
                    format!("{:.2e}", row.delta_error),
                ]);
            }
            table.print();
        }
    }

    Ok(())
}
