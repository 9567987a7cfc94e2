//! Check command implementation
//!
//! Echoes the effective configuration after file, environment and
//! validation, together with the derived market parameters.

use std::path::Path;

use tracing::info;

use super::Context;
use crate::output::{print_json, OutputFormat, Table};
use crate::Result;

/// Run the check command
pub fn run(ctx: &Context, config_path: &Path) -> Result<()> {
    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        "defaults (no config file)".to_string()
    };
    info!("Configuration loaded from {}", source);

    let config = &ctx.config;
    let params = config.market.market_params()?;

    match ctx.format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Table => {
            println!("\nSource: {}", source);

            let sim = &config.simulation;
            let interval = sim.rebalance.interval(sim.n_steps, params.maturity());

            let mut table = Table::new(&["Setting", "Value"]);
            table.row(["market.option_type".to_string(), params.option_type().to_string()]);
            table.row(["market.spot".to_string(), params.spot().to_string()]);
            table.row(["market.strike".to_string(), params.strike().to_string()]);
            table.row(["market.maturity".to_string(), params.maturity().to_string()]);
            table.row(["market.rate".to_string(), params.rate().to_string()]);
            table.row(["market.volatility".to_string(), params.volatility().to_string()]);
            table.row(["simulation.n_steps".to_string(), sim.n_steps.to_string()]);
            table.row(["simulation.n_paths".to_string(), sim.n_paths.to_string()]);
            table.row(["simulation.seed".to_string(), sim.seed.to_string()]);
            table.row([
                "simulation.rebalance".to_string(),
                format!("{} (every {} step(s))", sim.rebalance, interval),
            ]);
            table.row(["simulation.delta_source".to_string(), sim.delta_source.to_string()]);
            table.row(["lattice.steps".to_string(), config.lattice.steps.to_string()]);
            table.row(["lattice.max_steps".to_string(), config.lattice.max_steps.to_string()]);
            table.row(["log_level".to_string(), config.log_level.clone()]);
            table.print();

            if params.is_degenerate() {
                println!("Note: T = 0 or σ = 0, prices fall back to intrinsic value");
            }
        }
    }

    Ok(())
}
