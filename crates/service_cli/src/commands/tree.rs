//! Tree command implementation
//!
//! Builds the full CRR lattice and prints its first layers.

use serde::Serialize;
use tracing::{info, warn};

use pricer_core::types::MarketParams;
use pricer_models::lattice::{price_crr, BinomialTree, CrrParams};

use super::{Context, MarketArgs};
use crate::output::{print_json, OutputFormat, Table};
use crate::{CliError, Result};

/// Layers printed when `--layers` is not given.
const DEFAULT_LAYERS: usize = 5;

/// One time layer of the lattice.
#[derive(Debug, Clone, Serialize)]
pub struct LayerReport {
    /// Layer index i
    pub index: usize,
    /// Underlying prices, j = 0..=i
    pub stock: Vec<f64>,
    /// Option values
    pub value: Vec<f64>,
    /// Hedge ratios; empty on the terminal layer
    pub delta: Vec<f64>,
}

/// Output of `hedgelab tree`.
#[derive(Debug, Clone, Serialize)]
pub struct TreeReport {
    /// Inputs
    pub params: MarketParams,
    /// Lattice factors; absent in the degenerate regime
    pub crr: Option<CrrParams>,
    /// Root value
    pub price: f64,
    /// Root delta
    pub delta: f64,
    /// Leading layers
    pub layers: Vec<LayerReport>,
}

fn layer_report(tree: &BinomialTree, i: usize) -> LayerReport {
    LayerReport {
        index: i,
        stock: tree.layer_stock(i).to_vec(),
        value: tree.layer_values(i).to_vec(),
        delta: tree.layer_deltas(i).to_vec(),
    }
}

/// Builds the lattice and collects layers `0..=layers`.
pub fn compute(params: &MarketParams, steps: usize, layers: usize) -> Result<TreeReport> {
    if layers > steps {
        return Err(CliError::invalid_argument(format!(
            "--layers ({}) cannot exceed --steps ({})",
            layers, steps
        )));
    }

    let result = price_crr(params, steps, true)?;
    let (crr, layers) = match &result.tree {
        Some(tree) => (
            Some(*tree.crr()),
            (0..=layers).map(|i| layer_report(tree, i)).collect(),
        ),
        None => (None, Vec::new()),
    };

    Ok(TreeReport {
        params: *params,
        crr,
        price: result.price,
        delta: result.delta,
        layers,
    })
}

/// Run the tree command
pub fn run(ctx: &Context, market: &MarketArgs, steps: usize, layers: Option<usize>) -> Result<()> {
    let params = market.resolve(&ctx.config.market)?;
    let layers = layers.unwrap_or_else(|| steps.min(DEFAULT_LAYERS));

    info!("Building CRR lattice with {} steps", steps);
    let report = compute(&params, steps, layers)?;
    if report.crr.is_none() {
        warn!("Degenerate market (T = 0 or σ = 0): no lattice built, intrinsic value returned");
    }

    match ctx.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            if let Some(crr) = &report.crr {
                println!(
                    "\nΔt={:.6} u={:.6} d={:.6} p={:.6}",
                    crr.dt(),
                    crr.up(),
                    crr.down(),
                    crr.prob()
                );
            }
            println!("price={:.6} delta={:.6}", report.price, report.delta);

            let mut table = Table::new(&["Layer", "Node", "Stock", "Value", "Delta"]);
            for layer in &report.layers {
                for j in 0..=layer.index {
                    table.row([
                        layer.index.to_string(),
                        j.to_string(),
                        format!("{:.4}", layer.stock[j]),
                        format!("{:.4}", layer.value[j]),
                        layer
                            .delta
                            .get(j)
                            .map(|d| format!("{:.4}", d))
                            .unwrap_or_else(|| "-".to_string()),
                    ]);
                }
            }
            table.print();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionType;

    fn atm_call() -> MarketParams {
        MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    #[test]
    fn test_layers_are_triangular() {
        let report = compute(&atm_call(), 10, 3).unwrap();
        assert_eq!(report.layers.len(), 4);
        for layer in &report.layers {
            assert_eq!(layer.stock.len(), layer.index + 1);
            assert_eq!(layer.value.len(), layer.index + 1);
            assert_eq!(layer.delta.len(), layer.index + 1);
        }
        assert_relative_eq!(report.layers[0].stock[0], 100.0);
        assert_relative_eq!(report.layers[0].value[0], report.price, epsilon = 1e-12);
    }

    #[test]
    fn test_terminal_layer_has_no_deltas() {
        let report = compute(&atm_call(), 4, 4).unwrap();
        assert!(report.layers[4].delta.is_empty());
    }

    #[test]
    fn test_too_many_layers_rejected() {
        assert!(matches!(
            compute(&atm_call(), 3, 4),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_degenerate_market_has_no_layers() {
        let expired = MarketParams::new(110.0, 100.0, 0.0, 0.05, 0.2, OptionType::Call).unwrap();
        let report = compute(&expired, 5, 2).unwrap();
        assert!(report.crr.is_none());
        assert!(report.layers.is_empty());
        assert_eq!(report.price, 10.0);
    }
}
