//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared argument
//! groups resolve against [`CliConfig`] so that flags override the
//! configuration file and environment.

use clap::Args;

use pricer_core::types::{MarketParams, OptionType, PricingResult};

use crate::config::{CliConfig, MarketConfig, SimulationConfig};
use crate::output::OutputFormat;

pub mod check;
pub mod convergence;
pub mod hedge;
pub mod paths;
pub mod price;
pub mod stress;
pub mod tree;

/// Resolved settings handed to every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration after file, environment and validation
    pub config: CliConfig,
    /// Effective output format
    pub format: OutputFormat,
}

/// Market overrides shared by the pricing subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct MarketArgs {
    /// Spot price S₀
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike K
    #[arg(long)]
    pub strike: Option<f64>,

    /// Maturity in years
    #[arg(long)]
    pub maturity: Option<f64>,

    /// Annualised risk-free rate
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Annualised volatility
    #[arg(long = "vol", visible_alias = "volatility")]
    pub volatility: Option<f64>,

    /// Option type (call or put)
    #[arg(long = "type")]
    pub option_type: Option<OptionType>,
}

impl MarketArgs {
    /// Market parameters with flags layered over `base`.
    pub fn resolve(&self, base: &MarketConfig) -> PricingResult<MarketParams> {
        MarketConfig {
            spot: self.spot.unwrap_or(base.spot),
            strike: self.strike.unwrap_or(base.strike),
            maturity: self.maturity.unwrap_or(base.maturity),
            rate: self.rate.unwrap_or(base.rate),
            volatility: self.volatility.unwrap_or(base.volatility),
            option_type: self.option_type.unwrap_or(base.option_type),
        }
        .market_params()
    }
}

/// Monte Carlo overrides shared by `paths` and `hedge`.
#[derive(Args, Debug, Clone, Default)]
pub struct SimulationArgs {
    /// Time steps per path
    #[arg(long)]
    pub steps: Option<usize>,

    /// Number of simulated paths
    #[arg(long)]
    pub paths: Option<usize>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SimulationArgs {
    /// `(n_steps, n_paths, seed)` with flags layered over `base`.
    pub fn resolve(&self, base: &SimulationConfig) -> (usize, usize, u64) {
        (
            self.steps.unwrap_or(base.n_steps),
            self.paths.unwrap_or(base.n_paths),
            self.seed.unwrap_or(base.seed),
        )
    }
}
