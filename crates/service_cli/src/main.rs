//! hedgelab CLI - European option pricing and delta-hedging experiments
//!
//! This is the operational entry point for the hedgelab workspace.
//!
//! # Commands
//!
//! - `hedgelab price` - Black-Scholes and CRR prices side by side
//! - `hedgelab tree` - Print the leading layers of a CRR lattice
//! - `hedgelab convergence` - CRR convergence sweep against Black-Scholes
//! - `hedgelab paths` - Summarise simulated GBM terminal prices
//! - `hedgelab hedge` - Monte Carlo delta-hedging error distribution
//! - `hedgelab stress` - Scenario re-pricing, break-even and Greek surfaces
//! - `hedgelab check` - Show the effective configuration
//!
//! # Configuration
//!
//! Settings resolve in increasing precedence: built-in defaults, the
//! TOML file given by `--config`, `HEDGELAB_*` environment variables and
//! finally command-line flags.
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate orchestrates the pricer crates to
//! provide a unified command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::hedge::HedgeArgs;
use commands::stress::StressArgs;
use commands::{Context, MarketArgs, SimulationArgs};
use config::CliConfig;
use output::OutputFormat;

/// European option pricing and delta-hedging CLI
#[derive(Parser)]
#[command(name = "hedgelab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "HEDGELAB_CONFIG", default_value = "hedgelab.toml")]
    config: PathBuf,

    /// Output format, overriding the configuration
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price with Black-Scholes and a CRR lattice
    Price {
        #[command(flatten)]
        market: MarketArgs,

        /// Lattice steps
        #[arg(short = 'n', long)]
        steps: Option<usize>,
    },

    /// Build a CRR lattice and print its first layers
    Tree {
        #[command(flatten)]
        market: MarketArgs,

        /// Lattice steps
        #[arg(short = 'n', long, default_value_t = 5)]
        steps: usize,

        /// Layers to print (defaults to min(steps, 5))
        #[arg(short, long)]
        layers: Option<usize>,
    },

    /// Sweep CRR step counts and fit the convergence order
    Convergence {
        #[command(flatten)]
        market: MarketArgs,

        /// Largest lattice size in the sweep
        #[arg(short = 'n', long)]
        max_steps: Option<usize>,

        /// Step counts shown in the table
        #[arg(long, value_delimiter = ',', default_values_t = [10, 25, 50, 100, 200])]
        observe: Vec<usize>,
    },

    /// Simulate GBM paths and summarise terminal prices
    Paths {
        #[command(flatten)]
        market: MarketArgs,

        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Simulate discrete delta hedging and report hedging errors
    Hedge(HedgeArgs),

    /// Stress scenarios, break-even and Greek surfaces
    Stress(StressArgs),

    /// Check the effective configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_with_env_and_validate(&cli.config)?;

    // Initialise tracing; RUST_LOG wins over the configured level
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    let ctx = Context {
        format: cli.format.unwrap_or(config.output),
        config,
    };

    match cli.command {
        Commands::Price { market, steps } => commands::price::run(&ctx, &market, steps),
        Commands::Tree {
            market,
            steps,
            layers,
        } => commands::tree::run(&ctx, &market, steps, layers),
        Commands::Convergence {
            market,
            max_steps,
            observe,
        } => commands::convergence::run(&ctx, &market, max_steps, &observe),
        Commands::Paths { market, sim } => commands::paths::run(&ctx, &market, &sim),
        Commands::Hedge(args) => commands::hedge::run(&ctx, &args),
        Commands::Stress(args) => commands::stress::run(&ctx, &args),
        Commands::Check => commands::check::run(&ctx, &cli.config),
    }
}
