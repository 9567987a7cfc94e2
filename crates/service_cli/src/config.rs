//! CLI configuration management.
//!
//! Handles loading of `hedgelab.toml` with `HEDGELAB_*` environment
//! variable overrides. Command-line flags take precedence over both.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pricer_core::types::{MarketParams, OptionType, PricingResult};
use pricer_pricing::mc::{DeltaSourceKind, RebalanceFrequency, DEFAULT_SEED, MAX_PATHS, MAX_STEPS};

use crate::output::OutputFormat;

/// Default market inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Spot price S₀
    #[serde(default = "default_spot")]
    pub spot: f64,

    /// Strike K
    #[serde(default = "default_strike")]
    pub strike: f64,

    /// Maturity T in years
    #[serde(default = "default_maturity")]
    pub maturity: f64,

    /// Annualised risk-free rate
    #[serde(default = "default_rate")]
    pub rate: f64,

    /// Annualised volatility
    #[serde(default = "default_volatility")]
    pub volatility: f64,

    /// Call or put
    #[serde(default)]
    pub option_type: OptionType,
}

fn default_spot() -> f64 {
    100.0
}

fn default_strike() -> f64 {
    100.0
}

fn default_maturity() -> f64 {
    1.0
}

fn default_rate() -> f64 {
    0.05
}

fn default_volatility() -> f64 {
    0.2
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            spot: default_spot(),
            strike: default_strike(),
            maturity: default_maturity(),
            rate: default_rate(),
            volatility: default_volatility(),
            option_type: OptionType::default(),
        }
    }
}

impl MarketConfig {
    /// Validated market parameters.
    pub fn market_params(&self) -> PricingResult<MarketParams> {
        MarketParams::new(
            self.spot,
            self.strike,
            self.maturity,
            self.rate,
            self.volatility,
            self.option_type,
        )
    }
}

/// Monte Carlo defaults for `paths` and `hedge`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Time steps per path
    #[serde(default = "default_n_steps")]
    pub n_steps: usize,

    /// Number of paths
    #[serde(default = "default_n_paths")]
    pub n_paths: usize,

    /// RNG seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Calendar rebalancing frequency of the hedge
    #[serde(default = "default_rebalance")]
    pub rebalance: RebalanceFrequency,

    /// Model supplying hedge ratios
    #[serde(default)]
    pub delta_source: DeltaSourceKind,
}

fn default_n_steps() -> usize {
    252
}

fn default_n_paths() -> usize {
    1_000
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_rebalance() -> RebalanceFrequency {
    RebalanceFrequency::Weekly
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_steps: default_n_steps(),
            n_paths: default_n_paths(),
            seed: default_seed(),
            rebalance: default_rebalance(),
            delta_source: DeltaSourceKind::default(),
        }
    }
}

/// Lattice defaults for `price`, `tree` and `convergence`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// CRR steps used by `price`
    #[serde(default = "default_lattice_steps")]
    pub steps: usize,

    /// Largest N swept by `convergence`
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_lattice_steps() -> usize {
    200
}

fn default_max_steps() -> usize {
    200
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            steps: default_lattice_steps(),
            max_steps: default_max_steps(),
        }
    }
}

/// hedgelab configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Market inputs
    #[serde(default)]
    pub market: MarketConfig,

    /// Monte Carlo settings
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Lattice settings
    #[serde(default)]
    pub lattice: LatticeConfig,

    /// Output format
    #[serde(default)]
    pub output: OutputFormat,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            simulation: SimulationConfig::default(),
            lattice: LatticeConfig::default(),
            output: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` if the file exists, otherwise the defaults
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Values that fail to parse leave the current setting untouched.
    pub fn with_env_override(mut self) -> Self {
        if let Some(spot) = env_parse("HEDGELAB_SPOT") {
            self.market.spot = spot;
        }
        if let Some(strike) = env_parse("HEDGELAB_STRIKE") {
            self.market.strike = strike;
        }
        if let Some(maturity) = env_parse("HEDGELAB_MATURITY") {
            self.market.maturity = maturity;
        }
        if let Some(rate) = env_parse("HEDGELAB_RATE") {
            self.market.rate = rate;
        }
        if let Some(volatility) = env_parse("HEDGELAB_VOLATILITY") {
            self.market.volatility = volatility;
        }
        if let Some(option_type) = env_parse("HEDGELAB_OPTION_TYPE") {
            self.market.option_type = option_type;
        }

        if let Some(n_steps) = env_parse("HEDGELAB_N_STEPS") {
            self.simulation.n_steps = n_steps;
        }
        if let Some(n_paths) = env_parse("HEDGELAB_N_PATHS") {
            self.simulation.n_paths = n_paths;
        }
        if let Some(seed) = env_parse("HEDGELAB_SEED") {
            self.simulation.seed = seed;
        }
        if let Some(rebalance) = env_parse("HEDGELAB_REBALANCE") {
            self.simulation.rebalance = rebalance;
        }
        if let Some(delta_source) = env_parse("HEDGELAB_DELTA_SOURCE") {
            self.simulation.delta_source = delta_source;
        }

        if let Some(steps) = env_parse("HEDGELAB_LATTICE_STEPS") {
            self.lattice.steps = steps;
        }
        if let Some(max_steps) = env_parse("HEDGELAB_MAX_STEPS") {
            self.lattice.max_steps = max_steps;
        }

        if let Some(output) = env_parse("HEDGELAB_OUTPUT") {
            self.output = output;
        }
        if let Ok(log_level) = std::env::var("HEDGELAB_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Err(e) = self.market.market_params() {
            errors.push(format!("market: {}", e));
        }

        let sim = &self.simulation;
        if sim.n_steps == 0 || sim.n_steps > MAX_STEPS {
            errors.push(format!(
                "simulation.n_steps must be in [1, {}], got {}",
                MAX_STEPS, sim.n_steps
            ));
        }
        if sim.n_paths == 0 || sim.n_paths > MAX_PATHS {
            errors.push(format!(
                "simulation.n_paths must be in [1, {}], got {}",
                MAX_PATHS, sim.n_paths
            ));
        }
        if let DeltaSourceKind::Lattice { steps: Some(0) } = sim.delta_source {
            errors.push("simulation.delta_source lattice steps must be greater than 0".to_string());
        }

        if self.lattice.steps == 0 {
            errors.push("lattice.steps must be greater than 0".to_string());
        }
        if self.lattice.max_steps == 0 {
            errors.push("lattice.max_steps must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from `path` (or defaults), apply environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::load_or_default(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.market.spot, 100.0);
        assert_eq!(config.market.option_type, OptionType::Call);
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.simulation.rebalance, RebalanceFrequency::Weekly);
        assert_eq!(config.lattice.steps, 200);
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let file = write_config(
            r#"
log_level = "debug"
output = "json"

[market]
strike = 110.0
option_type = "put"

[simulation]
n_paths = 500
rebalance = "daily"
"#,
        );
        let config = CliConfig::load(file.path()).unwrap();

        assert_eq!(config.market.strike, 110.0);
        assert_eq!(config.market.spot, 100.0);
        assert_eq!(config.market.option_type, OptionType::Put);
        assert_eq!(config.simulation.n_paths, 500);
        assert_eq!(config.simulation.n_steps, 252);
        assert_eq!(config.simulation.rebalance, RebalanceFrequency::Daily);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_lattice_delta_source() {
        let file = write_config(
            r#"
[simulation]
delta_source = { lattice = { steps = 150 } }
"#,
        );
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(
            config.simulation.delta_source,
            DeltaSourceKind::Lattice { steps: Some(150) }
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CliConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("[market\nspot = ");
        assert!(matches!(
            CliConfig::load_or_default(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = CliConfig {
            log_level: "loud".to_string(),
            ..CliConfig::default()
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("log_level"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = CliConfig::default();
        config.market.volatility = -0.2;
        config.simulation.n_paths = 0;
        config.simulation.n_steps = MAX_STEPS + 1;
        config.lattice.max_steps = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors[0].contains("volatility"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("HEDGELAB_SPOT", "120");
        std::env::set_var("HEDGELAB_OPTION_TYPE", "put");
        std::env::set_var("HEDGELAB_REBALANCE", "monthly");
        std::env::set_var("HEDGELAB_DELTA_SOURCE", "lattice");
        std::env::set_var("HEDGELAB_N_PATHS", "not-a-number");

        let config = CliConfig::default().with_env_override();

        std::env::remove_var("HEDGELAB_SPOT");
        std::env::remove_var("HEDGELAB_OPTION_TYPE");
        std::env::remove_var("HEDGELAB_REBALANCE");
        std::env::remove_var("HEDGELAB_DELTA_SOURCE");
        std::env::remove_var("HEDGELAB_N_PATHS");

        assert_eq!(config.market.spot, 120.0);
        assert_eq!(config.market.option_type, OptionType::Put);
        assert_eq!(config.simulation.rebalance, RebalanceFrequency::Monthly);
        assert_eq!(
            config.simulation.delta_source,
            DeltaSourceKind::Lattice { steps: None }
        );
        // Unparseable values are ignored
        assert_eq!(config.simulation.n_paths, 1_000);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation errors: a; b");
    }
}
