//! Delta-hedging simulation configuration.
//!
//! This module provides [`HedgingConfig`] and its builder, plus the
//! [`RebalanceFrequency`] helper that turns calendar frequencies into a
//! rebalancing interval on the native path grid.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{PricingError, PricingResult};

use super::delta::DeltaSourceKind;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Upper bound on the number of paths that keep full trajectories.
pub const DEFAULT_DISPLAY_PATHS: usize = 100;

/// Calendar rebalancing frequency.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::RebalanceFrequency;
///
/// // 252 native steps over one year
/// assert_eq!(RebalanceFrequency::Daily.interval(252, 1.0), 1);
/// assert_eq!(RebalanceFrequency::Weekly.interval(252, 1.0), 5);
/// assert_eq!(RebalanceFrequency::Monthly.interval(252, 1.0), 21);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RebalanceFrequency {
    /// 252 rebalancing dates per year.
    Daily,
    /// 52 rebalancing dates per year.
    Weekly,
    /// 12 rebalancing dates per year.
    Monthly,
}

impl RebalanceFrequency {
    /// Rebalancing dates per year.
    pub fn per_year(self) -> f64 {
        match self {
            RebalanceFrequency::Daily => 252.0,
            RebalanceFrequency::Weekly => 52.0,
            RebalanceFrequency::Monthly => 12.0,
        }
    }

    /// Interval k in native steps for a grid of `n_steps` over `maturity` years.
    ///
    /// Rounded to the nearest step and clamped to `[1, n_steps]`.
    pub fn interval(self, n_steps: usize, maturity: f64) -> usize {
        if n_steps == 0 || maturity <= 0.0 {
            return 1;
        }
        let steps_per_year = n_steps as f64 / maturity;
        let k = (steps_per_year / self.per_year()).round() as usize;
        k.clamp(1, n_steps)
    }
}

impl fmt::Display for RebalanceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebalanceFrequency::Daily => write!(f, "daily"),
            RebalanceFrequency::Weekly => write!(f, "weekly"),
            RebalanceFrequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for RebalanceFrequency {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "d" => Ok(RebalanceFrequency::Daily),
            "weekly" | "w" => Ok(RebalanceFrequency::Weekly),
            "monthly" | "m" => Ok(RebalanceFrequency::Monthly),
            _ => Err(PricingError::invalid(
                "rebalance_frequency",
                format!("expected daily, weekly or monthly, got '{}'", s),
            )),
        }
    }
}

/// Delta-hedging simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`HedgingConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{DeltaSourceKind, HedgingConfig};
///
/// let config = HedgingConfig::builder()
///     .n_paths(1_000)
///     .n_steps(252)
///     .rebalance_every(5)
///     .delta_source(DeltaSourceKind::Analytic)
///     .seed(7)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_display(), 100);
/// assert_eq!(config.rebalance_every(), 5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HedgingConfig {
    n_paths: usize,
    n_steps: usize,
    rebalance_every: usize,
    delta_source: DeltaSourceKind,
    seed: u64,
    n_display: usize,
}

impl HedgingConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> HedgingConfigBuilder {
        HedgingConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of native time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the rebalancing interval k in native steps.
    #[inline]
    pub fn rebalance_every(&self) -> usize {
        self.rebalance_every
    }

    /// Returns the hedge-ratio model.
    #[inline]
    pub fn delta_source(&self) -> DeltaSourceKind {
        self.delta_source
    }

    /// Returns the seed of the path generator.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of leading paths that keep full trajectories.
    #[inline]
    pub fn n_display(&self) -> usize {
        self.n_display
    }

    /// Number of rebalancing dates strictly before maturity, including t = 0.
    pub fn rebalance_count(&self) -> usize {
        (self.n_steps - 1) / self.rebalance_every + 1
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `n_steps` is 0 or greater than 10,000
    /// - `rebalance_every` is 0 or greater than `n_steps`
    /// - `n_display` exceeds `n_paths`
    /// - an explicit lattice step count is 0
    pub fn validate(&self) -> PricingResult<()> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(PricingError::invalid(
                "n_paths",
                format!("must be in range [1, {}], got {}", MAX_PATHS, self.n_paths),
            ));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(PricingError::invalid(
                "n_steps",
                format!("must be in range [1, {}], got {}", MAX_STEPS, self.n_steps),
            ));
        }
        if self.rebalance_every == 0 {
            return Err(PricingError::invalid(
                "rebalance_frequency",
                "must be at least 1 native step",
            ));
        }
        if self.rebalance_every > self.n_steps {
            return Err(PricingError::invalid(
                "rebalance_frequency",
                format!(
                    "interval {} exceeds the {} native steps",
                    self.rebalance_every, self.n_steps
                ),
            ));
        }
        if self.n_display > self.n_paths {
            return Err(PricingError::invalid(
                "n_display",
                format!("{} exceeds n_paths = {}", self.n_display, self.n_paths),
            ));
        }
        if let DeltaSourceKind::Lattice { steps: Some(0) } = self.delta_source {
            return Err(PricingError::invalid("lattice_steps", "must be at least 1"));
        }
        Ok(())
    }
}

/// Builder for [`HedgingConfig`].
///
/// `n_paths` and `n_steps` are required. Defaults: rebalance every native
/// step, Black-Scholes deltas, seed 42, and `min(100, n_paths)` displayed
/// trajectories.
#[derive(Clone, Debug, Default)]
pub struct HedgingConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    rebalance_every: Option<usize>,
    delta_source: DeltaSourceKind,
    seed: Option<u64>,
    n_display: Option<usize>,
}

impl HedgingConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of native time steps per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the rebalancing interval k in native steps.
    #[inline]
    pub fn rebalance_every(mut self, k: usize) -> Self {
        self.rebalance_every = Some(k);
        self
    }

    /// Sets the hedge-ratio model.
    #[inline]
    pub fn delta_source(mut self, kind: DeltaSourceKind) -> Self {
        self.delta_source = kind;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of leading paths that keep full trajectories.
    #[inline]
    pub fn n_display(mut self, n_display: usize) -> Self {
        self.n_display = Some(n_display);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a required count is missing or any
    /// check in [`HedgingConfig::validate`] fails.
    pub fn build(self) -> PricingResult<HedgingConfig> {
        let n_paths = self
            .n_paths
            .ok_or_else(|| PricingError::invalid("n_paths", "must be specified"))?;
        let n_steps = self
            .n_steps
            .ok_or_else(|| PricingError::invalid("n_steps", "must be specified"))?;

        let config = HedgingConfig {
            n_paths,
            n_steps,
            rebalance_every: self.rebalance_every.unwrap_or(1),
            delta_source: self.delta_source,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            n_display: self
                .n_display
                .unwrap_or_else(|| n_paths.min(DEFAULT_DISPLAY_PATHS)),
        };

        config.validate()?;
        Ok(config)
    }
}
