//! Hedge-ratio sources for the delta-hedging simulator.
//!
//! A [`DeltaSource`] answers two questions for the simulator: what the
//! option is worth at a (spot, remaining maturity) state, which sets the
//! premium, and how many shares to hold there.
//!
//! - [`AnalyticDelta`]: Black-Scholes N(d1)-style deltas
//! - [`LatticeDelta`]: root delta of a fresh CRR lattice spanning the remaining maturity
//!
//! Both switch to the terminal step-function delta once the remaining
//! maturity falls to [`TERMINAL_CUTOFF`] or below. With zero volatility the
//! spot grows deterministically at the risk-free rate, so both value the
//! option at its discounted forward intrinsic `max(S − K·e^{−rτ}, 0)` and
//! hedge with the matching step delta.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{MarketParams, PricingError, PricingResult};
use pricer_models::analytical::{intrinsic_delta, BlackScholes};
use pricer_models::lattice::{price_crr, CrrParams};

/// Remaining maturity (years) at or below which the step-function delta is used.
pub const TERMINAL_CUTOFF: f64 = 1e-3;

/// Minimum number of steps of a re-priced lattice.
pub const MIN_LATTICE_STEPS: usize = 10;

/// Capability to value and delta-hedge one option at a shifted state.
///
/// Implementors are shared read-only across the worker threads that hedge
/// individual paths, hence the `Sync` bound.
pub trait DeltaSource: Sync {
    /// Option value at `spot` with `remaining` years to maturity.
    fn price(&self, spot: f64, remaining: f64) -> PricingResult<f64>;

    /// Hedge ratio at `spot` with `remaining` years to maturity.
    fn delta(&self, spot: f64, remaining: f64) -> PricingResult<f64>;
}

/// Black-Scholes delta source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticDelta {
    params: MarketParams,
}

impl AnalyticDelta {
    /// Creates the source for the option described by `params`.
    pub fn new(params: &MarketParams) -> Self {
        Self { params: *params }
    }

    fn model(&self, spot: f64) -> PricingResult<BlackScholes> {
        BlackScholes::new(spot, self.params.rate(), self.params.volatility())
    }
}

/// Strike discounted over `remaining` years, `None` unless volatility is zero.
fn deterministic_strike(params: &MarketParams, remaining: f64) -> Option<f64> {
    (params.volatility() == 0.0).then(|| params.strike() * (-params.rate() * remaining).exp())
}

impl DeltaSource for AnalyticDelta {
    fn price(&self, spot: f64, remaining: f64) -> PricingResult<f64> {
        if let Some(strike) = deterministic_strike(&self.params, remaining) {
            return Ok(self.params.option_type().payoff(spot, strike));
        }
        let bs = self.model(spot)?;
        Ok(bs.price(self.params.strike(), remaining, self.params.option_type()))
    }

    fn delta(&self, spot: f64, remaining: f64) -> PricingResult<f64> {
        if remaining <= TERMINAL_CUTOFF {
            return Ok(intrinsic_delta(spot, self.params.strike(), self.params.option_type()));
        }
        if let Some(strike) = deterministic_strike(&self.params, remaining) {
            return Ok(intrinsic_delta(spot, strike, self.params.option_type()));
        }
        let bs = self.model(spot)?;
        Ok(bs.delta(self.params.strike(), remaining, self.params.option_type()))
    }
}

/// CRR lattice delta source.
///
/// The lattice keeps a fixed step length Δt_L = T / N_L. At a state with
/// `remaining` years left it builds a fresh lattice of
/// `max(10, ⌈remaining / Δt_L⌉)` steps rooted at the current spot and
/// reads the root hedge ratio, so no node indices are ever carried between
/// rebalancing dates. Rounding up keeps every sub-lattice step no longer
/// than Δt_L.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeDelta {
    params: MarketParams,
    steps: usize,
}

impl LatticeDelta {
    /// Creates the source with `steps` lattice steps over the full maturity.
    ///
    /// # Errors
    /// - `InvalidParameter` if `steps` is zero
    /// - `ArbitrageViolation` if the full-maturity lattice admits arbitrage;
    ///   sub-lattices never use a longer step and stay arbitrage-free
    pub fn new(params: &MarketParams, steps: usize) -> PricingResult<Self> {
        let crr = CrrParams::new(params, steps)?;
        if !params.is_degenerate() {
            crr.check_no_arbitrage()?;
        }
        Ok(Self {
            params: *params,
            steps,
        })
    }

    /// Number of lattice steps spanning the full maturity.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step count of the sub-lattice spanning `remaining` years.
    pub fn steps_for(&self, remaining: f64) -> usize {
        let maturity = self.params.maturity();
        if maturity <= 0.0 {
            return MIN_LATTICE_STEPS;
        }
        let fraction = remaining / maturity;
        ((fraction * self.steps as f64).ceil() as usize).max(MIN_LATTICE_STEPS)
    }

    fn shifted(&self, spot: f64, remaining: f64) -> PricingResult<MarketParams> {
        self.params.with_spot(spot)?.with_maturity(remaining)
    }
}

impl DeltaSource for LatticeDelta {
    fn price(&self, spot: f64, remaining: f64) -> PricingResult<f64> {
        if let Some(strike) = deterministic_strike(&self.params, remaining) {
            return Ok(self.params.option_type().payoff(spot, strike));
        }
        let params = self.shifted(spot, remaining)?;
        Ok(price_crr(&params, self.steps_for(remaining), false)?.price)
    }

    fn delta(&self, spot: f64, remaining: f64) -> PricingResult<f64> {
        if remaining <= TERMINAL_CUTOFF {
            return Ok(intrinsic_delta(spot, self.params.strike(), self.params.option_type()));
        }
        if let Some(strike) = deterministic_strike(&self.params, remaining) {
            return Ok(intrinsic_delta(spot, strike, self.params.option_type()));
        }
        let params = self.shifted(spot, remaining)?;
        Ok(price_crr(&params, self.steps_for(remaining), false)?.delta)
    }
}

/// Selector for the model that supplies hedge ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeltaSourceKind {
    /// Black-Scholes closed form.
    #[default]
    Analytic,
    /// CRR lattice with `steps` steps over the full maturity;
    /// `None` uses `max(10, n_steps)` of the hedging grid.
    Lattice {
        /// Lattice steps over the full maturity.
        steps: Option<usize>,
    },
}

impl DeltaSourceKind {
    /// Lattice step count for a hedging grid of `n_steps`, `None` for analytic.
    pub fn lattice_steps(&self, n_steps: usize) -> Option<usize> {
        match self {
            DeltaSourceKind::Analytic => None,
            DeltaSourceKind::Lattice { steps } => {
                Some(steps.unwrap_or_else(|| n_steps.max(MIN_LATTICE_STEPS)))
            }
        }
    }
}

impl fmt::Display for DeltaSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeltaSourceKind::Analytic => write!(f, "analytic"),
            DeltaSourceKind::Lattice { steps: None } => write!(f, "lattice"),
            DeltaSourceKind::Lattice { steps: Some(n) } => write!(f, "lattice({})", n),
        }
    }
}

impl FromStr for DeltaSourceKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "analytic" | "bs" | "black-scholes" => Ok(DeltaSourceKind::Analytic),
            "lattice" | "crr" => Ok(DeltaSourceKind::Lattice { steps: None }),
            _ => Err(PricingError::invalid(
                "delta_source",
                format!("expected 'analytic' or 'lattice', got '{}'", s),
            )),
        }
    }
}
