//! Preset spot/volatility stress scenarios.

use std::fmt;

use pricer_core::types::{MarketParams, PricingResult};
use pricer_models::analytical::price_black_scholes;

/// Floor applied to stressed volatilities.
pub const MIN_STRESSED_VOL: f64 = 0.05;

/// Preset market moves, from a crash to a rally.
///
/// Falling markets come with rising volatility and vice versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StressScenario {
    /// Spot −20%, volatility +50%
    Crash,
    /// Spot −10%, volatility +25%
    Bear,
    /// Unchanged market
    Base,
    /// Spot +10%, volatility −10%
    Bull,
    /// Spot +20%, volatility −20%
    Rally,
}

impl StressScenario {
    /// All presets from crash to rally.
    pub const ALL: [StressScenario; 5] = [
        StressScenario::Crash,
        StressScenario::Bear,
        StressScenario::Base,
        StressScenario::Bull,
        StressScenario::Rally,
    ];

    /// Relative spot change.
    pub fn spot_change(&self) -> f64 {
        match self {
            Self::Crash => -0.20,
            Self::Bear => -0.10,
            Self::Base => 0.0,
            Self::Bull => 0.10,
            Self::Rally => 0.20,
        }
    }

    /// Relative volatility change.
    pub fn vol_change(&self) -> f64 {
        match self {
            Self::Crash => 0.50,
            Self::Bear => 0.25,
            Self::Base => 0.0,
            Self::Bull => -0.10,
            Self::Rally => -0.20,
        }
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Crash => "Crash -20%",
            Self::Bear => "Bear -10%",
            Self::Base => "Base Case",
            Self::Bull => "Bull +10%",
            Self::Rally => "Rally +20%",
        }
    }

    /// Shifted market parameters.
    ///
    /// The stressed volatility is floored at [`MIN_STRESSED_VOL`]; the base
    /// case returns `params` unchanged.
    pub fn apply(&self, params: &MarketParams) -> PricingResult<MarketParams> {
        if *self == Self::Base {
            return Ok(*params);
        }
        let spot = params.spot() * (1.0 + self.spot_change());
        let vol = (params.volatility() * (1.0 + self.vol_change())).max(MIN_STRESSED_VOL);
        params.with_spot(spot)?.with_volatility(vol)
    }
}

impl fmt::Display for StressScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Black-Scholes re-valuation under one stress scenario.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioResult {
    /// Applied scenario.
    pub scenario: StressScenario,
    /// Stressed spot.
    pub spot: f64,
    /// Stressed volatility.
    pub volatility: f64,
    /// Option value under the scenario.
    pub price: f64,
    /// Value change against the base case.
    pub pnl: f64,
    /// P&L in percent of the base value; `None` if the base value is 0.
    pub pnl_pct: Option<f64>,
}

/// Re-prices the option under every [`StressScenario`] preset.
///
/// # Examples
/// ```rust
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_risk::scenarios::{stress_test, StressScenario};
///
/// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let results = stress_test(&params).unwrap();
///
/// assert_eq!(results.len(), 5);
/// assert_eq!(results[2].scenario, StressScenario::Base);
/// assert_eq!(results[2].pnl, 0.0);
/// assert!(results[0].pnl < 0.0 && results[4].pnl > 0.0);
/// ```
pub fn stress_test(params: &MarketParams) -> PricingResult<Vec<ScenarioResult>> {
    let (base_price, _) = price_black_scholes(params)?;

    StressScenario::ALL
        .iter()
        .map(|scenario| {
            let stressed = scenario.apply(params)?;
            let (price, _) = price_black_scholes(&stressed)?;
            let pnl = price - base_price;
            Ok(ScenarioResult {
                scenario: *scenario,
                spot: stressed.spot(),
                volatility: stressed.volatility(),
                price,
                pnl,
                pnl_pct: (base_price > 0.0).then(|| 100.0 * pnl / base_price),
            })
        })
        .collect()
}
