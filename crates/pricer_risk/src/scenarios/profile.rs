//! Payoff and P&L profile of a long option position at expiry.

use pricer_core::types::MarketParams;

use super::linspace;

/// Default number of spot points in a profile.
pub const DEFAULT_PROFILE_POINTS: usize = 100;

/// Expiry payoff and P&L of a long option bought for `premium`,
/// over terminal spots from 0.5·S₀ to 1.5·S₀.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PayoffProfile {
    /// Terminal spot grid.
    pub spots: Vec<f64>,
    /// Payoff at each terminal spot.
    pub payoff: Vec<f64>,
    /// Payoff minus premium.
    pub pnl: Vec<f64>,
    /// Premium paid.
    pub premium: f64,
    /// Terminal spot at which the P&L is zero: K + premium for a call,
    /// K − premium for a put.
    pub break_even: f64,
}

/// Builds the expiry profile on `n_points` evenly spaced terminal spots.
///
/// # Examples
/// ```rust
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_risk::scenarios::payoff_profile;
///
/// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let profile = payoff_profile(&params, 10.45, 101);
///
/// assert_eq!(profile.spots.len(), 101);
/// assert_eq!(profile.spots[0], 50.0);
/// assert!((profile.break_even - 110.45).abs() < 1e-12);
/// ```
pub fn payoff_profile(params: &MarketParams, premium: f64, n_points: usize) -> PayoffProfile {
    let spots = linspace(0.5 * params.spot(), 1.5 * params.spot(), n_points);
    let payoff: Vec<f64> = spots.iter().map(|s| params.payoff(*s)).collect();
    let pnl = payoff.iter().map(|p| p - premium).collect();

    let break_even = if params.option_type().is_call() {
        params.strike() + premium
    } else {
        params.strike() - premium
    };

    PayoffProfile {
        spots,
        payoff,
        pnl,
        premium,
        break_even,
    }
}
