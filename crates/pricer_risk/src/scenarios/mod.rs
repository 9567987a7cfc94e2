//! Scenario analysis around the current market.
//!
//! This module provides:
//! - Preset spot/volatility stress tests re-priced with Black-Scholes
//! - Expiry payoff and P&L profile with break-even point
//! - Greeks over a (volatility × spot) grid
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Scenario Analysis               │
//! ├──────────────────────────────────────────────┤
//! │  StressScenario  - Crash .. Rally presets    │
//! │  PayoffProfile   - Payoff, P&L, break-even   │
//! │  GreeksGrid      - Greek over spot × vol     │
//! └──────────────────────────────────────────────┘
//! ```

mod grid;
mod profile;
mod stress;

pub use grid::{greeks_grid, GreeksGrid, DEFAULT_GRID_POINTS, MIN_GRID_VOL};
pub use profile::{payoff_profile, PayoffProfile, DEFAULT_PROFILE_POINTS};
pub use stress::{stress_test, ScenarioResult, StressScenario, MIN_STRESSED_VOL};

/// `n` evenly spaced points from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
