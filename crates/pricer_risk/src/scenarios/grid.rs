//! Black-Scholes Greeks over a (volatility × spot) grid.

use pricer_core::types::{MarketParams, PricingError, PricingResult};
use pricer_models::analytical::{BlackScholes, Greek};
use rayon::prelude::*;

use super::linspace;

/// Default grid resolution along each axis.
pub const DEFAULT_GRID_POINTS: usize = 30;

/// Lowest volatility on the grid's vol axis.
pub const MIN_GRID_VOL: f64 = 0.05;

/// One Greek evaluated on a grid of spots (0.7·S₀ to 1.3·S₀) and
/// volatilities (`max(0.05, 0.3σ)` to 2σ).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GreeksGrid {
    /// Evaluated sensitivity.
    pub greek: Greek,
    /// Spot axis.
    pub spots: Vec<f64>,
    /// Volatility axis.
    pub vols: Vec<f64>,
    /// `values[i][j]` at `vols[i]`, `spots[j]`, raw (per unit) scale.
    pub values: Vec<Vec<f64>>,
}

impl GreeksGrid {
    /// Value at vol index `i` and spot index `j`.
    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Evaluates `greek` on an `n_vol × n_spot` grid around the current market.
///
/// # Errors
/// `InvalidParameter` if either resolution is zero.
pub fn greeks_grid(
    params: &MarketParams,
    greek: Greek,
    n_spot: usize,
    n_vol: usize,
) -> PricingResult<GreeksGrid> {
    if n_spot == 0 {
        return Err(PricingError::invalid("n_spot", "must be at least 1, got 0"));
    }
    if n_vol == 0 {
        return Err(PricingError::invalid("n_vol", "must be at least 1, got 0"));
    }

    let sigma = params.volatility();
    let vol_lo = (0.3 * sigma).max(MIN_GRID_VOL);
    let vol_hi = (2.0 * sigma).max(vol_lo);

    let spots = linspace(0.7 * params.spot(), 1.3 * params.spot(), n_spot);
    let vols = linspace(vol_lo, vol_hi, n_vol);

    let values = vols
        .par_iter()
        .map(|&vol| {
            spots
                .iter()
                .map(|&spot| {
                    let bs = BlackScholes::new(spot, params.rate(), vol)?;
                    Ok(bs
                        .greeks(params.strike(), params.maturity(), params.option_type())
                        .get(greek))
                })
                .collect::<PricingResult<Vec<f64>>>()
        })
        .collect::<PricingResult<Vec<Vec<f64>>>>()?;

    Ok(GreeksGrid {
        greek,
        spots,
        vols,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionType;
    use pricer_models::analytical::price_black_scholes;

    fn atm() -> MarketParams {
        MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    #[test]
    fn test_axes() {
        let grid = greeks_grid(&atm(), Greek::Gamma, 30, 30).unwrap();
        assert_eq!(grid.spots.len(), 30);
        assert_eq!(grid.vols.len(), 30);
        assert_eq!(grid.values.len(), 30);
        assert!(grid.values.iter().all(|row| row.len() == 30));
        assert_relative_eq!(grid.spots[0], 70.0, epsilon = 1e-12);
        assert_relative_eq!(grid.spots[29], 130.0, epsilon = 1e-12);
        assert_relative_eq!(grid.vols[0], 0.06, epsilon = 1e-12);
        assert_relative_eq!(grid.vols[29], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_values_match_pricer() {
        // Odd resolution puts the current market at the centre of the grid
        let params = atm();
        let grid = greeks_grid(&params, Greek::Delta, 3, 1).unwrap();
        let expected = BlackScholes::new(100.0, 0.05, grid.vols[0])
            .unwrap()
            .delta(100.0, 1.0, OptionType::Call);
        assert_relative_eq!(grid.value(0, 1), expected, epsilon = 1e-14);

        let grid = greeks_grid(&params, Greek::Vega, 5, 5).unwrap();
        let shifted = params.with_spot(grid.spots[4]).unwrap().with_volatility(grid.vols[2]).unwrap();
        let (_, greeks) = price_black_scholes(&shifted).unwrap();
        assert_relative_eq!(grid.value(2, 4), greeks.vega, epsilon = 1e-12);
    }

    #[test]
    fn test_delta_increases_with_spot() {
        let grid = greeks_grid(&atm(), Greek::Delta, 20, 4).unwrap();
        for row in &grid.values {
            assert!(row.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_low_vol_floor() {
        let params = atm().with_volatility(0.1).unwrap();
        let grid = greeks_grid(&params, Greek::Theta, 2, 2).unwrap();
        assert_eq!(grid.vols[0], MIN_GRID_VOL);
        assert_relative_eq!(grid.vols[1], 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        assert!(greeks_grid(&atm(), Greek::Rho, 0, 5).is_err());
        assert!(greeks_grid(&atm(), Greek::Rho, 5, 0).is_err());
    }
}
