//! Convergence of the CRR lattice to Black-Scholes.
//!
//! Sweeps the lattice over increasing step counts N, measures the absolute
//! price and delta errors against the closed form, and fits the empirical
//! order α of `error ≈ C·N^α` by least squares in log-log space. For the
//! CRR lattice α is close to −1.
//!
//! ## Architecture
//!
//! ```text
//! analyze_convergence
//! ├── ConvergenceConfig::step_grid()  (full or strided N grid)
//! ├── price_crr() × grid              (rayon, collected in N order)
//! └── log_log_slope()                 (price and delta orders)
//! ```

mod config;

pub use config::{
    ConvergenceConfig, ConvergenceConfigBuilder, DEFAULT_FIT_MIN_STEPS,
    DEFAULT_SUBSAMPLE_THRESHOLD,
};

use pricer_core::math::log_log_slope;
use pricer_core::types::{MarketParams, PricingError, PricingResult};
use pricer_models::analytical::price_black_scholes;
use pricer_models::lattice::{price_crr, CrrParams};
use rayon::prelude::*;
use tracing::{debug, info};

/// One lattice size of a convergence sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvergenceRow {
    /// Lattice steps N.
    pub steps: usize,
    /// CRR price.
    pub price: f64,
    /// CRR root delta.
    pub delta: f64,
    /// |CRR price − BS price|.
    pub price_error: f64,
    /// |CRR delta − BS delta|.
    pub delta_error: f64,
    /// N × price error; bounded for a first-order scheme.
    pub scaled_price_error: f64,
}

/// Result of a convergence sweep, ordered by increasing N.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvergenceSeries {
    /// Black-Scholes reference price.
    pub bs_price: f64,
    /// Black-Scholes reference delta.
    pub bs_delta: f64,
    /// Rows in increasing N.
    pub rows: Vec<ConvergenceRow>,
    /// Fitted order of the price error; `None` with fewer than two usable rows.
    pub price_order: Option<f64>,
    /// Fitted order of the delta error; `None` with fewer than two usable rows.
    pub delta_order: Option<f64>,
}

impl ConvergenceSeries {
    /// Row for exactly `steps` lattice steps, if it was swept.
    pub fn at(&self, steps: usize) -> Option<&ConvergenceRow> {
        self.rows
            .binary_search_by_key(&steps, |row| row.steps)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Rows for the requested step counts that were swept, in request order.
    ///
    /// Step counts missing from a subsampled grid are skipped.
    pub fn observed_table(&self, steps: &[usize]) -> Vec<ConvergenceRow> {
        steps.iter().filter_map(|n| self.at(*n).copied()).collect()
    }

    /// Largest swept step count.
    pub fn max_steps(&self) -> Option<usize> {
        self.rows.last().map(|row| row.steps)
    }
}

/// Sweeps N = 1..=`n_max` with the default [`ConvergenceConfig`].
///
/// # Errors
/// - `InvalidParameter` if `n_max` is zero
/// - `ArbitrageViolation` if no N up to `n_max` yields an arbitrage-free lattice
///
/// # Examples
/// ```rust
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_risk::convergence::analyze_convergence;
///
/// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let series = analyze_convergence(&params, 200).unwrap();
///
/// assert_eq!(series.rows.len(), 200);
/// let order = series.price_order.unwrap();
/// assert!((order + 1.0).abs() < 0.1);
/// ```
pub fn analyze_convergence(params: &MarketParams, n_max: usize) -> PricingResult<ConvergenceSeries> {
    analyze_convergence_with_config(params, n_max, &ConvergenceConfig::default())
}

/// Sweeps the lattice over the grid of `config` up to `n_max`.
///
/// Step counts whose lattice admits arbitrage (small N when r is large
/// relative to σ) are left out of the sweep.
pub fn analyze_convergence_with_config(
    params: &MarketParams,
    n_max: usize,
    config: &ConvergenceConfig,
) -> PricingResult<ConvergenceSeries> {
    if n_max == 0 {
        return Err(PricingError::invalid("n_max", "must be at least 1, got 0"));
    }

    let (bs_price, bs_greeks) = price_black_scholes(params)?;
    let bs_delta = bs_greeks.delta;

    let grid = config.step_grid(n_max);
    let grid_len = grid.len();
    let grid: Vec<usize> = if params.is_degenerate() {
        grid
    } else {
        let mut usable = Vec::with_capacity(grid_len);
        for n in grid {
            if CrrParams::new(params, n)?.is_arbitrage_free() {
                usable.push(n);
            }
        }
        usable
    };

    if grid.is_empty() {
        // Report the factors of the finest lattice
        CrrParams::new(params, n_max)?.check_no_arbitrage()?;
    }
    if grid.len() < grid_len {
        debug!(
            skipped = grid_len - grid.len(),
            "lattice sizes with arbitrage left out of the sweep"
        );
    }

    let rows: Vec<ConvergenceRow> = grid
        .par_iter()
        .map(|&n| {
            let crr = price_crr(params, n, false)?;
            let price_error = (crr.price - bs_price).abs();
            Ok(ConvergenceRow {
                steps: n,
                price: crr.price,
                delta: crr.delta,
                price_error,
                delta_error: (crr.delta - bs_delta).abs(),
                scaled_price_error: price_error * n as f64,
            })
        })
        .collect::<PricingResult<_>>()?;

    let fitted: Vec<&ConvergenceRow> = rows
        .iter()
        .filter(|row| row.steps >= config.fit_min_steps())
        .collect();
    let ns: Vec<f64> = fitted.iter().map(|row| row.steps as f64).collect();
    let price_errors: Vec<f64> = fitted.iter().map(|row| row.price_error).collect();
    let delta_errors: Vec<f64> = fitted.iter().map(|row| row.delta_error).collect();

    let price_order = log_log_slope(&ns, &price_errors);
    let delta_order = log_log_slope(&ns, &delta_errors);

    info!(
        n_max,
        rows = rows.len(),
        ?price_order,
        ?delta_order,
        "convergence sweep complete"
    );

    Ok(ConvergenceSeries {
        bs_price,
        bs_delta,
        rows,
        price_order,
        delta_order,
    })
}
