//! Delta-hedging simulation results.

use pricer_core::math::{mean, quantile_sorted, sample_std};
use pricer_core::types::PricingResult;

use super::config::HedgingConfig;

/// Summary statistics of the terminal hedging error distribution.
///
/// VaR figures are signed left-tail percentiles of `portfolio − payoff`:
/// a hedge that loses money has a negative VaR.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HedgingStatistics {
    /// Mean hedging error.
    pub mean: f64,
    /// Sample standard deviation (n − 1); 0 for a single path.
    pub std_dev: f64,
    /// 5th percentile of the errors.
    pub var_95: f64,
    /// 1st percentile of the errors.
    pub var_99: f64,
    /// Mean absolute error.
    pub mean_abs_error: f64,
    /// Mean absolute error over the premium; `None` if the premium is 0.
    pub error_to_premium: Option<f64>,
}

impl HedgingStatistics {
    /// Aggregates terminal errors against the option premium.
    ///
    /// Percentiles interpolate linearly between order statistics.
    ///
    /// # Errors
    /// `InvalidParameter` if `errors` is empty.
    ///
    /// # Examples
    /// ```rust
    /// use pricer_pricing::mc::HedgingStatistics;
    ///
    /// let errors: Vec<f64> = (0..=100).map(|i| i as f64 - 50.0).collect();
    /// let stats = HedgingStatistics::from_errors(&errors, 10.0).unwrap();
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.var_95, -45.0);
    /// assert_eq!(stats.var_99, -49.0);
    /// ```
    pub fn from_errors(errors: &[f64], premium: f64) -> PricingResult<Self> {
        let mut sorted = errors.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let var_95 = quantile_sorted(&sorted, 0.05)?;
        let var_99 = quantile_sorted(&sorted, 0.01)?;

        let abs: Vec<f64> = errors.iter().map(|e| e.abs()).collect();
        let mean_abs_error = mean(&abs);
        let error_to_premium = if premium != 0.0 {
            Some(mean_abs_error / premium)
        } else {
            None
        };

        Ok(Self {
            mean: mean(errors),
            std_dev: sample_std(errors),
            var_95,
            var_99,
            mean_abs_error,
            error_to_premium,
        })
    }
}

/// Full per-step record of one displayed path.
///
/// All three vectors have `n_steps + 1` entries on the native grid. The
/// delta entry is the share position held after any trade at that step.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HedgingTrajectory {
    /// Underlying price.
    pub spot: Vec<f64>,
    /// Replicating portfolio value, shares plus cash.
    pub portfolio: Vec<f64>,
    /// Shares held.
    pub delta: Vec<f64>,
}

/// Output of a delta-hedging simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HedgingResult {
    /// Configuration the run used.
    pub config: HedgingConfig,
    /// Premium V₀ received at t = 0.
    pub premium: f64,
    /// Terminal error `portfolio − payoff` per path, in path order.
    pub errors: Vec<f64>,
    /// Terminal payoff per path, in path order.
    pub payoffs: Vec<f64>,
    /// Trajectories of the first `n_display` paths.
    pub trajectories: Vec<HedgingTrajectory>,
    /// Aggregated error statistics.
    pub statistics: HedgingStatistics,
}

impl HedgingResult {
    /// Number of hedged paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.errors.len()
    }

    /// Terminal replicating portfolio value per path.
    pub fn terminal_portfolios(&self) -> Vec<f64> {
        self.errors
            .iter()
            .zip(&self.payoffs)
            .map(|(e, p)| e + p)
            .collect()
    }
}
