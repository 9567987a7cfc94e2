//! Risk-neutral GBM path generation.
//!
//! Uses the exact log-space step
//!
//! ```text
//! S(t+Δt) = S(t) × exp((r − σ²/2)Δt + σ√Δt × Z)
//! ```
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `paths[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.

use pricer_core::types::{MarketParams, PricingError, PricingResult};
use tracing::debug;

use crate::rng::PricerRng;

/// Immutable set of simulated spot trajectories.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_pricing::mc::simulate_paths;
///
/// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let paths = simulate_paths(&params, 252, 1_000, 42).unwrap();
///
/// assert_eq!(paths.n_paths(), 1_000);
/// assert_eq!(paths.path(0).len(), 253);
/// assert_eq!(paths.path(0)[0], 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathSet {
    n_paths: usize,
    n_steps: usize,
    dt: f64,
    data: Vec<f64>,
}

impl PathSet {
    /// Number of trajectories.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per trajectory.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Time increment Δt = T / n_steps.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Trajectory `idx`, `n_steps + 1` prices starting at S₀.
    ///
    /// # Panics
    /// Panics if `idx >= n_paths`.
    #[inline]
    pub fn path(&self, idx: usize) -> &[f64] {
        let stride = self.n_steps + 1;
        &self.data[idx * stride..(idx + 1) * stride]
    }

    /// Iterates over trajectories in path order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.n_steps + 1)
    }

    /// Terminal price of every trajectory.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.iter().map(|p| p[self.n_steps]).collect()
    }

    /// Time of each grid point, `0, Δt, …, T`.
    pub fn time_grid(&self) -> Vec<f64> {
        (0..=self.n_steps).map(|i| i as f64 * self.dt).collect()
    }

    /// Flat row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Simulates `n_paths` risk-neutral GBM trajectories of `n_steps` steps.
///
/// Normals are drawn from a single [`PricerRng`] seeded with `seed`,
/// path-major and step-minor, so the same inputs always give the same paths.
///
/// # Errors
/// `InvalidParameter` if `n_steps` or `n_paths` is zero.
pub fn simulate_paths(
    params: &MarketParams,
    n_steps: usize,
    n_paths: usize,
    seed: u64,
) -> PricingResult<PathSet> {
    if n_steps == 0 {
        return Err(PricingError::invalid("n_steps", "must be at least 1, got 0"));
    }
    if n_paths == 0 {
        return Err(PricingError::invalid("n_paths", "must be at least 1, got 0"));
    }

    let dt = params.maturity() / n_steps as f64;
    let sigma = params.volatility();

    // Precompute drift and volatility terms
    let drift_dt = (params.rate() - 0.5 * sigma * sigma) * dt;
    let vol_sqrt_dt = sigma * dt.sqrt();

    let stride = n_steps + 1;
    let mut data = vec![0.0; n_paths * stride];
    let mut rng = PricerRng::from_seed(seed);
    debug!(n_paths, n_steps, seed = rng.seed(), dt, "simulating GBM paths");
    let mut normals = vec![0.0; n_steps];

    for path in data.chunks_exact_mut(stride) {
        rng.fill_normal(&mut normals);
        path[0] = params.spot();
        for (step, z) in normals.iter().enumerate() {
            path[step + 1] = path[step] * (drift_dt + vol_sqrt_dt * z).exp();
        }
    }

    Ok(PathSet {
        n_paths,
        n_steps,
        dt,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionType;

    fn params(vol: f64) -> MarketParams {
        MarketParams::new(100.0, 100.0, 1.0, 0.05, vol, OptionType::Call).unwrap()
    }

    // ========================================
    // Shape Tests
    // ========================================

    #[test]
    fn test_shape_and_initial_spot() {
        let paths = simulate_paths(&params(0.2), 10, 7, 1).unwrap();
        assert_eq!(paths.n_paths(), 7);
        assert_eq!(paths.n_steps(), 10);
        assert_eq!(paths.as_slice().len(), 7 * 11);
        assert_eq!(paths.iter().len(), 7);
        for p in paths.iter() {
            assert_eq!(p.len(), 11);
            assert_eq!(p[0], 100.0);
            assert!(p.iter().all(|s| *s > 0.0));
        }
        assert_relative_eq!(paths.dt(), 0.1, epsilon = 1e-15);
        assert_relative_eq!(paths.time_grid()[10], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_zero_counts() {
        assert!(simulate_paths(&params(0.2), 0, 10, 1)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(simulate_paths(&params(0.2), 10, 0, 1)
            .unwrap_err()
            .is_invalid_parameter());
    }

    // ========================================
    // Determinism Tests
    // ========================================

    #[test]
    fn test_same_seed_identical_paths() {
        let a = simulate_paths(&params(0.3), 50, 20, 42).unwrap();
        let b = simulate_paths(&params(0.3), 50, 20, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_paths() {
        let a = simulate_paths(&params(0.3), 50, 20, 42).unwrap();
        let b = simulate_paths(&params(0.3), 50, 20, 43).unwrap();
        assert_ne!(a.terminal_prices(), b.terminal_prices());
    }

    #[test]
    fn test_paths_are_prefix_stable_in_path_count() {
        // Path-major draws: adding paths leaves earlier paths untouched
        let small = simulate_paths(&params(0.2), 30, 5, 9).unwrap();
        let large = simulate_paths(&params(0.2), 30, 50, 9).unwrap();
        for i in 0..5 {
            assert_eq!(small.path(i), large.path(i));
        }
    }

    // ========================================
    // Distribution Tests
    // ========================================

    #[test]
    fn test_zero_vol_grows_at_risk_free_rate() {
        let paths = simulate_paths(&params(0.0), 4, 3, 5).unwrap();
        for p in paths.iter() {
            for (i, s) in p.iter().enumerate() {
                assert_relative_eq!(*s, 100.0 * (0.05 * 0.25 * i as f64).exp(), epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_discounted_terminal_mean_is_spot() {
        let paths = simulate_paths(&params(0.2), 1, 40_000, 2024).unwrap();
        let terminal = paths.terminal_prices();
        let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
        // Standard error ≈ 21 / 200 ≈ 0.1
        assert!((mean * (-0.05f64).exp() - 100.0).abs() < 0.5, "mean = {}", mean);
    }
}
