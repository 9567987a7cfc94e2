//! Convergence sweep configuration.

use pricer_core::types::{PricingError, PricingResult};

/// Default largest sweep length before the step grid is subsampled.
pub const DEFAULT_SUBSAMPLE_THRESHOLD: usize = 200;

/// Default smallest step count entering the order fit.
pub const DEFAULT_FIT_MIN_STEPS: usize = 10;

/// Controls the step grid and the order fit of a convergence sweep.
///
/// # Examples
///
/// ```rust
/// use pricer_risk::convergence::ConvergenceConfig;
///
/// let config = ConvergenceConfig::builder()
///     .subsample_threshold(100)
///     .fit_min_steps(20)
///     .build()
///     .unwrap();
///
/// // 1..=50 is swept in full, 1000 is strided
/// assert_eq!(config.step_grid(50).len(), 50);
/// assert_eq!(config.step_grid(1000), (10..=1000).step_by(10).collect::<Vec<_>>());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvergenceConfig {
    subsample_threshold: usize,
    stride: Option<usize>,
    fit_min_steps: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            subsample_threshold: DEFAULT_SUBSAMPLE_THRESHOLD,
            stride: None,
            fit_min_steps: DEFAULT_FIT_MIN_STEPS,
        }
    }
}

impl ConvergenceConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> ConvergenceConfigBuilder {
        ConvergenceConfigBuilder::default()
    }

    /// Largest `n_max` swept over every step count.
    #[inline]
    pub fn subsample_threshold(&self) -> usize {
        self.subsample_threshold
    }

    /// Explicit stride of a subsampled grid, if set.
    #[inline]
    pub fn stride(&self) -> Option<usize> {
        self.stride
    }

    /// Smallest step count entering the order fit.
    #[inline]
    pub fn fit_min_steps(&self) -> usize {
        self.fit_min_steps
    }

    /// Step counts of a sweep up to `n_max`, increasing.
    ///
    /// `1..=n_max` when `n_max` is within the threshold; otherwise multiples
    /// of the stride (default `ceil(n_max / threshold)`) with `n_max`
    /// appended when it is not itself a multiple.
    pub fn step_grid(&self, n_max: usize) -> Vec<usize> {
        if n_max <= self.subsample_threshold {
            return (1..=n_max).collect();
        }

        let stride = self
            .stride
            .unwrap_or_else(|| n_max.div_ceil(self.subsample_threshold));
        let mut grid: Vec<usize> = (stride..=n_max).step_by(stride).collect();
        if grid.last() != Some(&n_max) {
            grid.push(n_max);
        }
        grid
    }
}

/// Builder for [`ConvergenceConfig`].
#[derive(Clone, Debug, Default)]
pub struct ConvergenceConfigBuilder {
    subsample_threshold: Option<usize>,
    stride: Option<usize>,
    fit_min_steps: Option<usize>,
}

impl ConvergenceConfigBuilder {
    /// Sets the largest `n_max` swept over every step count.
    #[inline]
    pub fn subsample_threshold(mut self, threshold: usize) -> Self {
        self.subsample_threshold = Some(threshold);
        self
    }

    /// Sets an explicit stride for subsampled grids.
    #[inline]
    pub fn stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }

    /// Sets the smallest step count entering the order fit.
    #[inline]
    pub fn fit_min_steps(mut self, steps: usize) -> Self {
        self.fit_min_steps = Some(steps);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    /// `InvalidParameter` if the threshold or the stride is zero.
    pub fn build(self) -> PricingResult<ConvergenceConfig> {
        let subsample_threshold = self
            .subsample_threshold
            .unwrap_or(DEFAULT_SUBSAMPLE_THRESHOLD);
        if subsample_threshold == 0 {
            return Err(PricingError::invalid(
                "subsample_threshold",
                "must be at least 1",
            ));
        }
        if self.stride == Some(0) {
            return Err(PricingError::invalid("stride", "must be at least 1"));
        }

        Ok(ConvergenceConfig {
            subsample_threshold,
            stride: self.stride,
            fit_min_steps: self.fit_min_steps.unwrap_or(DEFAULT_FIT_MIN_STEPS),
        })
    }
}
