//! Cox-Ross-Rubinstein lattice parameters.
//!
//! For N steps over maturity T:
//!
//! ```text
//! Δt = T / N
//! u  = exp(σ√Δt)
//! d  = 1 / u
//! p  = (exp(rΔt) − d) / (u − d)
//! ```
//!
//! The lattice is arbitrage-free iff d < exp(rΔt) < u, equivalently 0 < p < 1.

use pricer_core::types::{MarketParams, PricingError, PricingResult};

/// Derived CRR factors for a given step count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CrrParams {
    steps: usize,
    dt: f64,
    up: f64,
    down: f64,
    growth: f64,
    prob: f64,
}

impl CrrParams {
    /// Derives the lattice factors.
    ///
    /// The factors are returned even when they admit arbitrage so the
    /// caller can inspect and report them; see [`check_no_arbitrage`](Self::check_no_arbitrage).
    ///
    /// # Errors
    /// `InvalidParameter` if `steps` is zero.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::{MarketParams, OptionType};
    /// use pricer_models::lattice::CrrParams;
    ///
    /// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    /// let crr = CrrParams::new(&params, 50).unwrap();
    /// assert!(crr.is_arbitrage_free());
    /// assert!((crr.up() * crr.down() - 1.0).abs() < 1e-15);
    /// ```
    pub fn new(params: &MarketParams, steps: usize) -> PricingResult<Self> {
        if steps < 1 {
            return Err(PricingError::invalid(
                "steps",
                format!("lattice needs at least 1 step, got {}", steps),
            ));
        }

        let dt = params.maturity() / steps as f64;
        let up = (params.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = (params.rate() * dt).exp();
        let prob = (growth - down) / (up - down);

        Ok(Self {
            steps,
            dt,
            up,
            down,
            growth,
            prob,
        })
    }

    /// Number of time steps N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time increment Δt = T / N.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Up factor u.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down factor d = 1/u.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// One-step risk-free growth e^{rΔt}.
    #[inline]
    pub fn growth(&self) -> f64 {
        self.growth
    }

    /// One-step discount e^{−rΔt}.
    #[inline]
    pub fn discount(&self) -> f64 {
        1.0 / self.growth
    }

    /// Risk-neutral up probability p.
    #[inline]
    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Reports whether d < e^{rΔt} < u holds.
    #[inline]
    pub fn is_arbitrage_free(&self) -> bool {
        self.down < self.growth && self.growth < self.up && self.prob > 0.0 && self.prob < 1.0
    }

    /// Fails with `ArbitrageViolation` when the factors admit arbitrage.
    pub fn check_no_arbitrage(&self) -> PricingResult<()> {
        if self.is_arbitrage_free() {
            Ok(())
        } else {
            Err(PricingError::ArbitrageViolation {
                down: self.down,
                growth: self.growth,
                up: self.up,
            })
        }
    }
}
