//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Degenerate Inputs
//!
//! When T = 0 or σ = 0 the d-terms are undefined. Prices fall back to the
//! intrinsic payoff, Gamma/Vega/Theta/Rho to zero and Delta to the step
//! function of moneyness (1 or 0 for a call, −1 or 0 for a put).

use pricer_core::math::{norm_cdf, norm_pdf};
use pricer_core::types::{MarketParams, OptionType, PricingError, PricingResult};

use super::greeks::Greeks;

/// Black-Scholes model for European option pricing.
///
/// Holds the state of the underlying (spot, rate, volatility); contract
/// terms (strike, expiry, option type) are passed per call so one model can
/// be evaluated across strikes and remaining maturities.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call_price = bs.price(100.0, 1.0, OptionType::Call);
/// let put_price = bs.price(100.0, 1.0, OptionType::Put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `InvalidParameter` if spot <= 0
    /// - `InvalidParameter` if volatility < 0
    ///
    /// Zero volatility is accepted and handled by the degenerate fallback.
    pub fn new(spot: f64, rate: f64, volatility: f64) -> PricingResult<Self> {
        if spot.is_nan() || spot <= 0.0 {
            return Err(PricingError::invalid(
                "spot",
                format!("must be positive, got {}", spot),
            ));
        }
        if volatility.is_nan() || volatility < 0.0 {
            return Err(PricingError::invalid(
                "volatility",
                format!("must be non-negative, got {}", volatility),
            ));
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Builds the model from already-validated market parameters.
    #[inline]
    pub fn from_params(params: &MarketParams) -> Self {
        Self {
            spot: params.spot(),
            rate: params.rate(),
            volatility: params.volatility(),
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    #[inline]
    fn is_degenerate(&self, expiry: f64) -> bool {
        expiry <= 0.0 || self.volatility == 0.0
    }

    /// Computes d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T).
    ///
    /// Only meaningful for T > 0 and σ > 0.
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;
        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes d₂ = d₁ − σ√T.
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes the European option price.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionType;
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let price = bs.price(100.0, 1.0, OptionType::Call);
    /// assert!((price - 10.4506).abs() < 1e-3);
    /// ```
    pub fn price(&self, strike: f64, expiry: f64, option_type: OptionType) -> f64 {
        if self.is_degenerate(expiry) {
            return option_type.payoff(self.spot, strike);
        }

        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let discounted_strike = strike * (-self.rate * expiry).exp();

        match option_type {
            OptionType::Call => self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionType::Put => discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = N(d₁)
    /// - Put Delta = N(d₁) − 1
    pub fn delta(&self, strike: f64, expiry: f64, option_type: OptionType) -> f64 {
        if self.is_degenerate(expiry) {
            return intrinsic_delta(self.spot, strike, option_type);
        }

        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match option_type {
            OptionType::Call => n_d1,
            OptionType::Put => n_d1 - 1.0,
        }
    }

    /// Computes Gamma (∂²V/∂S²) = φ(d₁) / (S·σ·√T), identical for calls and puts.
    pub fn gamma(&self, strike: f64, expiry: f64) -> f64 {
        if self.is_degenerate(expiry) {
            return 0.0;
        }
        let d1 = self.d1(strike, expiry);
        norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ) = S·√T·φ(d₁), identical for calls and puts.
    pub fn vega(&self, strike: f64, expiry: f64) -> f64 {
        if self.is_degenerate(expiry) {
            return 0.0;
        }
        let d1 = self.d1(strike, expiry);
        self.spot * expiry.sqrt() * norm_pdf(d1)
    }

    /// Computes Theta (∂V/∂t) per year.
    ///
    /// - Call Theta = -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    /// - Put Theta = -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    pub fn theta(&self, strike: f64, expiry: f64, option_type: OptionType) -> f64 {
        if self.is_degenerate(expiry) {
            return 0.0;
        }

        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * sqrt_t;
        let discount = (-self.rate * expiry).exp();

        // Common term: -(S·σ·φ(d₁))/(2√T)
        let decay = -(self.spot * self.volatility * norm_pdf(d1)) / (2.0 * sqrt_t);

        match option_type {
            OptionType::Call => decay - self.rate * strike * discount * norm_cdf(d2),
            OptionType::Put => decay + self.rate * strike * discount * norm_cdf(-d2),
        }
    }

    /// Computes Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    pub fn rho(&self, strike: f64, expiry: f64, option_type: OptionType) -> f64 {
        if self.is_degenerate(expiry) {
            return 0.0;
        }

        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        match option_type {
            OptionType::Call => strike * expiry * discount * norm_cdf(d2),
            OptionType::Put => -strike * expiry * discount * norm_cdf(-d2),
        }
    }

    /// Computes all five Greeks in one pass over the d-terms.
    pub fn greeks(&self, strike: f64, expiry: f64, option_type: OptionType) -> Greeks {
        if self.is_degenerate(expiry) {
            return Greeks {
                delta: intrinsic_delta(self.spot, strike, option_type),
                ..Greeks::default()
            };
        }

        Greeks {
            delta: self.delta(strike, expiry, option_type),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            theta: self.theta(strike, expiry, option_type),
            rho: self.rho(strike, expiry, option_type),
        }
    }
}

/// Delta of the expiry payoff: a step function of moneyness.
#[inline]
pub fn intrinsic_delta(spot: f64, strike: f64, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call if spot > strike => 1.0,
        OptionType::Put if spot < strike => -1.0,
        _ => 0.0,
    }
}

/// Black-Scholes price and Greeks for the given market parameters.
///
/// Degenerate inputs (T = 0 or σ = 0) return the intrinsic payoff with zero
/// Greeks apart from the step-function Delta. Out-of-domain inputs are
/// already rejected by [`MarketParams::new`].
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_models::analytical::price_black_scholes;
///
/// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let (price, greeks) = price_black_scholes(&params).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
/// assert!((greeks.delta - 0.6368).abs() < 1e-3);
/// ```
pub fn price_black_scholes(params: &MarketParams) -> PricingResult<(f64, Greeks)> {
    let bs = BlackScholes::from_params(params);
    let strike = params.strike();
    let expiry = params.maturity();
    let option_type = params.option_type();

    Ok((
        bs.price(strike, expiry, option_type),
        bs.greeks(strike, expiry, option_type),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(spot: f64, strike: f64, expiry: f64, vol: f64, option_type: OptionType) -> MarketParams {
        MarketParams::new(spot, strike, expiry, 0.05, vol, option_type).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_rejects_bad_inputs() {
        assert!(BlackScholes::new(-100.0, 0.05, 0.2).is_err());
        assert!(BlackScholes::new(0.0, 0.05, 0.2).is_err());
        assert!(BlackScholes::new(100.0, 0.05, -0.2).is_err());
        assert!(BlackScholes::new(f64::NAN, 0.05, 0.2).is_err());
    }

    #[test]
    fn test_new_accepts_zero_vol_and_negative_rate() {
        assert!(BlackScholes::new(100.0, 0.05, 0.0).is_ok());
        assert!(BlackScholes::new(100.0, -0.02, 0.2).is_ok());
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_atm_zero_rate() {
        // ATM with r=0: d1 = σ√T / 2, d2 = -σ√T / 2
        let bs = BlackScholes::new(100.0, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.d1(100.0, 1.0), 0.1, epsilon = 1e-12);
        assert_relative_eq!(bs.d2(100.0, 1.0), -0.1, epsilon = 1e-12);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_reference_prices() {
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.price(100.0, 1.0, OptionType::Call), 10.450583572185565, epsilon = 1e-9);
        assert_relative_eq!(bs.price(100.0, 1.0, OptionType::Put), 5.573526022256971, epsilon = 1e-9);
    }

    #[test]
    fn test_put_call_parity_grid() {
        for spot in [60.0, 90.0, 100.0, 130.0] {
            for strike in [80.0, 100.0, 120.0] {
                for expiry in [0.1, 0.5, 1.0, 3.0] {
                    for rate in [-0.02, 0.0, 0.05] {
                        let bs = BlackScholes::new(spot, rate, 0.3).unwrap();
                        let call = bs.price(strike, expiry, OptionType::Call);
                        let put = bs.price(strike, expiry, OptionType::Put);
                        let forward = spot - strike * (-rate * expiry).exp();
                        assert_relative_eq!(call - put, forward, epsilon = 1e-10);
                    }
                }
            }
        }
    }

    // ==========================================================
    // Degenerate Tests
    // ==========================================================

    #[test]
    fn test_zero_expiry_returns_intrinsic() {
        let (price, greeks) = price_black_scholes(&params(110.0, 100.0, 0.0, 0.2, OptionType::Call)).unwrap();
        assert_eq!(price, 10.0);
        assert_eq!(greeks.delta, 1.0);
        assert_eq!(greeks.gamma, 0.0);
        assert_eq!(greeks.vega, 0.0);
        assert_eq!(greeks.theta, 0.0);
        assert_eq!(greeks.rho, 0.0);

        let (price, greeks) = price_black_scholes(&params(110.0, 100.0, 0.0, 0.2, OptionType::Put)).unwrap();
        assert_eq!(price, 0.0);
        assert_eq!(greeks.delta, 0.0);

        let (price, greeks) = price_black_scholes(&params(90.0, 100.0, 0.0, 0.2, OptionType::Put)).unwrap();
        assert_eq!(price, 10.0);
        assert_eq!(greeks.delta, -1.0);
    }

    #[test]
    fn test_zero_vol_returns_intrinsic() {
        let (price, greeks) = price_black_scholes(&params(100.0, 100.0, 1.0, 0.0, OptionType::Call)).unwrap();
        assert_eq!(price, 0.0);
        assert_eq!(greeks.delta, 0.0);
        assert!(price.is_finite() && greeks.gamma == 0.0);
    }

    // ==========================================================
    // Greeks Tests
    // ==========================================================

    #[test]
    fn test_reference_greeks_atm_call() {
        let (_, g) = price_black_scholes(&params(100.0, 100.0, 1.0, 0.2, OptionType::Call)).unwrap();
        assert_relative_eq!(g.delta, 0.6368306511756191, epsilon = 1e-9);
        assert_relative_eq!(g.gamma, 0.018762017345846895, epsilon = 1e-9);
        assert_relative_eq!(g.vega, 37.52403469169379, epsilon = 1e-8);
        assert_relative_eq!(g.theta, -6.414027546438197, epsilon = 1e-8);
        assert_relative_eq!(g.rho, 53.232481545376345, epsilon = 1e-8);
    }

    #[test]
    fn test_put_theta_differs_from_call_by_rate_term() {
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        let theta_call = bs.theta(100.0, 1.0, OptionType::Call);
        let theta_put = bs.theta(100.0, 1.0, OptionType::Put);
        // Θ_call − Θ_put = −r·K·e^(-rT)
        assert_relative_eq!(theta_call - theta_put, -0.05 * 100.0 * (-0.05_f64).exp(), epsilon = 1e-10);
        assert!(theta_put < 0.0);
        assert!(theta_put > theta_call);
    }

    #[test]
    fn test_delta_call_put_relationship() {
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        for strike in [80.0, 100.0, 120.0] {
            let call_delta = bs.delta(strike, 1.0, OptionType::Call);
            let put_delta = bs.delta(strike, 1.0, OptionType::Put);
            assert_relative_eq!(put_delta, call_delta - 1.0, epsilon = 1e-12);
            assert!((0.0..=1.0).contains(&call_delta));
        }
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let h = 1e-4;
        let strike = 105.0;
        let up = BlackScholes::new(100.0 + h, 0.05, 0.25).unwrap();
        let down = BlackScholes::new(100.0 - h, 0.05, 0.25).unwrap();
        let mid = BlackScholes::new(100.0, 0.05, 0.25).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let fd = (up.price(strike, 0.75, option_type) - down.price(strike, 0.75, option_type)) / (2.0 * h);
            assert_relative_eq!(mid.delta(strike, 0.75, option_type), fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_theta_matches_finite_difference_in_maturity() {
        // Θ = −∂V/∂T
        let h = 1e-5;
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let fd = -(bs.price(95.0, 1.0 + h, option_type) - bs.price(95.0, 1.0 - h, option_type)) / (2.0 * h);
            assert_relative_eq!(bs.theta(95.0, 1.0, option_type), fd, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_greeks_bundle_matches_individual_methods() {
        let bs = BlackScholes::new(95.0, 0.03, 0.35).unwrap();
        let g = bs.greeks(100.0, 0.5, OptionType::Put);
        assert_eq!(g.delta, bs.delta(100.0, 0.5, OptionType::Put));
        assert_eq!(g.gamma, bs.gamma(100.0, 0.5));
        assert_eq!(g.vega, bs.vega(100.0, 0.5));
        assert_eq!(g.theta, bs.theta(100.0, 0.5, OptionType::Put));
        assert_eq!(g.rho, bs.rho(100.0, 0.5, OptionType::Put));
    }
}
