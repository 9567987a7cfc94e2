//! Market parameters for a single European option.
//!
//! [`MarketParams`] is the one immutable input shared by every pricer,
//! lattice and simulator in the workspace. It is validated once at
//! construction and copied freely afterwards.

use std::fmt;
use std::str::FromStr;

use super::error::{PricingError, PricingResult};

/// Option payoff direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike.
    #[default]
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Terminal payoff `max(S − K, 0)` or `max(K − S, 0)`.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(PricingError::invalid(
                "option_type",
                format!("expected 'call' or 'put', got '{}'", s),
            )),
        }
    }
}

/// Market parameters of a European option.
///
/// Holds spot S₀, strike K, maturity T (years), risk-free rate r and
/// volatility σ (both annualised) together with the option type.
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketParams, OptionType};
///
/// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// assert_eq!(params.spot(), 100.0);
/// assert!(!params.is_degenerate());
///
/// assert!(MarketParams::new(-1.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketParams {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
}

impl MarketParams {
    /// Creates validated market parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` when spot ≤ 0, strike ≤ 0,
    /// maturity < 0, volatility < 0, or any input is not finite.
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        require_finite("spot", spot)?;
        require_finite("strike", strike)?;
        require_finite("maturity", maturity)?;
        require_finite("rate", rate)?;
        require_finite("volatility", volatility)?;

        if spot <= 0.0 {
            return Err(PricingError::invalid(
                "spot",
                format!("must be positive, got {}", spot),
            ));
        }
        if strike <= 0.0 {
            return Err(PricingError::invalid(
                "strike",
                format!("must be positive, got {}", strike),
            ));
        }
        if maturity < 0.0 {
            return Err(PricingError::invalid(
                "maturity",
                format!("must be non-negative, got {}", maturity),
            ));
        }
        if volatility < 0.0 {
            return Err(PricingError::invalid(
                "volatility",
                format!("must be non-negative, got {}", volatility),
            ));
        }

        Ok(Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            option_type,
        })
    }

    /// Spot price S₀.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity T in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// `true` when T = 0 or σ = 0, where closed-form fallbacks apply.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.maturity == 0.0 || self.volatility == 0.0
    }

    /// Intrinsic value at the current spot.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        self.option_type.payoff(self.spot, self.strike)
    }

    /// Terminal payoff for a given underlying price.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.payoff(spot, self.strike)
    }

    /// Discount factor e^{−rT}.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Copy with a different spot.
    pub fn with_spot(&self, spot: f64) -> PricingResult<Self> {
        Self::new(
            spot,
            self.strike,
            self.maturity,
            self.rate,
            self.volatility,
            self.option_type,
        )
    }

    /// Copy with a different time to maturity.
    pub fn with_maturity(&self, maturity: f64) -> PricingResult<Self> {
        Self::new(
            self.spot,
            self.strike,
            maturity,
            self.rate,
            self.volatility,
            self.option_type,
        )
    }

    /// Copy with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> PricingResult<Self> {
        Self::new(
            self.spot,
            self.strike,
            self.maturity,
            self.rate,
            volatility,
            self.option_type,
        )
    }

    /// Copy with the opposite option type.
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }
}

fn require_finite(name: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}
