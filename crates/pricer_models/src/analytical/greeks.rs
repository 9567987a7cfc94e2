//! Greeks bundle produced by the analytic pricer.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Selector for a single sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Greek {
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// ∂V/∂t
    Theta,
    /// ∂V/∂r
    Rho,
}

impl Greek {
    /// All five first- and second-order Greeks in display order.
    pub const ALL: [Greek; 5] = [
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
    ];
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
        };
        f.write_str(name)
    }
}

impl FromStr for Greek {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delta" => Ok(Greek::Delta),
            "gamma" => Ok(Greek::Gamma),
            "vega" => Ok(Greek::Vega),
            "theta" => Ok(Greek::Theta),
            "rho" => Ok(Greek::Rho),
            _ => Err(PricingError::invalid(
                "greek",
                format!("unknown greek '{}'", s),
            )),
        }
    }
}

/// Delta, Gamma, Vega, Theta and Rho of one option under one model.
///
/// Values are raw partial derivatives: vega per unit of volatility, theta
/// per year, rho per unit of rate. The `*_per_*` accessors give the
/// conventional quoting units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t (per year, usually negative)
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Returns the requested sensitivity.
    #[inline]
    pub fn get(&self, greek: Greek) -> f64 {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
        }
    }

    /// Vega per one volatility point (1%).
    #[inline]
    pub fn vega_per_point(&self) -> f64 {
        self.vega / 100.0
    }

    /// Theta per calendar day.
    #[inline]
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }

    /// Rho per one rate point (1%).
    #[inline]
    pub fn rho_per_point(&self) -> f64 {
        self.rho / 100.0
    }
}
