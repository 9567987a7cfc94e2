//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing, lattice and simulation operations
//! - `PricingResult<T>`: Convenience alias used across the pricer crates
//!
//! Degenerate market regimes (zero maturity, zero volatility) are not errors:
//! every pricer has a closed-form fallback for them.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidParameter`: Malformed or out-of-domain input (negative prices or
///   volatility, non-positive step/path counts, rebalancing finer than the path grid)
/// - `ArbitrageViolation`: CRR factors violate `d < e^{rΔt} < u`
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid("spot", "must be positive, got -1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'spot': must be positive, got -1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Invalid input parameter.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Description of the constraint that was violated
        reason: String,
    },

    /// CRR lattice factors admit an arbitrage.
    #[error("Arbitrage violation: require d < e^(r·dt) < u, got d = {down}, e^(r·dt) = {growth}, u = {up}")]
    ArbitrageViolation {
        /// Down factor d
        down: f64,
        /// One-step risk-free growth factor e^{rΔt}
        growth: f64,
        /// Up factor u
        up: f64,
    },
}

impl PricingError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for `InvalidParameter`.
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns `true` for `ArbitrageViolation`.
    #[inline]
    pub fn is_arbitrage_violation(&self) -> bool {
        matches!(self, Self::ArbitrageViolation { .. })
    }
}

/// Result alias for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PricingError::invalid("n_paths", "must be at least 1, got 0");
        assert_eq!(
            format!("{}", err),
            "Invalid parameter 'n_paths': must be at least 1, got 0"
        );
        assert!(err.is_invalid_parameter());
        assert!(!err.is_arbitrage_violation());
    }

    #[test]
    fn test_arbitrage_violation_display() {
        let err = PricingError::ArbitrageViolation {
            down: 0.9,
            growth: 1.2,
            up: 1.1,
        };
        let msg = format!("{}", err);
        assert!(msg.starts_with("Arbitrage violation"));
        assert!(msg.contains("u = 1.1"));
        assert!(err.is_arbitrage_violation());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::invalid("strike", "must be positive");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = PricingError::invalid("volatility", "must be non-negative");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
