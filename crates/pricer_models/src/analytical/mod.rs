//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for lognormal dynamics
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//!
//! ## Design Principles
//!
//! - **Intrinsic fallback**: T = 0 and σ = 0 return payoff and step-function delta
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy

pub mod black_scholes;
pub mod greeks;

// Re-export main types at module level
pub use black_scholes::{intrinsic_delta, price_black_scholes, BlackScholes};
pub use greeks::{Greek, Greeks};
