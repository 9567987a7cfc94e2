//! # Pricer Risk (L4: Application)
//!
//! Model diagnostics and scenario analysis built on the pricing layers.
//!
//! This crate provides:
//! - CRR-to-Black-Scholes convergence sweeps with empirical order fits
//! - Preset spot/volatility stress tests
//! - Expiry payoff and P&L profiles
//! - Greeks grids over spot and volatility
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  convergence/ - CRR error vs N, order   │
//! │  scenarios/   - stress, profile, grid   │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Black-Scholes and CRR lattice          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Performance
//!
//! Convergence sweeps and Greeks grids are evaluated in parallel with
//! Rayon and collected in input order.
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{MarketParams, OptionType};
//! use pricer_risk::convergence::analyze_convergence;
//! use pricer_risk::scenarios::stress_test;
//!
//! let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//!
//! let series = analyze_convergence(&params, 100).unwrap();
//! let row = series.at(100).unwrap();
//! assert!(row.price_error < 0.05);
//!
//! let stressed = stress_test(&params).unwrap();
//! assert_eq!(stressed.len(), 5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod convergence;
pub mod scenarios;
