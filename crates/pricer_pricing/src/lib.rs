//! # Pricer Pricing (Layer 3: Simulation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing runs the Monte Carlo side of the workspace:
//! - Seeded random number generation ([`rng::PricerRng`])
//! - Risk-neutral GBM path simulation ([`mc::simulate_paths`])
//! - Discretely rebalanced delta hedging with analytic or lattice deltas
//!   ([`mc::simulate_hedging`])
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `MarketParams`, `PricingError`, statistics
//! - Layer 2 (pricer_models): Black-Scholes and CRR deltas
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{MarketParams, OptionType};
//! use pricer_pricing::mc::{simulate_hedging, DeltaSourceKind};
//!
//! let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let result = simulate_hedging(&params, 52, 1_000, 1, DeltaSourceKind::Analytic, 42).unwrap();
//!
//! println!("premium = {:.4}", result.premium);
//! println!("VaR 95% = {:.4}", result.statistics.var_95);
//! ```
//!
//! ## Parallelisation
//!
//! Paths are hedged with rayon and collected in path order. Random numbers
//! are drawn before the parallel section, so results do not depend on the
//! size of the thread pool.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

pub use mc::{simulate_hedging, simulate_paths, DeltaSourceKind, HedgingConfig, HedgingResult};
