//! # pricer_core: Foundation Layer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Market inputs: [`MarketParams`](types::MarketParams), [`OptionType`](types::OptionType) (`types::market`)
//! - Error taxonomy: [`PricingError`](types::PricingError) (`types::error`)
//! - Standard normal distribution (`math::distributions`)
//! - Descriptive statistics and slope fits (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - statrs: Complementary error function
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::norm_cdf;
//! use pricer_core::types::{MarketParams, OptionType};
//!
//! let params = MarketParams::new(100.0, 95.0, 0.5, 0.03, 0.25, OptionType::Put).unwrap();
//! assert_eq!(params.intrinsic(), 0.0);
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `MarketParams` and `OptionType`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
