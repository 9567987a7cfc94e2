//! Core market and error types.
//!
//! This module provides:
//! - `market`: [`MarketParams`] and [`OptionType`], the immutable inputs to every pricer
//! - `error`: [`PricingError`] taxonomy shared by the whole workspace
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod market;

// Re-export commonly used types at module level
pub use error::{PricingError, PricingResult};
pub use market::{MarketParams, OptionType};
