//! Cox-Ross-Rubinstein binomial lattice.
//!
//! This module provides:
//! - `crr`: [`CrrParams`] lattice factors and the no-arbitrage check
//! - `tree`: [`BinomialTree`] storage and [`price_crr`] backward induction

pub mod crr;
pub mod tree;

pub use crr::CrrParams;
pub use tree::{price_crr, BinomialTree, CrrResult};
