//! # Pricer Models (L2: Business Logic)
//!
//! European option pricing models.
//!
//! This crate provides:
//! - Black-Scholes closed-form prices and Greeks
//! - Cox-Ross-Rubinstein binomial lattice with full tree export
//!
//! ## Design Principles
//!
//! - **Validated inputs**: every model consumes [`pricer_core::types::MarketParams`]
//! - **Shared fallbacks**: both models agree on degenerate (T = 0, σ = 0) markets
//! - **Flat storage**: lattice layers live in contiguous triangular buffers

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod lattice;
