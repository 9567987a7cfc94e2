//! # Random Number Generation
//!
//! Seeded random number generation for the path and hedging simulators.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is constructed from an explicit seed
//! - **Single stream**: a simulation draws all normals from one generator,
//!   path-major and step-minor, so results do not depend on thread count
//! - **Zero allocation**: batch draws fill caller-owned `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let normal_value = rng.gen_normal();
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::PricerRng;
