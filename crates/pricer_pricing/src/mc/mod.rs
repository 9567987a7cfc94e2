//! Monte Carlo path simulation and delta-hedging kernels.
//!
//! # Architecture
//!
//! ```text
//! simulate_hedging
//! ├── HedgingConfig     (simulation parameters)
//! ├── simulate_paths()  (GBM paths from one PricerRng stream)
//! ├── DeltaSource       (AnalyticDelta | LatticeDelta)
//! └── HedgingResult     (errors, trajectories, HedgingStatistics)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::{MarketParams, OptionType};
//! use pricer_pricing::mc::{simulate_hedging_with_config, DeltaSourceKind, HedgingConfig, RebalanceFrequency};
//!
//! let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let config = HedgingConfig::builder()
//!     .n_paths(500)
//!     .n_steps(252)
//!     .rebalance_every(RebalanceFrequency::Weekly.interval(252, 1.0))
//!     .delta_source(DeltaSourceKind::Analytic)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let result = simulate_hedging_with_config(&params, &config).unwrap();
//! assert_eq!(result.errors.len(), 500);
//! assert!(result.statistics.var_99 <= result.statistics.var_95);
//! ```

mod config;
mod delta;
mod hedging;
mod paths;
mod result;

pub use config::{
    HedgingConfig, HedgingConfigBuilder, RebalanceFrequency, DEFAULT_DISPLAY_PATHS, DEFAULT_SEED,
    MAX_PATHS, MAX_STEPS,
};
pub use delta::{
    AnalyticDelta, DeltaSource, DeltaSourceKind, LatticeDelta, MIN_LATTICE_STEPS, TERMINAL_CUTOFF,
};
pub use hedging::{simulate_hedging, simulate_hedging_with, simulate_hedging_with_config, HedgeState};
pub use paths::{simulate_paths, PathSet};
pub use result::{HedgingResult, HedgingStatistics, HedgingTrajectory};
