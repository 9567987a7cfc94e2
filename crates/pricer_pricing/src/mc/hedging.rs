//! Monte Carlo simulation of a discretely rebalanced delta hedge.
//!
//! The writer of one option receives the premium V₀, buys φ₀ shares and
//! keeps the rest in a cash account earning the risk-free rate. Every
//! `k` native steps the position is re-set to the model delta, the trade
//! being financed from cash. At maturity the hedging error is
//! `φ·S_T + cash − payoff(S_T)`.
//!
//! # Architecture
//!
//! ```text
//! simulate_hedging / simulate_hedging_with_config
//! ├── simulate_paths()        (sequential, one seeded stream)
//! ├── DeltaSource             (AnalyticDelta | LatticeDelta)
//! ├── hedge_path()  × n_paths (rayon, collected in path order)
//! └── HedgingStatistics       (sequential reduction)
//! ```

use pricer_core::types::{MarketParams, PricingResult};
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::HedgingConfig;
use super::delta::{AnalyticDelta, DeltaSource, DeltaSourceKind, LatticeDelta};
use super::paths::{simulate_paths, PathSet};
use super::result::{HedgingResult, HedgingStatistics, HedgingTrajectory};

/// Self-financing replicating portfolio of one path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HedgeState {
    /// Current underlying price.
    pub spot: f64,
    /// Shares held.
    pub shares: f64,
    /// Cash account balance.
    pub cash: f64,
}

impl HedgeState {
    /// Sells the option for `premium` and buys `delta` shares at `spot`.
    #[inline]
    pub fn open(spot: f64, premium: f64, delta: f64) -> Self {
        Self {
            spot,
            shares: delta,
            cash: premium - delta * spot,
        }
    }

    /// Moves to the next grid point: cash earns `growth`, spot becomes `spot`.
    #[inline]
    pub fn advance(&mut self, spot: f64, growth: f64) {
        self.spot = spot;
        self.cash *= growth;
    }

    /// Re-sets the position to `delta` shares, paying for the trade in cash.
    #[inline]
    pub fn rebalance(&mut self, delta: f64) {
        self.cash -= (delta - self.shares) * self.spot;
        self.shares = delta;
    }

    /// Marked-to-market portfolio value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.shares * self.spot + self.cash
    }
}

/// Terminal outcome of one hedged path.
struct PathOutcome {
    error: f64,
    payoff: f64,
    trajectory: Option<HedgingTrajectory>,
}

/// Simulates a delta hedge over `n_paths` GBM paths.
///
/// Flat entry point: builds a [`HedgingConfig`] with default display count
/// and delegates to [`simulate_hedging_with_config`].
///
/// # Errors
/// - `InvalidParameter` for zero counts, `rebalance_frequency` of 0 or above `n_steps`
/// - `ArbitrageViolation` when the lattice delta source admits arbitrage
///
/// # Examples
/// ```rust
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_pricing::mc::{simulate_hedging, DeltaSourceKind};
///
/// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let result = simulate_hedging(&params, 52, 200, 1, DeltaSourceKind::Analytic, 42).unwrap();
///
/// assert_eq!(result.errors.len(), 200);
/// assert!(result.statistics.mean.abs() < 0.5);
/// ```
pub fn simulate_hedging(
    params: &MarketParams,
    n_steps: usize,
    n_paths: usize,
    rebalance_frequency: usize,
    delta_source: DeltaSourceKind,
    seed: u64,
) -> PricingResult<HedgingResult> {
    let config = HedgingConfig::builder()
        .n_steps(n_steps)
        .n_paths(n_paths)
        .rebalance_every(rebalance_frequency)
        .delta_source(delta_source)
        .seed(seed)
        .build()?;
    simulate_hedging_with_config(params, &config)
}

/// Simulates a delta hedge described by `config`.
///
/// Dispatches once on the delta-source kind; the per-path loop is
/// monomorphised over the concrete [`DeltaSource`].
pub fn simulate_hedging_with_config(
    params: &MarketParams,
    config: &HedgingConfig,
) -> PricingResult<HedgingResult> {
    config.validate()?;

    match config.delta_source().lattice_steps(config.n_steps()) {
        None => simulate_hedging_with(params, config, &AnalyticDelta::new(params)),
        Some(steps) => {
            simulate_hedging_with(params, config, &LatticeDelta::new(params, steps)?)
        }
    }
}

/// Simulates a delta hedge with an explicit [`DeltaSource`].
///
/// Paths are generated sequentially from one seeded stream, hedged in
/// parallel and collected in path order, so results are bit-identical
/// across runs and thread counts.
pub fn simulate_hedging_with<D: DeltaSource>(
    params: &MarketParams,
    config: &HedgingConfig,
    source: &D,
) -> PricingResult<HedgingResult> {
    config.validate()?;

    let paths = simulate_paths(params, config.n_steps(), config.n_paths(), config.seed())?;
    let premium = source.price(params.spot(), params.maturity())?;

    info!(
        n_paths = config.n_paths(),
        n_steps = config.n_steps(),
        rebalance_every = config.rebalance_every(),
        delta_source = %config.delta_source(),
        seed = config.seed(),
        premium,
        "running delta-hedging simulation"
    );

    let outcomes: Vec<PathOutcome> = (0..config.n_paths())
        .into_par_iter()
        .map(|idx| hedge_path(params, config, source, &paths, idx, premium))
        .collect::<PricingResult<_>>()?;

    let mut errors = Vec::with_capacity(outcomes.len());
    let mut payoffs = Vec::with_capacity(outcomes.len());
    let mut trajectories = Vec::with_capacity(config.n_display());
    for outcome in outcomes {
        errors.push(outcome.error);
        payoffs.push(outcome.payoff);
        if let Some(trajectory) = outcome.trajectory {
            trajectories.push(trajectory);
        }
    }

    let statistics = HedgingStatistics::from_errors(&errors, premium)?;
    debug!(
        mean = statistics.mean,
        std_dev = statistics.std_dev,
        var_95 = statistics.var_95,
        var_99 = statistics.var_99,
        "hedging error statistics"
    );

    Ok(HedgingResult {
        config: config.clone(),
        premium,
        errors,
        payoffs,
        trajectories,
        statistics,
    })
}

/// Runs the self-financing strategy along path `idx`.
fn hedge_path<D: DeltaSource>(
    params: &MarketParams,
    config: &HedgingConfig,
    source: &D,
    paths: &PathSet,
    idx: usize,
    premium: f64,
) -> PricingResult<PathOutcome> {
    let spots = paths.path(idx);
    let n_steps = config.n_steps();
    let k = config.rebalance_every();
    let dt = paths.dt();
    let growth = (params.rate() * dt).exp();

    let delta0 = source.delta(spots[0], params.maturity())?;
    let mut state = HedgeState::open(spots[0], premium, delta0);

    let mut trajectory = (idx < config.n_display()).then(|| HedgingTrajectory {
        spot: spots.to_vec(),
        portfolio: Vec::with_capacity(n_steps + 1),
        delta: Vec::with_capacity(n_steps + 1),
    });
    record(&mut trajectory, &state);

    for (step, &spot) in spots.iter().enumerate().skip(1) {
        state.advance(spot, growth);
        // Trades at maturity are self-financing and leave the value unchanged
        if step < n_steps && step % k == 0 {
            let remaining = (n_steps - step) as f64 * dt;
            state.rebalance(source.delta(spot, remaining)?);
        }
        record(&mut trajectory, &state);
    }

    let payoff = params.payoff(state.spot);
    Ok(PathOutcome {
        error: state.value() - payoff,
        payoff,
        trajectory,
    })
}

#[inline]
fn record(trajectory: &mut Option<HedgingTrajectory>, state: &HedgeState) {
    if let Some(t) = trajectory {
        t.portfolio.push(state.value());
        t.delta.push(state.shares);
    }
}
