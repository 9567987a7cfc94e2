//! Recombining CRR binomial tree with backward induction.
//!
//! Node `(i, j)` is the state after `i` steps of which `j` were up-moves,
//! so its underlying price is `S₀·uʲ·d^{i−j} = S₀·u^{2j−i}`. Writing the
//! price through the single exponent `2j − i` makes recombination exact in
//! floating point: every path reaching `(i, j)` yields the same bits.
//!
//! # Memory Layout
//!
//! Layers are stored flattened in triangular order: layer `i` occupies
//! `[i(i+1)/2, (i+1)(i+2)/2)`. Backward induction on the price-only path
//! uses two swapped layer buffers instead.

use pricer_core::types::{MarketParams, OptionType, PricingResult};

use super::crr::CrrParams;
use crate::analytical::black_scholes::intrinsic_delta;

/// Full CRR lattice: underlying, option value and hedge ratio per node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinomialTree {
    crr: CrrParams,
    option_type: OptionType,
    stock: Vec<f64>,
    value: Vec<f64>,
    /// Triangular over layers `0..N` (terminal layer has no hedge ratio).
    delta: Vec<f64>,
}

#[inline]
fn layer_offset(i: usize) -> usize {
    i * (i + 1) / 2
}

impl BinomialTree {
    /// Builds the lattice and runs backward induction over every layer.
    ///
    /// # Errors
    /// - `InvalidParameter` if `steps` is zero
    /// - `ArbitrageViolation` if the CRR factors admit arbitrage
    pub fn build(params: &MarketParams, steps: usize) -> PricingResult<Self> {
        let crr = CrrParams::new(params, steps)?;
        crr.check_no_arbitrage()?;

        let n = crr.steps();
        let total = layer_offset(n + 1);

        let mut stock = Vec::with_capacity(total);
        for i in 0..=n {
            stock.extend(layer_prices(params.spot(), crr.up(), i));
        }

        let mut value = vec![0.0; total];
        let terminal = layer_offset(n);
        for (v, s) in value[terminal..].iter_mut().zip(&stock[terminal..]) {
            *v = params.payoff(*s);
        }

        let mut delta = vec![0.0; layer_offset(n)];
        let disc_p = crr.discount() * crr.prob();
        let disc_q = crr.discount() * (1.0 - crr.prob());
        let spread = crr.up() - crr.down();

        for i in (0..n).rev() {
            let (head, next) = value.split_at_mut(layer_offset(i + 1));
            let current = &mut head[layer_offset(i)..];
            let next = &next[..i + 2];
            induct_layer(current, next, disc_p, disc_q);

            let s = &stock[layer_offset(i)..layer_offset(i + 1)];
            let phi = &mut delta[layer_offset(i)..layer_offset(i + 1)];
            hedge_layer(phi, s, next, spread);
        }

        Ok(Self {
            crr,
            option_type: params.option_type(),
            stock,
            value,
            delta,
        })
    }

    /// CRR factors the tree was built with.
    #[inline]
    pub fn crr(&self) -> &CrrParams {
        &self.crr
    }

    /// Number of steps N.
    #[inline]
    pub fn steps(&self) -> usize {
        self.crr.steps()
    }

    /// Option type priced on the tree.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Total number of nodes, (N+1)(N+2)/2.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.stock.len()
    }

    /// Option value at the root.
    #[inline]
    pub fn root_value(&self) -> f64 {
        self.value[0]
    }

    /// Hedge ratio at the root.
    #[inline]
    pub fn root_delta(&self) -> f64 {
        self.delta[0]
    }

    /// Underlying price at node `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i > N` or `j > i`.
    #[inline]
    pub fn stock(&self, i: usize, j: usize) -> f64 {
        assert!(j <= i, "node index j = {} exceeds layer {}", j, i);
        self.stock[layer_offset(i) + j]
    }

    /// Option value at node `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i > N` or `j > i`.
    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        assert!(j <= i, "node index j = {} exceeds layer {}", j, i);
        self.value[layer_offset(i) + j]
    }

    /// Hedge ratio at non-terminal node `(i, j)`, `None` on the terminal layer.
    pub fn delta(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.steps() || j > i {
            return None;
        }
        Some(self.delta[layer_offset(i) + j])
    }

    /// Underlying prices of layer `i`, ordered by number of up-moves.
    pub fn layer_stock(&self, i: usize) -> &[f64] {
        &self.stock[layer_offset(i)..layer_offset(i + 1)]
    }

    /// Option values of layer `i`.
    pub fn layer_values(&self, i: usize) -> &[f64] {
        &self.value[layer_offset(i)..layer_offset(i + 1)]
    }

    /// Hedge ratios of layer `i`, empty for the terminal layer.
    pub fn layer_deltas(&self, i: usize) -> &[f64] {
        self.delta
            .get(layer_offset(i)..layer_offset(i + 1))
            .unwrap_or(&[])
    }

    /// Underlying prices of the terminal layer.
    pub fn terminal_prices(&self) -> &[f64] {
        self.layer_stock(self.steps())
    }

    /// Number of distinct up/down paths reaching terminal node `j`, C(N, j).
    ///
    /// Evaluated multiplicatively in `f64`; exact while the result fits in
    /// the 53-bit mantissa and overflows to infinity for very large N.
    pub fn path_count(&self, j: usize) -> f64 {
        binomial_coefficient(self.steps(), j)
    }

    /// Flattened stock, value and delta arrays for export.
    pub fn into_flat(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.stock, self.value, self.delta)
    }
}

/// Prices of layer `i`: `S₀·u^{2j−i}` for `j = 0..=i`.
#[inline]
fn layer_prices(spot: f64, up: f64, i: usize) -> impl Iterator<Item = f64> {
    (0..=i).map(move |j| spot * up.powi(2 * j as i32 - i as i32))
}

/// `current[j] = e^{−rΔt}·(p·next[j+1] + (1−p)·next[j])`
#[inline]
fn induct_layer(current: &mut [f64], next: &[f64], disc_p: f64, disc_q: f64) {
    for (v, pair) in current.iter_mut().zip(next.windows(2)) {
        *v = disc_p * pair[1] + disc_q * pair[0];
    }
}

/// `φ[j] = (next[j+1] − next[j]) / (S[j]·(u − d))`
#[inline]
fn hedge_layer(phi: &mut [f64], stock: &[f64], next: &[f64], spread: f64) {
    for ((d, s), pair) in phi.iter_mut().zip(stock).zip(next.windows(2)) {
        *d = (pair[1] - pair[0]) / (s * spread);
    }
}

fn binomial_coefficient(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Output of [`price_crr`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CrrResult {
    /// Root option value.
    pub price: f64,
    /// Root hedge ratio.
    pub delta: f64,
    /// Full lattice, when requested and defined.
    pub tree: Option<BinomialTree>,
}

/// Prices a European option on an N-step CRR lattice.
///
/// Without `return_tree` only two layer buffers are alive at any time.
/// For degenerate markets (T = 0 or σ = 0) u = d and the lattice is
/// undefined; the intrinsic fallback of the analytic pricer is returned
/// and `tree` is `None`.
///
/// # Errors
/// - `InvalidParameter` if `steps` is zero
/// - `ArbitrageViolation` if d < e^{rΔt} < u fails
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketParams, OptionType};
/// use pricer_models::lattice::price_crr;
///
/// let params = MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let result = price_crr(&params, 200, false).unwrap();
/// assert!((result.price - 10.45).abs() < 0.05);
/// assert!(result.tree.is_none());
/// ```
pub fn price_crr(params: &MarketParams, steps: usize, return_tree: bool) -> PricingResult<CrrResult> {
    let crr = CrrParams::new(params, steps)?;

    if params.is_degenerate() {
        return Ok(CrrResult {
            price: params.intrinsic(),
            delta: intrinsic_delta(params.spot(), params.strike(), params.option_type()),
            tree: None,
        });
    }

    if return_tree {
        let tree = BinomialTree::build(params, steps)?;
        return Ok(CrrResult {
            price: tree.root_value(),
            delta: tree.root_delta(),
            tree: Some(tree),
        });
    }

    crr.check_no_arbitrage()?;

    let n = crr.steps();
    let disc_p = crr.discount() * crr.prob();
    let disc_q = crr.discount() * (1.0 - crr.prob());

    let mut next: Vec<f64> = layer_prices(params.spot(), crr.up(), n)
        .map(|s| params.payoff(s))
        .collect();
    let mut current = vec![0.0; n];

    // Stop at layer 1 so the root hedge ratio can be read off its two children
    for i in (1..n).rev() {
        induct_layer(&mut current[..i + 1], &next[..i + 2], disc_p, disc_q);
        std::mem::swap(&mut current, &mut next);
    }

    let (v_down, v_up) = (next[0], next[1]);
    let price = disc_p * v_up + disc_q * v_down;
    let delta = (v_up - v_down) / (params.spot() * (crr.up() - crr.down()));

    Ok(CrrResult {
        price,
        delta,
        tree: None,
    })
}
