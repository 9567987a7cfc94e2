//! Property tests for the Black-Scholes and CRR pricers.
//!
//! # Test Categories
//!
//! 1. **Parity**: put-call parity for both models
//! 2. **Recombination**: brute-force path enumeration against the lattice
//! 3. **Agreement**: CRR converges to the closed form

use approx::assert_relative_eq;
use pricer_core::types::{MarketParams, OptionType};
use pricer_models::analytical::price_black_scholes;
use pricer_models::lattice::{price_crr, BinomialTree, CrrParams};
use proptest::prelude::*;

fn pair(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> (MarketParams, MarketParams) {
    let call = MarketParams::new(spot, strike, expiry, rate, vol, OptionType::Call).unwrap();
    (call, call.with_option_type(OptionType::Put))
}

// ============================================================================
// Parity Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_black_scholes_put_call_parity(
        spot in 50.0f64..150.0,
        strike in 50.0f64..150.0,
        expiry in 0.05f64..3.0,
        rate in -0.02f64..0.10,
        vol in 0.05f64..0.8,
    ) {
        let (call, put) = pair(spot, strike, expiry, rate, vol);
        let (c, cg) = price_black_scholes(&call).unwrap();
        let (p, pg) = price_black_scholes(&put).unwrap();
        let forward_gap = spot - strike * (-rate * expiry).exp();
        prop_assert!((c - p - forward_gap).abs() < 1e-10);
        prop_assert!((cg.delta - pg.delta - 1.0).abs() < 1e-12);
        prop_assert!((cg.gamma - pg.gamma).abs() < 1e-14);
    }

    #[test]
    fn prop_crr_put_call_parity(
        spot in 80.0f64..120.0,
        strike in 80.0f64..120.0,
        steps in 20usize..120,
    ) {
        let (call, put) = pair(spot, strike, 1.0, 0.05, 0.25);
        let c = price_crr(&call, steps, false).unwrap();
        let p = price_crr(&put, steps, false).unwrap();
        let forward_gap = spot - strike * (-0.05f64).exp();
        prop_assert!((c.price - p.price - forward_gap).abs() < 1e-9);
        prop_assert!((c.delta - p.delta - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_tree_values_are_non_negative(steps in 1usize..40, vol in 0.05f64..0.6) {
        let (call, _) = pair(100.0, 105.0, 0.5, 0.03, vol);
        let tree = BinomialTree::build(&call, steps).unwrap();
        for i in 0..=steps {
            prop_assert!(tree.layer_values(i).iter().all(|v| *v >= 0.0));
        }
        for i in 0..steps {
            prop_assert!(tree.layer_deltas(i).iter().all(|d| (0.0..=1.0).contains(d)));
        }
    }
}

// ============================================================================
// Recombination Tests
// ============================================================================

#[test]
fn test_terminal_layer_by_path_enumeration() {
    let (call, _) = pair(100.0, 100.0, 1.0, 0.05, 0.2);
    let n = 12;
    let tree = BinomialTree::build(&call, n).unwrap();
    let crr = *tree.crr();

    let mut counts = vec![0u64; n + 1];
    for mask in 0u32..(1 << n) {
        let mut spot = 100.0;
        for bit in 0..n {
            spot *= if mask & (1 << bit) != 0 { crr.up() } else { crr.down() };
        }
        let ups = mask.count_ones() as usize;
        counts[ups] += 1;
        assert_relative_eq!(spot, tree.stock(n, ups), max_relative = 1e-12);
    }

    for (j, count) in counts.iter().enumerate() {
        assert_eq!(*count as f64, tree.path_count(j));
    }

    let terminal = tree.terminal_prices();
    assert_eq!(terminal.len(), n + 1);
    assert!(terminal.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_no_arbitrage_reference_lattice() {
    let (call, _) = pair(100.0, 100.0, 1.0, 0.05, 0.2);
    let crr = CrrParams::new(&call, 50).unwrap();
    assert!(crr.is_arbitrage_free());
    assert!(crr.down() < crr.growth() && crr.growth() < crr.up());
    assert!(crr.prob() > 0.0 && crr.prob() < 1.0);
}

// ============================================================================
// Agreement Tests
// ============================================================================

#[test]
fn test_crr_200_matches_black_scholes() {
    let (call, put) = pair(100.0, 100.0, 1.0, 0.05, 0.2);
    let (bs_call, _) = price_black_scholes(&call).unwrap();
    let (bs_put, _) = price_black_scholes(&put).unwrap();

    let crr_call = price_crr(&call, 200, true).unwrap();
    let crr_put = price_crr(&put, 200, false).unwrap();

    assert!((crr_call.price - 10.45).abs() < 0.05);
    assert!((crr_call.price - bs_call).abs() < 0.05);
    assert!((crr_put.price - bs_put).abs() < 0.05);
    assert_eq!(crr_call.tree.unwrap().node_count(), 201 * 202 / 2);
}

#[test]
fn test_degenerate_models_agree() {
    for (spot, option_type) in [(120.0, OptionType::Call), (80.0, OptionType::Put)] {
        let params = MarketParams::new(spot, 100.0, 0.0, 0.05, 0.2, option_type).unwrap();
        let (bs, greeks) = price_black_scholes(&params).unwrap();
        let crr = price_crr(&params, 10, true).unwrap();
        assert_eq!(bs, 20.0);
        assert_eq!(crr.price, 20.0);
        assert_eq!(greeks.delta, crr.delta);
        assert_eq!(greeks.gamma, 0.0);
        assert_eq!(greeks.vega, 0.0);
        assert_eq!(greeks.theta, 0.0);
        assert_eq!(greeks.rho, 0.0);
    }
}
