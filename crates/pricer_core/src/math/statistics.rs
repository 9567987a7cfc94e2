//! Descriptive statistics over sample slices.
//!
//! Used to reduce Monte Carlo outputs (hedging errors, terminal prices) and
//! to fit empirical convergence rates. All functions are order-independent
//! in their result except for floating-point summation order, which callers
//! keep fixed by passing samples in a deterministic order.

use crate::types::{PricingError, PricingResult};

/// Arithmetic mean. Returns `NaN` for an empty slice.
#[inline]
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation with Bessel's correction (n − 1).
///
/// Returns 0 for fewer than two samples.
pub fn sample_std(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(samples);
    let ss: f64 = samples.iter().map(|x| (x - m) * (x - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Empirical quantile of an ascending-sorted slice.
///
/// Linear interpolation between the two bracketing order statistics at
/// fractional rank `q · (n − 1)`.
///
/// # Errors
/// `InvalidParameter` if the slice is empty or `q` is outside [0, 1].
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::quantile_sorted;
///
/// let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(quantile_sorted(&xs, 0.5).unwrap(), 3.0);
/// assert_eq!(quantile_sorted(&xs, 0.25).unwrap(), 2.0);
/// assert!((quantile_sorted(&xs, 0.1).unwrap() - 1.4).abs() < 1e-12);
/// ```
pub fn quantile_sorted(sorted: &[f64], q: f64) -> PricingResult<f64> {
    if sorted.is_empty() {
        return Err(PricingError::invalid("samples", "cannot take quantile of empty sample"));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(PricingError::invalid(
            "quantile",
            format!("must lie in [0, 1], got {}", q),
        ));
    }

    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = rank - lo as f64;
    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Empirical quantile of an unsorted sample (sorts a copy).
pub fn quantile(samples: &[f64], q: f64) -> PricingResult<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, q)
}

/// Ordinary least-squares slope of `ys` against `xs`.
///
/// Returns `None` for fewer than two points or when all `xs` coincide.
pub fn ols_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mx = mean(&xs[..n]);
    let my = mean(&ys[..n]);

    let (sxy, sxx) = xs[..n]
        .iter()
        .zip(&ys[..n])
        .fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            (sxy + (x - mx) * (y - my), sxx + (x - mx) * (x - mx))
        });

    if sxx == 0.0 {
        None
    } else {
        Some(sxy / sxx)
    }
}

/// Slope of ln(y) against ln(x), skipping non-positive pairs.
///
/// For an error sequence decaying like C·N^α this recovers α.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::log_log_slope;
///
/// let ns = [10.0, 20.0, 40.0, 80.0];
/// let errs: Vec<f64> = ns.iter().map(|n| 3.0 / n).collect();
/// assert!((log_log_slope(&ns, &errs).unwrap() + 1.0).abs() < 1e-12);
/// ```
pub fn log_log_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let (lx, ly): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| **x > 0.0 && **y > 0.0)
        .map(|(x, y)| (x.ln(), y.ln()))
        .unzip();
    ols_slope(&lx, &ly)
}
