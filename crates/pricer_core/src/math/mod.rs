//! Numerical primitives.
//!
//! - [`distributions`]: standard normal CDF and PDF
//! - [`statistics`]: mean, standard deviation, empirical quantiles, log-log slope fits

pub mod distributions;
pub mod statistics;

pub use distributions::{norm_cdf, norm_pdf};
pub use statistics::{log_log_slope, mean, ols_slope, quantile, quantile_sorted, sample_std};
