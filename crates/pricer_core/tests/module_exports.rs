//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that distribution functions are accessible via absolute path.
#[test]
fn test_distribution_exports() {
    use pricer_core::math::distributions::norm_cdf;
    use pricer_core::math::distributions::norm_pdf;

    assert!((norm_cdf(1.959963984540054) - 0.975).abs() < 1e-14);
    assert!(norm_pdf(0.0) > 0.39);
}

/// Test that statistics functions are accessible via both paths.
#[test]
fn test_statistics_exports() {
    use pricer_core::math::statistics;
    use pricer_core::math::{mean, quantile, sample_std};

    let xs = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(mean(&xs), 2.5);
    assert_eq!(statistics::mean(&xs), 2.5);
    assert!(sample_std(&xs) > 1.0);
    assert_eq!(quantile(&xs, 1.0).unwrap(), 4.0);
}

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::{PricingError, PricingResult};
    use pricer_core::types::market::{MarketParams, OptionType};

    let params: PricingResult<MarketParams> =
        MarketParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call);
    assert!(params.is_ok());

    let err = MarketParams::new(100.0, 0.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap_err();
    assert!(matches!(err, PricingError::InvalidParameter { name: "strike", .. }));
}
