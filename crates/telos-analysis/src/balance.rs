//! Balance statistics over a per-purpose quantity.
//!
//! The same measurement is applied to classification confidences, vocabulary
//! term counts, and schema sophistication scores.

use std::collections::BTreeMap;

use telos_config::PipelineConfig;
use telos_core::entities::BalanceMetrics;
use telos_core::enums::Purpose;

/// Pass/fail thresholds for [`measure`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceThresholds {
    /// Minimum `min / max` ratio.
    pub balance_ratio: f64,
    /// Maximum `max / mean(others)` ratio.
    pub overemphasis_ratio: f64,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

impl From<&PipelineConfig> for BalanceThresholds {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            balance_ratio: config.balance_ratio_threshold,
            overemphasis_ratio: config.overemphasis_ratio_threshold,
        }
    }
}

/// Compute balance statistics for `values`.
///
/// The dominant purpose is the first purpose (declaration order) holding the
/// maximum, and only exists when that maximum is positive. `max_ratio` is
/// `None` when the dominant value is positive and every other value is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn measure(values: &BTreeMap<Purpose, f64>, thresholds: BalanceThresholds) -> BalanceMetrics {
    let count = values.len();
    if count == 0 {
        return BalanceMetrics {
            per_purpose_value: BTreeMap::new(),
            mean: 0.0,
            variance: 0.0,
            coefficient_of_variation: 0.0,
            balance_ratio: 0.0,
            max_ratio: None,
            dominant_purpose: None,
            overemphasis_detected: false,
            balance_passed: false,
        };
    }

    let n = count as f64;
    let total: f64 = values.values().sum();
    let mean = total / n;
    let variance = values.values().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let coefficient_of_variation = if mean > 0.0 {
        variance.sqrt() / mean
    } else {
        0.0
    };

    let min = values.values().copied().fold(f64::INFINITY, f64::min);
    let (mut dominant, mut max) = (None, f64::NEG_INFINITY);
    for (&purpose, &value) in values {
        if value > max {
            max = value;
            dominant = Some(purpose);
        }
    }

    let balance_ratio = if max > 0.0 { min / max } else { 0.0 };

    let max_ratio = if count == 1 || max <= 0.0 {
        Some(1.0)
    } else {
        let others_mean = (total - max) / (n - 1.0);
        if others_mean > 0.0 {
            Some(max / others_mean)
        } else {
            None
        }
    };

    let dominant_purpose = if max > 0.0 { dominant } else { None };
    let overemphasis_detected =
        max > 0.0 && max_ratio.is_none_or(|ratio| ratio > thresholds.overemphasis_ratio);
    let balance_passed = balance_ratio >= thresholds.balance_ratio && !overemphasis_detected;

    BalanceMetrics {
        per_purpose_value: values.clone(),
        mean,
        variance,
        coefficient_of_variation,
        balance_ratio,
        max_ratio,
        dominant_purpose,
        overemphasis_detected,
        balance_passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(Purpose, f64)]) -> BTreeMap<Purpose, f64> {
        pairs.iter().copied().collect()
    }

    fn all_five(raw: [f64; 5]) -> BTreeMap<Purpose, f64> {
        Purpose::ALL.into_iter().zip(raw).collect()
    }

    #[test]
    fn equal_values_pass() {
        let metrics = measure(&all_five([4.0; 5]), BalanceThresholds::default());
        assert!((metrics.balance_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(metrics.max_ratio, Some(1.0));
        assert!(metrics.variance.abs() < f64::EPSILON);
        assert!(!metrics.overemphasis_detected);
        assert!(metrics.balance_passed);
        assert_eq!(metrics.dominant_purpose, Some(Purpose::Descriptive));
    }

    #[test]
    fn zero_minimum_fails_balance_ratio() {
        let metrics = measure(&all_five([0.0, 3.0, 3.0, 3.0, 3.0]), BalanceThresholds::default());
        assert!(metrics.balance_ratio.abs() < f64::EPSILON);
        assert!(!metrics.overemphasis_detected);
        assert!(!metrics.balance_passed);
    }

    #[test]
    fn lone_nonzero_value_is_unbounded_overemphasis() {
        let metrics = measure(&all_five([0.5, 0.0, 0.0, 0.0, 0.0]), BalanceThresholds::default());
        assert_eq!(metrics.max_ratio, None);
        assert!(metrics.overemphasis_detected);
        assert_eq!(metrics.dominant_purpose, Some(Purpose::Descriptive));
        assert!(!metrics.balance_passed);
    }

    #[test]
    fn overemphasis_uses_mean_of_others() {
        // 0.9 / mean(0, 0.6, 0.6, 0.8) = 1.8
        let metrics = measure(&all_five([0.0, 0.6, 0.6, 0.9, 0.8]), BalanceThresholds::default());
        let ratio = metrics.max_ratio.unwrap();
        assert!((ratio - 1.8).abs() < 1e-9);
        assert!(!metrics.overemphasis_detected);
        assert_eq!(metrics.dominant_purpose, Some(Purpose::Causal));

        let metrics = measure(&all_five([1.0, 0.2, 0.2, 0.2, 0.2]), BalanceThresholds::default());
        assert!(metrics.overemphasis_detected);
    }

    #[test]
    fn all_zero_has_no_dominant_purpose() {
        let metrics = measure(&all_five([0.0; 5]), BalanceThresholds::default());
        assert_eq!(metrics.dominant_purpose, None);
        assert!(!metrics.overemphasis_detected);
        assert!(!metrics.balance_passed);
        assert!(metrics.coefficient_of_variation.abs() < f64::EPSILON);
    }

    #[test]
    fn single_purpose_positive_value_passes() {
        let metrics = measure(
            &values(&[(Purpose::Causal, 7.0)]),
            BalanceThresholds::default(),
        );
        assert_eq!(metrics.max_ratio, Some(1.0));
        assert!(metrics.balance_passed);
    }

    #[test]
    fn statistics_are_population_statistics() {
        let metrics = measure(
            &values(&[(Purpose::Descriptive, 2.0), (Purpose::Explanatory, 4.0)]),
            BalanceThresholds::default(),
        );
        assert!((metrics.mean - 3.0).abs() < f64::EPSILON);
        assert!((metrics.variance - 1.0).abs() < f64::EPSILON);
        assert!((metrics.coefficient_of_variation - 1.0 / 3.0).abs() < 1e-12);
        assert!((metrics.balance_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(metrics.max_ratio, Some(2.0));
        assert!(!metrics.overemphasis_detected);
    }

    #[test]
    fn empty_input_never_passes() {
        let metrics = measure(&BTreeMap::new(), BalanceThresholds::default());
        assert!(!metrics.balance_passed);
        assert_eq!(metrics.per_purpose_value, BTreeMap::new());
    }
}
