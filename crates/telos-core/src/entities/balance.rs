use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{BalanceStage, BalanceState, BalanceStatus, Purpose};

/// Balance statistics over one per-purpose quantity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BalanceMetrics {
    pub per_purpose_value: BTreeMap<Purpose, f64>,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    pub coefficient_of_variation: f64,
    /// `min / max`, `0.0` when every value is zero.
    pub balance_ratio: f64,
    /// `max / mean(others)`. `None` when the others are all zero while the
    /// maximum is not, i.e. the ratio is unbounded.
    pub max_ratio: Option<f64>,
    pub dominant_purpose: Option<Purpose>,
    pub overemphasis_detected: bool,
    pub balance_passed: bool,
}

/// Balance validation record for one pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StageBalance {
    pub stage: BalanceStage,
    /// Metrics from the final check.
    pub metrics: BalanceMetrics,
    pub status: BalanceStatus,
    pub attempts: u32,
    /// Every state the validator passed through, starting with `checking`.
    pub transitions: Vec<BalanceState>,
}
