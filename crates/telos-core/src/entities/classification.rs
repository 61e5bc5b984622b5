use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::BalanceMetrics;
use crate::enums::Purpose;

/// Evidence and confidence for one purpose.
///
/// `confidence = pattern_score * 0.6 + min(evidence_count / 10, 0.4)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PurposeScore {
    pub purpose: Purpose,
    /// Fraction of the purpose's pattern categories that produced evidence.
    pub pattern_score: f64,
    pub evidence_count: u32,
    pub confidence: f64,
    /// Non-overlapping matched substrings, in text order.
    pub evidence_spans: Vec<String>,
    /// Names of the categories that contributed evidence, in catalog order.
    pub matched_categories: Vec<String>,
}

/// Purpose assignment for a single theory text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ClassificationResult {
    pub primary_purpose: Purpose,
    pub secondary_purposes: BTreeSet<Purpose>,
    pub scores: BTreeMap<Purpose, PurposeScore>,
    /// Balance statistics over the five confidences.
    pub balance: BalanceMetrics,
}

impl ClassificationResult {
    /// Confidence for `purpose`, `0.0` when it was not scored.
    #[must_use]
    pub fn confidence(&self, purpose: Purpose) -> f64 {
        self.scores.get(&purpose).map_or(0.0, |score| score.confidence)
    }
}
