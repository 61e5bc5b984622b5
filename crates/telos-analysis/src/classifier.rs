//! Purpose classification by pattern evidence.
//!
//! For each purpose every core category is scanned; all matches are sorted by
//! start offset (longer first on ties) and the non-overlapping ones are kept
//! as evidence. Confidence combines category coverage with evidence volume:
//!
//! ```text
//! confidence = pattern_score * 0.6 + min(evidence_count / 10, 0.4)
//! ```

use std::collections::{BTreeMap, BTreeSet};

use telos_core::entities::{ClassificationResult, PurposeScore};
use telos_core::enums::Purpose;

use crate::balance::{BalanceThresholds, measure};
use crate::catalog::{PatternCatalog, PurposePatterns};
use crate::error::AnalysisError;

const COVERAGE_WEIGHT: f64 = 0.6;
const EVIDENCE_CAP: f64 = 0.4;
const EVIDENCE_SCALE: f64 = 10.0;

/// Classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierParams {
    pub secondary_threshold: f64,
    pub ambiguity_floor: f64,
    pub balance: BalanceThresholds,
}

impl From<&telos_config::PipelineConfig> for ClassifierParams {
    fn from(config: &telos_config::PipelineConfig) -> Self {
        Self {
            secondary_threshold: config.secondary_threshold,
            ambiguity_floor: config.ambiguity_floor,
            balance: BalanceThresholds::from(config),
        }
    }
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self::from(&telos_config::PipelineConfig::default())
    }
}

/// Assigns primary and secondary purposes to theory text.
#[derive(Debug, Clone, Copy)]
pub struct PurposeClassifier<'c> {
    catalog: &'c PatternCatalog,
    params: ClassifierParams,
}

struct Span<'t> {
    start: usize,
    end: usize,
    category: usize,
    text: &'t str,
}

impl<'c> PurposeClassifier<'c> {
    #[must_use]
    pub const fn new(catalog: &'c PatternCatalog, params: ClassifierParams) -> Self {
        Self { catalog, params }
    }

    /// Classify `text` against all five purposes.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ClassificationAmbiguity`] when no purpose
    /// reaches the ambiguity floor, which includes empty text.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult, AnalysisError> {
        let scores: BTreeMap<Purpose, PurposeScore> = self
            .catalog
            .iter()
            .map(|patterns| (patterns.purpose, score_purpose(patterns, text)))
            .collect();

        // Strict argmax; BTreeMap order makes the first maximum win ties.
        let mut primary: Option<(Purpose, f64)> = None;
        for (purpose, score) in &scores {
            if primary.is_none_or(|(_, best)| score.confidence > best) {
                primary = Some((*purpose, score.confidence));
            }
        }
        let max_confidence = primary.map_or(0.0, |(_, confidence)| confidence);
        let primary_purpose = match primary {
            // zero confidence means no evidence at all, whatever the floor
            Some((purpose, confidence))
                if confidence > 0.0 && confidence >= self.params.ambiguity_floor =>
            {
                purpose
            }
            _ => {
                return Err(AnalysisError::ClassificationAmbiguity {
                    max_confidence,
                    floor: self.params.ambiguity_floor,
                });
            }
        };

        let secondary_purposes: BTreeSet<Purpose> = scores
            .values()
            .filter(|score| {
                score.purpose != primary_purpose
                    && score.confidence >= self.params.secondary_threshold
            })
            .map(|score| score.purpose)
            .collect();

        let confidences: BTreeMap<Purpose, f64> = scores
            .iter()
            .map(|(purpose, score)| (*purpose, score.confidence))
            .collect();
        let balance = measure(&confidences, self.params.balance);

        if balance.overemphasis_detected {
            tracing::warn!(
                primary = %primary_purpose,
                max_ratio = ?balance.max_ratio,
                "classification overemphasises one purpose"
            );
        }
        tracing::debug!(
            primary = %primary_purpose,
            secondary = secondary_purposes.len(),
            balance_ratio = balance.balance_ratio,
            "classified theory"
        );

        Ok(ClassificationResult {
            primary_purpose,
            secondary_purposes,
            scores,
            balance,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn score_purpose(patterns: &PurposePatterns, text: &str) -> PurposeScore {
    let mut spans: Vec<Span<'_>> = patterns
        .categories
        .iter()
        .enumerate()
        .flat_map(|(category, pattern)| {
            pattern.regex.find_iter(text).map(move |m| Span {
                start: m.start(),
                end: m.end(),
                category,
                text: m.as_str(),
            })
        })
        .collect();
    spans.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| b.end.cmp(&a.end))
            .then_with(|| a.category.cmp(&b.category))
    });

    let mut kept: Vec<&Span<'_>> = Vec::new();
    let mut cursor = 0usize;
    for span in &spans {
        if span.start >= cursor && span.end > span.start {
            cursor = span.end;
            kept.push(span);
        }
    }

    let contributing: BTreeSet<usize> = kept.iter().map(|span| span.category).collect();
    let total = patterns.categories.len().max(1) as f64;
    let pattern_score = contributing.len() as f64 / total;
    let evidence_count = u32::try_from(kept.len()).unwrap_or(u32::MAX);
    let confidence = pattern_score
        .mul_add(
            COVERAGE_WEIGHT,
            (f64::from(evidence_count) / EVIDENCE_SCALE).min(EVIDENCE_CAP),
        )
        .clamp(0.0, 1.0);

    PurposeScore {
        purpose: patterns.purpose,
        pattern_score,
        evidence_count,
        confidence,
        evidence_spans: kept.iter().map(|span| span.text.to_string()).collect(),
        matched_categories: contributing
            .iter()
            .map(|&index| patterns.categories[index].name.clone())
            .collect(),
    }
}
