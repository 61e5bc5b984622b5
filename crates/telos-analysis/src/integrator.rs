//! Cross-purpose integration of schemas and vocabulary.

use std::collections::{BTreeMap, BTreeSet};

use telos_core::entities::{
    IntegrationPattern, IntegrationResult, SchemaSet, UnifiedInsight, VocabularyResult,
    WorkflowCompleteness,
};
use telos_core::enums::{InsightKind, Purpose};

#[derive(Debug, Clone, Copy)]
pub struct CrossPurposeIntegrator {
    /// Purposes an item must span to become a unified insight.
    pub high_integration_threshold: usize,
}

impl Default for CrossPurposeIntegrator {
    fn default() -> Self {
        Self {
            high_integration_threshold: 3,
        }
    }
}

impl CrossPurposeIntegrator {
    #[must_use]
    pub const fn new(high_integration_threshold: usize) -> Self {
        Self {
            high_integration_threshold,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn integrate(&self, schemas: &SchemaSet, vocabulary: &VocabularyResult) -> IntegrationResult {
        let purposes: Vec<Purpose> = schemas.schemas.keys().copied().collect();

        let mut integration_patterns = Vec::new();
        for (i, &first) in purposes.iter().enumerate() {
            for &second in &purposes[i + 1..] {
                integration_patterns.push(pair_pattern(schemas, vocabulary, first, second));
            }
        }

        let mean_pair_quality = if integration_patterns.is_empty() {
            0.0
        } else {
            integration_patterns.iter().map(|p| p.quality).sum::<f64>()
                / integration_patterns.len() as f64
        };

        let unified_insights = self.unified_insights(schemas, vocabulary);
        let workflow_completeness = workflow_completeness(schemas);

        tracing::debug!(
            pairs = integration_patterns.len(),
            insights = unified_insights.len(),
            mean_pair_quality,
            "integrated purposes"
        );

        IntegrationResult {
            integration_patterns,
            unified_insights,
            workflow_completeness,
            cross_purpose_quality: vocabulary.integration_quality,
            mean_pair_quality,
        }
    }

    fn unified_insights(&self, schemas: &SchemaSet, vocabulary: &VocabularyResult) -> Vec<UnifiedInsight> {
        let mut spans: BTreeMap<(InsightKind, String), BTreeSet<Purpose>> = BTreeMap::new();

        for &purpose in schemas.schemas.keys() {
            for term in vocabulary.term_set(purpose) {
                spans
                    .entry((InsightKind::Term, term.to_string()))
                    .or_default()
                    .insert(purpose);
            }
        }
        for (purpose, schema) in &schemas.schemas {
            for operation in &schema.operations {
                spans
                    .entry((InsightKind::Capability, operation.clone()))
                    .or_default()
                    .insert(*purpose);
            }
        }

        spans
            .into_iter()
            .filter(|(_, purposes)| purposes.len() >= self.high_integration_threshold)
            .map(|((kind, name), purposes)| UnifiedInsight {
                kind,
                name,
                purposes,
            })
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn pair_pattern(
    schemas: &SchemaSet,
    vocabulary: &VocabularyResult,
    first: Purpose,
    second: Purpose,
) -> IntegrationPattern {
    let left = vocabulary.term_set(first);
    let right = vocabulary.term_set(second);
    let shared_terms: Vec<String> = left.intersection(&right).map(|t| (*t).to_string()).collect();
    let union = left.union(&right).count();
    let vocabulary_overlap = if union == 0 {
        0.0
    } else {
        shared_terms.len() as f64 / union as f64
    };

    let has_interface = |source: Purpose, target: Purpose| {
        schemas
            .schemas
            .get(&source)
            .is_some_and(|schema| schema.integration_interfaces.contains_key(&target))
    };
    let present = [has_interface(first, second), has_interface(second, first)]
        .into_iter()
        .filter(|present| *present)
        .count();
    let interface_presence = present as f64 / 2.0;

    IntegrationPattern {
        first,
        second,
        vocabulary_overlap,
        interface_presence,
        quality: 0.5f64.mul_add(vocabulary_overlap, 0.5 * interface_presence),
        shared_terms,
    }
}

fn workflow_completeness(schemas: &SchemaSet) -> Vec<WorkflowCompleteness> {
    schemas
        .workflows
        .iter()
        .map(|workflow| {
            let missing: Vec<Purpose> = workflow
                .participants
                .iter()
                .copied()
                .filter(|participant| {
                    let step = workflow.steps.iter().find(|s| s.purpose == *participant);
                    let schema = schemas.schemas.get(participant);
                    match (step, schema) {
                        (Some(step), Some(schema)) => {
                            !schema.core_functions.contains(&step.capability)
                                || !schema.output_formats.contains(&step.output)
                        }
                        _ => true,
                    }
                })
                .collect();
            WorkflowCompleteness {
                workflow: workflow.name.clone(),
                complete: missing.is_empty(),
                missing,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternCatalog;
    use crate::classifier::{ClassifierParams, PurposeClassifier};
    use crate::schema::{SchemaGenerator, SchemaParams};
    use crate::vocabulary::{VocabularyExtractor, VocabularyParams};
    use pretty_assertions::assert_eq;

    const TEXT: &str = "Recurring patterns reveal a mechanism; the causal mechanism \
        explains why programs fail, and we forecast likely trends.";

    fn build(purposes: &[Purpose]) -> (SchemaSet, VocabularyResult) {
        let catalog = PatternCatalog::standard().unwrap();
        let purposes: BTreeSet<Purpose> = purposes.iter().copied().collect();
        let classification = PurposeClassifier::new(catalog, ClassifierParams::default())
            .classify(TEXT)
            .unwrap();
        let vocabulary = VocabularyExtractor::new(catalog)
            .extract(TEXT, &VocabularyParams::new(purposes.clone()));
        let schemas = SchemaGenerator::new(catalog)
            .generate(&classification, &vocabulary, &SchemaParams::uniform(purposes, 8, 10))
            .unwrap();
        (schemas, vocabulary)
    }

    #[test]
    fn every_unordered_pair_is_scored() {
        let (schemas, vocabulary) = build(&Purpose::ALL);
        let result = CrossPurposeIntegrator::default().integrate(&schemas, &vocabulary);
        assert_eq!(result.integration_patterns.len(), 10);
        for pattern in &result.integration_patterns {
            assert!(pattern.first < pattern.second);
            assert!((pattern.interface_presence - 1.0).abs() < f64::EPSILON);
            assert!((0.0..=1.0).contains(&pattern.quality));
        }
    }

    #[test]
    fn jaccard_overlap_uses_shared_terms() {
        let (schemas, vocabulary) = build(&[Purpose::Explanatory, Purpose::Causal]);
        let result = CrossPurposeIntegrator::default().integrate(&schemas, &vocabulary);
        let pattern = &result.integration_patterns[0];
        assert_eq!(pattern.shared_terms, vec!["mechanism"]);
        let left = vocabulary.term_set(Purpose::Explanatory);
        let right = vocabulary.term_set(Purpose::Causal);
        #[allow(clippy::cast_precision_loss)]
        let expected = 1.0 / left.union(&right).count() as f64;
        assert!((pattern.vocabulary_overlap - expected).abs() < 1e-12);
    }

    #[test]
    fn shared_operations_become_capability_insights() {
        let (schemas, vocabulary) = build(&Purpose::ALL);
        let result = CrossPurposeIntegrator::default().integrate(&schemas, &vocabulary);
        let capabilities: Vec<&str> = result
            .unified_insights
            .iter()
            .filter(|insight| insight.kind == InsightKind::Capability)
            .map(|insight| insight.name.as_str())
            .collect();
        assert_eq!(
            capabilities,
            vec!["cross_purpose_validation", "evidence_synthesis"]
        );
    }

    #[test]
    fn lower_threshold_admits_pairwise_items() {
        let (schemas, vocabulary) = build(&Purpose::ALL);
        let result = CrossPurposeIntegrator::new(2).integrate(&schemas, &vocabulary);
        let names: BTreeSet<&str> = result
            .unified_insights
            .iter()
            .map(|insight| insight.name.as_str())
            .collect();
        assert!(names.contains("mechanism_mapping"));
        assert!(names.contains("scenario_analysis"));
        assert!(names.contains("patterns"));
    }

    #[test]
    fn generated_workflows_are_complete() {
        let (schemas, vocabulary) = build(&Purpose::ALL);
        let result = CrossPurposeIntegrator::default().integrate(&schemas, &vocabulary);
        assert_eq!(result.workflow_completeness.len(), 3);
        assert!(result.workflow_completeness.iter().all(|w| w.complete));
    }

    #[test]
    fn workflow_with_missing_schema_is_reported_not_dropped() {
        let (mut schemas, vocabulary) = build(&Purpose::ALL);
        schemas.schemas.remove(&Purpose::Predictive);
        let result = CrossPurposeIntegrator::default().integrate(&schemas, &vocabulary);
        assert_eq!(result.workflow_completeness.len(), 3);
        for completeness in &result.workflow_completeness {
            assert!(!completeness.complete);
            assert_eq!(completeness.missing, vec![Purpose::Predictive]);
        }
    }

    #[test]
    fn single_purpose_has_no_pairs() {
        let (schemas, vocabulary) = build(&[Purpose::Causal]);
        let result = CrossPurposeIntegrator::default().integrate(&schemas, &vocabulary);
        assert!(result.integration_patterns.is_empty());
        assert!(result.mean_pair_quality.abs() < f64::EPSILON);
    }
}
