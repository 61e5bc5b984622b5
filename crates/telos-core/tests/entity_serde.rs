//! Serde and JsonSchema checks for the entity and response types.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;
use telos_core::entities::*;
use telos_core::enums::*;
use telos_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn unbounded_metrics() -> BalanceMetrics {
    BalanceMetrics {
        per_purpose_value: BTreeMap::from([
            (Purpose::Descriptive, 4.0),
            (Purpose::Explanatory, 0.0),
        ]),
        mean: 2.0,
        variance: 4.0,
        coefficient_of_variation: 1.0,
        balance_ratio: 0.0,
        max_ratio: None,
        dominant_purpose: Some(Purpose::Descriptive),
        overemphasis_detected: true,
        balance_passed: false,
    }
}

#[test]
fn unbounded_max_ratio_serializes_as_null_and_validates() {
    let metrics = unbounded_metrics();
    let value = serde_json::to_value(&metrics).unwrap();
    assert!(value["max_ratio"].is_null());
    assert_eq!(value["per_purpose_value"]["descriptive"], 4.0);

    let schema = serde_json::to_value(schema_for!(BalanceMetrics)).unwrap();
    let errors = validate_against_schema(&schema, &value);
    assert!(errors.is_empty(), "schema errors: {errors:?}");

    let recovered: BalanceMetrics = serde_json::from_value(value).unwrap();
    assert_eq!(recovered, metrics);
}

#[test]
fn failed_outcome_is_tagged() {
    let outcome = TheoryOutcome::Failed {
        theory_id: "t-empty".into(),
        kind: FailureKind::InputValidation,
        message: "theory text is empty".into(),
    };
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["outcome"], "failed");
    assert_eq!(value["kind"], "input_validation");
    assert_eq!(outcome.theory_id(), "t-empty");
    assert!(outcome.result().is_none());

    let schema = serde_json::to_value(schema_for!(TheoryOutcome)).unwrap();
    assert!(validate_against_schema(&schema, &value).is_empty());
}

#[test]
fn batch_report_counts_failures() {
    let outcomes = vec![
        TheoryOutcome::Failed {
            theory_id: "a".into(),
            kind: FailureKind::ClassificationAmbiguity,
            message: "no purpose identified".into(),
        },
        TheoryOutcome::Failed {
            theory_id: "b".into(),
            kind: FailureKind::InputValidation,
            message: "empty".into(),
        },
    ];
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let report = BatchReport::at(at, outcomes);

    assert_eq!(report.total, 2);
    assert_eq!(report.completed, 0);
    assert_eq!(report.failed, 2);
    assert_eq!(report.violated, 0);

    let summaries: Vec<AnalysisSummary> = report.outcomes.iter().map(Into::into).collect();
    assert_eq!(
        summaries[0].error.as_deref(),
        Some("classification_ambiguity: no purpose identified")
    );
    assert_eq!(summaries[1].primary_purpose, None);

    let schema = serde_json::to_value(schema_for!(BatchReport)).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert!(validate_against_schema(&schema, &value).is_empty());
}

#[test]
fn vocabulary_helpers_count_unique_terms() {
    let term = |text: &str, tags: &[Purpose]| VocabularyTerm {
        term: text.into(),
        purpose_tags: tags.iter().copied().collect(),
        matched_pattern: "pathway".into(),
        frequency: 1,
    };
    let vocabulary = VocabularyResult {
        terms: BTreeMap::from([
            (
                Purpose::Explanatory,
                vec![term("mechanisms", &[Purpose::Explanatory, Purpose::Causal])],
            ),
            (
                Purpose::Causal,
                vec![
                    term("mechanisms", &[Purpose::Explanatory, Purpose::Causal]),
                    term("pathways", &[Purpose::Causal]),
                ],
            ),
        ]),
        cross_purpose_terms: Vec::new(),
        balance_ratio: 0.5,
        integration_quality: 0.5,
        widening: BTreeMap::new(),
    };

    assert_eq!(vocabulary.term_count(Purpose::Causal), 2);
    assert_eq!(vocabulary.term_count(Purpose::Predictive), 0);
    assert_eq!(vocabulary.unique_term_count(), 2);
    assert_eq!(
        vocabulary.term_set(Purpose::Causal),
        BTreeSet::from(["mechanisms", "pathways"])
    );
    assert!(vocabulary.terms[&Purpose::Causal][0].is_cross_purpose());
}

#[test]
fn blank_theory_is_detected() {
    assert!(Theory::new("t", "  \n\t").is_blank());
    assert!(!Theory::new("t", "a taxonomy").is_blank());
}
