//! Injected catalogs: the pipeline only ever sees the catalog it is given.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use telos_analysis::rebalance::transitions_are_valid;
use telos_analysis::{
    PatternCatalog, PatternDefinition, Pipeline, PurposeDefinition, Rebalancer,
    VocabularyExtractor, VocabularyParams, VocabularyStage,
};
use telos_config::PipelineConfig;
use telos_core::entities::Theory;
use telos_core::enums::{BalanceState, BalanceStatus, Purpose};

const NUMBERED: &[PatternDefinition<'static>] = &[PatternDefinition {
    category: "numbered",
    pattern: r"\bword\d+\b",
}];

const NEVER: &[PatternDefinition<'static>] = &[PatternDefinition {
    category: "never",
    pattern: r"\bqqqzzzq\b",
}];

fn fake_catalog() -> PatternCatalog {
    let definitions: Vec<PurposeDefinition<'static>> = Purpose::ALL
        .into_iter()
        .map(|purpose| PurposeDefinition {
            purpose,
            sophistication: "fixture",
            categories: if purpose == Purpose::Descriptive {
                NUMBERED
            } else {
                NEVER
            },
            widening: &[],
        })
        .collect();
    PatternCatalog::from_definitions(&definitions).unwrap()
}

fn fifty_words() -> String {
    (1..=50)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn zero_against_fifty_terms_triggers_rebalancing() {
    let catalog = fake_catalog();
    let text = fifty_words();
    let stage = VocabularyStage {
        extractor: VocabularyExtractor::new(&catalog),
        text: &text,
    };
    let rebalancer = Rebalancer::from(&PipelineConfig::default());

    let (vocabulary, record) = rebalancer.drive(&stage, VocabularyParams::default()).unwrap();

    assert_eq!(vocabulary.term_count(Purpose::Descriptive), 50);
    assert_eq!(vocabulary.term_count(Purpose::Causal), 0);
    assert!(vocabulary.balance_ratio.abs() < f64::EPSILON);
    assert_eq!(record.transitions[1], BalanceState::Rebalancing);
    // nothing to widen into, so every attempt is spent
    assert_eq!(record.attempts, 3);
    assert_eq!(record.status, BalanceStatus::Violated);
    assert!(transitions_are_valid(&record));
}

#[test]
fn pipeline_uses_the_injected_catalog() {
    let catalog = fake_catalog();
    let pipeline = Pipeline::new(&catalog, PipelineConfig::default()).unwrap();
    let result = pipeline.run(&Theory::new("fixture", fifty_words())).unwrap();

    assert_eq!(result.classification.primary_purpose, Purpose::Descriptive);
    assert!((result.classification.confidence(Purpose::Descriptive) - 1.0).abs() < 1e-12);
    assert_eq!(result.balance_status, BalanceStatus::Violated);
    assert!(
        result
            .schemas
            .schemas
            .values()
            .all(|schema| schema.sophistication == "fixture")
    );
}

#[test]
fn single_requested_purpose_balances_trivially() {
    let catalog = fake_catalog();
    let config = PipelineConfig::default().with_purposes([Purpose::Descriptive]);
    let result = Pipeline::new(&catalog, config)
        .unwrap()
        .run(&Theory::new("fixture", fifty_words()))
        .unwrap();

    assert_eq!(result.balance_status, BalanceStatus::Passed);
    assert_eq!(
        result.vocabulary.terms.keys().copied().collect::<BTreeSet<_>>(),
        BTreeSet::from([Purpose::Descriptive])
    );
    assert!(result.integration.integration_patterns.is_empty());
}
