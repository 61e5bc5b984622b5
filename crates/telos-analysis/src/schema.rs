//! Capability schema generation.
//!
//! Each requested purpose gets a schema built from its fixed template, a
//! directed interface to every other requested purpose, and a share of the
//! unified workflows.

use std::collections::{BTreeMap, BTreeSet};

use telos_core::entities::{
    CapabilitySchema, ClassificationResult, InterfaceDescriptor, SchemaSet, UnifiedWorkflow,
    VocabularyResult, WorkflowStep,
};
use telos_core::enums::{BalanceStage, Purpose, PurposeRole, WorkflowMode};

use crate::catalog::PatternCatalog;
use crate::error::AnalysisError;
use crate::rebalance::RebalanceStage;
use crate::template::template;

/// Purposes to build schemas for and their sophistication levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaParams {
    pub purposes: BTreeSet<Purpose>,
    pub levels: BTreeMap<Purpose, u8>,
    pub max_vocabulary_bindings: usize,
}

impl SchemaParams {
    /// Every purpose at the same `level`.
    #[must_use]
    pub fn uniform(purposes: BTreeSet<Purpose>, level: u8, max_vocabulary_bindings: usize) -> Self {
        let levels = purposes.iter().map(|&purpose| (purpose, level)).collect();
        Self {
            purposes,
            levels,
            max_vocabulary_bindings,
        }
    }

    #[must_use]
    pub fn level(&self, purpose: Purpose) -> u8 {
        self.levels.get(&purpose).copied().unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SchemaGenerator<'c> {
    catalog: &'c PatternCatalog,
}

impl<'c> SchemaGenerator<'c> {
    #[must_use]
    pub const fn new(catalog: &'c PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Build one schema per requested purpose plus the unified workflows.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InputValidation`] when no purpose is requested.
    pub fn generate(
        &self,
        classification: &ClassificationResult,
        vocabulary: &VocabularyResult,
        params: &SchemaParams,
    ) -> Result<SchemaSet, AnalysisError> {
        if params.purposes.is_empty() {
            return Err(AnalysisError::InputValidation(
                "schema generation needs at least one purpose".to_string(),
            ));
        }

        let schemas: BTreeMap<Purpose, CapabilitySchema> = params
            .purposes
            .iter()
            .map(|&purpose| {
                (
                    purpose,
                    self.build_schema(purpose, classification, vocabulary, params),
                )
            })
            .collect();

        let workflows = WorkflowMode::ALL
            .into_iter()
            .map(|mode| unified_workflow(mode, &params.purposes, classification.primary_purpose))
            .collect();

        let set = SchemaSet { schemas, workflows };
        tracing::debug!(
            schemas = set.schemas.len(),
            interfaces = set.interface_count(),
            "generated capability schemas"
        );
        Ok(set)
    }

    fn build_schema(
        &self,
        purpose: Purpose,
        classification: &ClassificationResult,
        vocabulary: &VocabularyResult,
        params: &SchemaParams,
    ) -> CapabilitySchema {
        let capabilities = template(purpose);
        let role = if purpose == classification.primary_purpose {
            PurposeRole::Primary
        } else if classification.secondary_purposes.contains(&purpose) {
            PurposeRole::Secondary
        } else {
            PurposeRole::Supporting
        };

        let vocabulary_bindings = vocabulary
            .terms
            .get(&purpose)
            .map(|terms| {
                terms
                    .iter()
                    .take(params.max_vocabulary_bindings)
                    .map(|t| t.term.clone())
                    .collect()
            })
            .unwrap_or_default();

        let own_terms = vocabulary.term_set(purpose);
        let integration_interfaces = params
            .purposes
            .iter()
            .filter(|&&target| target != purpose)
            .map(|&target| {
                let shared_terms = own_terms
                    .intersection(&vocabulary.term_set(target))
                    .map(|term| (*term).to_string())
                    .collect();
                let descriptor = InterfaceDescriptor {
                    source: purpose,
                    target,
                    name: format!("{purpose}_to_{target}"),
                    provides: capabilities.lead_output().to_string(),
                    consumes: template(target).lead_function().to_string(),
                    shared_terms,
                };
                (target, descriptor)
            })
            .collect();

        CapabilitySchema {
            purpose,
            sophistication_level: params.level(purpose),
            sophistication: self.catalog.patterns(purpose).sophistication.clone(),
            role,
            confidence: classification.confidence(purpose),
            core_functions: capabilities.core_functions.iter().map(ToString::to_string).collect(),
            operations: capabilities.all_operations().map(str::to_string).collect(),
            output_formats: capabilities.output_formats.iter().map(ToString::to_string).collect(),
            vocabulary_bindings,
            integration_interfaces,
        }
    }
}

fn unified_workflow(mode: WorkflowMode, purposes: &BTreeSet<Purpose>, primary: Purpose) -> UnifiedWorkflow {
    let participants: Vec<Purpose> = match mode {
        WorkflowMode::Iterative if purposes.contains(&primary) => std::iter::once(primary)
            .chain(purposes.iter().copied().filter(|&p| p != primary))
            .collect(),
        _ => purposes.iter().copied().collect(),
    };

    let steps = participants
        .iter()
        .map(|&purpose| {
            let capabilities = template(purpose);
            WorkflowStep {
                purpose,
                capability: capabilities.lead_function().to_string(),
                output: capabilities.lead_output().to_string(),
            }
        })
        .collect();

    let name = match mode {
        WorkflowMode::Sequential => "sequential_analysis",
        WorkflowMode::Parallel => "parallel_analysis",
        WorkflowMode::Iterative => "iterative_refinement",
    };

    UnifiedWorkflow {
        name: name.to_string(),
        mode,
        participants,
        steps,
    }
}

/// Schema generation driven by the rebalancer.
///
/// The balanced quantity is each schema's sophistication score; adjustment
/// lifts the under-represented purposes to the highest current level.
pub struct SchemaStage<'a> {
    pub generator: SchemaGenerator<'a>,
    pub classification: &'a ClassificationResult,
    pub vocabulary: &'a VocabularyResult,
}

impl RebalanceStage for SchemaStage<'_> {
    type Params = SchemaParams;
    type Output = SchemaSet;

    fn stage(&self) -> BalanceStage {
        BalanceStage::Schema
    }

    fn run(&self, params: &SchemaParams) -> Result<SchemaSet, AnalysisError> {
        self.generator
            .generate(self.classification, self.vocabulary, params)
    }

    fn measure(&self, output: &SchemaSet) -> BTreeMap<Purpose, f64> {
        output
            .schemas
            .iter()
            .map(|(purpose, schema)| (*purpose, schema.sophistication_score()))
            .collect()
    }

    fn adjust(&self, params: &mut SchemaParams, under_represented: &[Purpose]) {
        let highest = params.levels.values().copied().max().unwrap_or(1);
        for purpose in under_represented {
            params.levels.insert(*purpose, highest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierParams, PurposeClassifier};
    use crate::vocabulary::{VocabularyExtractor, VocabularyParams};
    use pretty_assertions::assert_eq;

    const TEXT: &str = "A taxonomy of movements explains why mechanisms matter, \
        predicts trends, and identifies causal effects for policy design.";

    fn inputs() -> (&'static PatternCatalog, ClassificationResult, VocabularyResult) {
        let catalog = PatternCatalog::standard().unwrap();
        let classification = PurposeClassifier::new(catalog, ClassifierParams::default())
            .classify(TEXT)
            .unwrap();
        let vocabulary =
            VocabularyExtractor::new(catalog).extract(TEXT, &VocabularyParams::default());
        (catalog, classification, vocabulary)
    }

    #[test]
    fn three_purposes_give_six_interfaces() {
        let (catalog, classification, vocabulary) = inputs();
        let purposes = BTreeSet::from([Purpose::Descriptive, Purpose::Causal, Purpose::Intervention]);
        let params = SchemaParams::uniform(purposes, 8, 10);
        let set = SchemaGenerator::new(catalog)
            .generate(&classification, &vocabulary, &params)
            .unwrap();

        assert_eq!(set.schemas.len(), 3);
        assert_eq!(set.interface_count(), 6);
        for schema in set.schemas.values() {
            assert_eq!(schema.core_functions.len(), 5);
            assert_eq!(schema.operations.len(), 5);
            assert_eq!(schema.output_formats.len(), 3);
            assert_eq!(schema.sophistication_level, 8);
            assert!(!schema.integration_interfaces.contains_key(&schema.purpose));
        }
        let interface = &set.schemas[&Purpose::Causal].integration_interfaces[&Purpose::Intervention];
        assert_eq!(interface.name, "causal_to_intervention");
        assert_eq!(interface.provides, "causal_graph");
        assert_eq!(interface.consumes, "leverage_point_identification");
    }

    #[test]
    fn roles_follow_classification() {
        let (catalog, classification, vocabulary) = inputs();
        let params = SchemaParams::uniform(Purpose::ALL.into_iter().collect(), 8, 10);
        let set = SchemaGenerator::new(catalog)
            .generate(&classification, &vocabulary, &params)
            .unwrap();
        let primary = classification.primary_purpose;
        assert_eq!(set.schemas[&primary].role, PurposeRole::Primary);
        for purpose in &classification.secondary_purposes {
            assert_eq!(set.schemas[purpose].role, PurposeRole::Secondary);
        }
    }

    #[test]
    fn iterative_workflow_starts_at_primary() {
        let (catalog, classification, vocabulary) = inputs();
        let params = SchemaParams::uniform(Purpose::ALL.into_iter().collect(), 8, 10);
        let set = SchemaGenerator::new(catalog)
            .generate(&classification, &vocabulary, &params)
            .unwrap();
        let modes: Vec<WorkflowMode> = set.workflows.iter().map(|w| w.mode).collect();
        assert_eq!(modes, WorkflowMode::ALL.to_vec());
        let iterative = &set.workflows[2];
        assert_eq!(iterative.participants[0], classification.primary_purpose);
        assert_eq!(iterative.participants.len(), 5);
        assert_eq!(iterative.steps.len(), 5);
        assert_eq!(set.workflows[0].participants, Purpose::ALL.to_vec());
    }

    #[test]
    fn bindings_are_capped() {
        let (catalog, classification, vocabulary) = inputs();
        let params = SchemaParams::uniform(Purpose::ALL.into_iter().collect(), 8, 1);
        let set = SchemaGenerator::new(catalog)
            .generate(&classification, &vocabulary, &params)
            .unwrap();
        assert!(set.schemas.values().all(|s| s.vocabulary_bindings.len() <= 1));
    }

    #[test]
    fn empty_purpose_set_is_rejected() {
        let (catalog, classification, vocabulary) = inputs();
        let params = SchemaParams::uniform(BTreeSet::new(), 8, 10);
        let err = SchemaGenerator::new(catalog)
            .generate(&classification, &vocabulary, &params)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InputValidation(_)));
    }

    #[test]
    fn adjustment_lifts_low_levels() {
        let (catalog, classification, vocabulary) = inputs();
        let stage = SchemaStage {
            generator: SchemaGenerator::new(catalog),
            classification: &classification,
            vocabulary: &vocabulary,
        };
        let mut params = SchemaParams::uniform(Purpose::ALL.into_iter().collect(), 8, 10);
        params.levels.insert(Purpose::Predictive, 2);
        let before = stage.measure(&stage.run(&params).unwrap());
        assert!((before[&Purpose::Predictive] - 26.0).abs() < f64::EPSILON);

        stage.adjust(&mut params, &[Purpose::Predictive]);
        let after = stage.measure(&stage.run(&params).unwrap());
        assert!(after.values().all(|score| (score - 104.0).abs() < f64::EPSILON));
    }
}
