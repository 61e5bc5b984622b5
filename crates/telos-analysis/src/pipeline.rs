//! Pipeline orchestration: classify, extract, generate, integrate.
//!
//! Vocabulary extraction and schema generation each run under the
//! [`Rebalancer`]; their balance records are collected in pipeline order and
//! combined into the final status. Batches run on the current rayon pool and
//! isolate failures per theory.

use rayon::prelude::*;
use telos_config::PipelineConfig;
use telos_core::entities::{PipelineResult, Theory};
use telos_core::enums::BalanceStatus;
use telos_core::responses::TheoryOutcome;

use crate::catalog::PatternCatalog;
use crate::classifier::{ClassifierParams, PurposeClassifier};
use crate::error::AnalysisError;
use crate::integrator::CrossPurposeIntegrator;
use crate::rebalance::Rebalancer;
use crate::schema::{SchemaGenerator, SchemaParams, SchemaStage};
use crate::vocabulary::{VocabularyExtractor, VocabularyParams, VocabularyStage};

/// A configured analysis pipeline bound to a pattern catalog.
#[derive(Debug, Clone)]
pub struct Pipeline<'c> {
    catalog: &'c PatternCatalog,
    config: PipelineConfig,
}

impl Pipeline<'static> {
    /// Pipeline over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] for an invalid config.
    pub fn standard(config: PipelineConfig) -> Result<Self, AnalysisError> {
        Self::new(PatternCatalog::standard()?, config)
    }
}

impl<'c> Pipeline<'c> {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] when `config` fails validation.
    pub fn new(catalog: &'c PatternCatalog, config: PipelineConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &'c PatternCatalog {
        self.catalog
    }

    /// Analyse one theory.
    ///
    /// A violated balance is reported in the result, not as an error; see
    /// [`EnsureBalanced`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InputValidation`] for blank text and
    /// [`AnalysisError::ClassificationAmbiguity`] when no purpose is evident.
    pub fn run(&self, theory: &Theory) -> Result<PipelineResult, AnalysisError> {
        if theory.is_blank() {
            return Err(AnalysisError::InputValidation(format!(
                "theory '{}' has no text",
                theory.id
            )));
        }
        tracing::debug!(theory = %theory.id, chars = theory.text.len(), "analysing theory");

        let rebalancer = Rebalancer::from(&self.config);
        let purposes = self.config.requested_purposes.clone();

        let classification = PurposeClassifier::new(self.catalog, ClassifierParams::from(&self.config))
            .classify(&theory.text)?;

        let vocabulary_stage = VocabularyStage {
            extractor: VocabularyExtractor::new(self.catalog),
            text: &theory.text,
        };
        let (vocabulary, vocabulary_balance) =
            rebalancer.drive(&vocabulary_stage, VocabularyParams::new(purposes.clone()))?;

        let schema_stage = SchemaStage {
            generator: SchemaGenerator::new(self.catalog),
            classification: &classification,
            vocabulary: &vocabulary,
        };
        let schema_params = SchemaParams::uniform(
            purposes,
            self.config.sophistication_level,
            self.config.max_vocabulary_bindings,
        );
        let (schemas, schema_balance) = rebalancer.drive(&schema_stage, schema_params)?;

        let integration = CrossPurposeIntegrator::new(self.config.high_integration_threshold)
            .integrate(&schemas, &vocabulary);

        let balance_status = vocabulary_balance.status.and(schema_balance.status);
        let rebalance_attempts = vocabulary_balance.attempts + schema_balance.attempts;

        match balance_status {
            BalanceStatus::Passed => tracing::info!(
                theory = %theory.id,
                primary = %classification.primary_purpose,
                rebalance_attempts,
                "analysis complete"
            ),
            BalanceStatus::Violated => tracing::warn!(
                theory = %theory.id,
                primary = %classification.primary_purpose,
                rebalance_attempts,
                "analysis complete with violated balance"
            ),
        }

        Ok(PipelineResult {
            theory_id: theory.id.clone(),
            classification,
            vocabulary,
            schemas,
            integration,
            stage_balance: vec![vocabulary_balance, schema_balance],
            balance_status,
            rebalance_attempts,
        })
    }

    /// Analyse every theory, in parallel, preserving input order.
    #[must_use]
    pub fn run_batch(&self, theories: &[Theory]) -> Vec<TheoryOutcome> {
        self.run_batch_with(theories, |_| {})
    }

    /// Like [`Self::run_batch`], calling `on_complete` as each theory finishes.
    ///
    /// Completion order is not input order; the returned outcomes are.
    pub fn run_batch_with<F>(&self, theories: &[Theory], on_complete: F) -> Vec<TheoryOutcome>
    where
        F: Fn(&TheoryOutcome) + Sync,
    {
        theories
            .par_iter()
            .map(|theory| {
                let outcome = outcome_for(theory, self.run(theory));
                on_complete(&outcome);
                outcome
            })
            .collect()
    }
}

/// Wrap a single analysis into a batch outcome.
#[must_use]
pub fn outcome_for(theory: &Theory, result: Result<PipelineResult, AnalysisError>) -> TheoryOutcome {
    match result {
        Ok(result) => TheoryOutcome::Completed {
            result: Box::new(result),
        },
        Err(error) => {
            tracing::warn!(theory = %theory.id, %error, "theory analysis failed");
            TheoryOutcome::Failed {
                theory_id: theory.id.clone(),
                kind: error.kind(),
                message: error.to_string(),
            }
        }
    }
}

/// Turn a violated balance into an error for callers that want it strict.
pub trait EnsureBalanced {
    /// # Errors
    ///
    /// Returns [`AnalysisError::BalanceViolation`] naming the first violated
    /// stage.
    fn ensure_balanced(&self) -> Result<(), AnalysisError>;
}

impl EnsureBalanced for PipelineResult {
    fn ensure_balanced(&self) -> Result<(), AnalysisError> {
        match self
            .stage_balance
            .iter()
            .find(|record| record.status == BalanceStatus::Violated)
        {
            Some(record) => Err(AnalysisError::BalanceViolation {
                theory_id: self.theory_id.clone(),
                stage: record.stage,
                attempts: record.attempts,
            }),
            None => Ok(()),
        }
    }
}
