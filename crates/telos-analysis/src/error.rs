//! Analysis error types for telos-analysis.

use telos_config::ConfigError;
use telos_core::enums::{BalanceStage, FailureKind};

/// Errors from the analysis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Empty text, empty purpose set, or a malformed catalog definition.
    #[error("input validation failed: {0}")]
    InputValidation(String),

    /// No purpose reached the minimal confidence floor.
    #[error(
        "classification ambiguous: highest confidence {max_confidence:.3} is below the floor {floor:.3}"
    )]
    ClassificationAmbiguity { max_confidence: f64, floor: f64 },

    /// Rebalancing exhausted its attempts without reaching a passing balance.
    #[error("balance violated for theory '{theory_id}' at the {stage} stage after {attempts} rebalancing attempts")]
    BalanceViolation {
        theory_id: String,
        stage: BalanceStage,
        attempts: u32,
    },

    /// Pipeline configuration failed validation.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A catalog pattern failed to compile.
    #[error("pattern error in category '{category}': {source}")]
    Pattern {
        category: String,
        #[source]
        source: regex::Error,
    },
}

impl AnalysisError {
    /// Failure category recorded in batch outcomes.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InputValidation(_) => FailureKind::InputValidation,
            Self::ClassificationAmbiguity { .. } => FailureKind::ClassificationAmbiguity,
            Self::BalanceViolation { .. } => FailureKind::BalanceViolation,
            Self::Configuration(_) => FailureKind::Configuration,
            Self::Pattern { .. } => FailureKind::Pattern,
        }
    }
}
