//! Batch response types returned as JSON by `telos` commands.
//!
//! These structs define the shape of JSON output for `telos analyze` when it
//! processes more than one theory, and the one-row summaries used by table
//! output.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::PipelineResult;
use crate::enums::{BalanceStatus, FailureKind, Purpose};

/// Outcome of analysing a single theory inside a batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TheoryOutcome {
    Completed {
        result: Box<PipelineResult>,
    },
    Failed {
        theory_id: String,
        kind: FailureKind,
        message: String,
    },
}

impl TheoryOutcome {
    #[must_use]
    pub fn theory_id(&self) -> &str {
        match self {
            Self::Completed { result } => &result.theory_id,
            Self::Failed { theory_id, .. } => theory_id,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&PipelineResult> {
        match self {
            Self::Completed { result } => Some(result),
            Self::Failed { .. } => None,
        }
    }
}

/// Response from `telos analyze` over several theories.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub total: u32,
    pub completed: u32,
    pub failed: u32,
    /// Completed analyses whose balance status is `violated`.
    pub violated: u32,
    pub outcomes: Vec<TheoryOutcome>,
}

impl BatchReport {
    /// Build a report stamped with the current time.
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<TheoryOutcome>) -> Self {
        Self::at(Utc::now(), outcomes)
    }

    /// Build a report with an explicit timestamp.
    #[must_use]
    pub fn at(generated_at: DateTime<Utc>, outcomes: Vec<TheoryOutcome>) -> Self {
        let mut completed = 0u32;
        let mut failed = 0u32;
        let mut violated = 0u32;
        for outcome in &outcomes {
            match outcome {
                TheoryOutcome::Completed { result } => {
                    completed += 1;
                    if !result.is_balanced() {
                        violated += 1;
                    }
                }
                TheoryOutcome::Failed { .. } => failed += 1,
            }
        }

        Self {
            generated_at,
            total: completed + failed,
            completed,
            failed,
            violated,
            outcomes,
        }
    }
}

/// One table row summarising a theory analysis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalysisSummary {
    pub theory_id: String,
    pub primary_purpose: Option<Purpose>,
    pub secondary_purposes: BTreeSet<Purpose>,
    pub overemphasis_detected: bool,
    pub balance_status: Option<BalanceStatus>,
    pub rebalance_attempts: u32,
    pub error: Option<String>,
}

impl From<&TheoryOutcome> for AnalysisSummary {
    fn from(outcome: &TheoryOutcome) -> Self {
        match outcome {
            TheoryOutcome::Completed { result } => Self {
                theory_id: result.theory_id.clone(),
                primary_purpose: Some(result.classification.primary_purpose),
                secondary_purposes: result.classification.secondary_purposes.clone(),
                overemphasis_detected: result.classification.balance.overemphasis_detected,
                balance_status: Some(result.balance_status),
                rebalance_attempts: result.rebalance_attempts,
                error: None,
            },
            TheoryOutcome::Failed {
                theory_id,
                kind,
                message,
            } => Self {
                theory_id: theory_id.clone(),
                primary_purpose: None,
                secondary_purposes: BTreeSet::new(),
                overemphasis_detected: false,
                balance_status: None,
                rebalance_attempts: 0,
                error: Some(format!("{kind}: {message}")),
            },
        }
    }
}
