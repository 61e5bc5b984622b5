//! Purpose, role, balance-state, and workflow enums for Telos.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! [`BalanceState`] carries the rebalancing state machine and provides
//! `allowed_next_states()` so transitions can be checked at the analysis layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Purpose
// ---------------------------------------------------------------------------

/// One of the five analytical purposes a theory may serve.
///
/// Declaration order is significant: it is the tie-break order for primary
/// purpose selection and the iteration order of every purpose-keyed map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Descriptive,
    Explanatory,
    Predictive,
    Causal,
    Intervention,
}

impl Purpose {
    /// All purposes in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Descriptive,
        Self::Explanatory,
        Self::Predictive,
        Self::Causal,
        Self::Intervention,
    ];

    /// Position in declaration order (`0..5`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descriptive => "descriptive",
            Self::Explanatory => "explanatory",
            Self::Predictive => "predictive",
            Self::Causal => "causal",
            Self::Intervention => "intervention",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|purpose| purpose.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownPurpose(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PurposeRole
// ---------------------------------------------------------------------------

/// Role a purpose plays for a classified theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PurposeRole {
    Primary,
    Secondary,
    Supporting,
}

impl PurposeRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Supporting => "supporting",
        }
    }
}

impl fmt::Display for PurposeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BalanceState
// ---------------------------------------------------------------------------

/// State of the balance validator for a single pipeline stage.
///
/// ```text
/// checking → passed
///          → rebalancing → checking
///          → violated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BalanceState {
    Checking,
    Rebalancing,
    Passed,
    Violated,
}

impl BalanceState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Checking => &[Self::Passed, Self::Rebalancing, Self::Violated],
            Self::Rebalancing => &[Self::Checking],
            Self::Passed | Self::Violated => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Passed | Self::Violated)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Rebalancing => "rebalancing",
            Self::Passed => "passed",
            Self::Violated => "violated",
        }
    }
}

impl fmt::Display for BalanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BalanceStatus
// ---------------------------------------------------------------------------

/// Reported outcome of balance validation. Never anything but these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Passed,
    Violated,
}

impl BalanceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Violated => "violated",
        }
    }

    /// Combine two stage statuses: any violation wins.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Passed, Self::Passed) => Self::Passed,
            _ => Self::Violated,
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BalanceStage
// ---------------------------------------------------------------------------

/// Pipeline stage whose output the balance validator measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStage {
    Classification,
    Vocabulary,
    Schema,
}

impl BalanceStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Vocabulary => "vocabulary",
            Self::Schema => "schema",
        }
    }
}

impl fmt::Display for BalanceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WorkflowMode
// ---------------------------------------------------------------------------

/// How the purposes of a unified workflow are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowMode {
    Sequential,
    Parallel,
    Iterative,
}

impl WorkflowMode {
    pub const ALL: [Self; 3] = [Self::Sequential, Self::Parallel, Self::Iterative];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
            Self::Iterative => "iterative",
        }
    }
}

impl fmt::Display for WorkflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// InsightKind
// ---------------------------------------------------------------------------

/// What a unified insight was synthesized from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Term,
    Capability,
}

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// Category of a per-theory failure inside a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InputValidation,
    ClassificationAmbiguity,
    BalanceViolation,
    Configuration,
    Pattern,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidation => "input_validation",
            Self::ClassificationAmbiguity => "classification_ambiguity",
            Self::BalanceViolation => "balance_violation",
            Self::Configuration => "configuration",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
