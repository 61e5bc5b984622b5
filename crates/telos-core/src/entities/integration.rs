use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{InsightKind, Purpose};

/// Integration quality for one unordered purpose pair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct IntegrationPattern {
    pub first: Purpose,
    pub second: Purpose,
    /// Jaccard overlap of the two purposes' term sets.
    pub vocabulary_overlap: f64,
    /// Fraction of the two directed interfaces that are present.
    pub interface_presence: f64,
    pub quality: f64,
    pub shared_terms: Vec<String>,
}

/// A term or capability shared by enough purposes to count as high-integration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UnifiedInsight {
    pub kind: InsightKind,
    pub name: String,
    pub purposes: BTreeSet<Purpose>,
}

/// Whether every participant of a workflow can contribute its step.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkflowCompleteness {
    pub workflow: String,
    pub complete: bool,
    /// Participants lacking the schema, capability, or output their step needs.
    pub missing: Vec<Purpose>,
}

/// Output of cross-purpose integration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct IntegrationResult {
    pub integration_patterns: Vec<IntegrationPattern>,
    pub unified_insights: Vec<UnifiedInsight>,
    pub workflow_completeness: Vec<WorkflowCompleteness>,
    /// Vocabulary cross-purpose quality carried over from extraction.
    pub cross_purpose_quality: f64,
    /// Mean of the pair qualities (`0.0` with fewer than two purposes).
    pub mean_pair_quality: f64,
}
