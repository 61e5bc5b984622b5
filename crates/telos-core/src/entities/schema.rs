use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Purpose, PurposeRole, WorkflowMode};

/// Directed integration interface from one purpose's schema to another's.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    pub source: Purpose,
    pub target: Purpose,
    /// `"{source}_to_{target}"`.
    pub name: String,
    /// Output format of the source handed across the interface.
    pub provides: String,
    /// Core function of the target that consumes it.
    pub consumes: String,
    /// Vocabulary terms both purposes matched.
    pub shared_terms: Vec<String>,
}

/// Capability schema for one purpose.
///
/// Every schema carries the same number of core functions, operations, and
/// output formats; the counts come from the template, not from the text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CapabilitySchema {
    pub purpose: Purpose,
    pub sophistication_level: u8,
    pub sophistication: String,
    pub role: PurposeRole,
    pub confidence: f64,
    pub core_functions: Vec<String>,
    pub operations: BTreeSet<String>,
    pub output_formats: BTreeSet<String>,
    pub vocabulary_bindings: Vec<String>,
    pub integration_interfaces: BTreeMap<Purpose, InterfaceDescriptor>,
}

impl CapabilitySchema {
    /// Number of capabilities the schema exposes (functions + operations + outputs).
    #[must_use]
    pub fn capability_count(&self) -> usize {
        self.core_functions.len() + self.operations.len() + self.output_formats.len()
    }

    /// Sophistication score used by the balance validator.
    #[must_use]
    pub fn sophistication_score(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let capabilities = self.capability_count() as f64;
        f64::from(self.sophistication_level) * capabilities
    }
}

/// One purpose's contribution to a unified workflow.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WorkflowStep {
    pub purpose: Purpose,
    pub capability: String,
    pub output: String,
}

/// A workflow spanning every requested purpose.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UnifiedWorkflow {
    pub name: String,
    pub mode: WorkflowMode,
    /// Participating purposes in execution order.
    pub participants: Vec<Purpose>,
    pub steps: Vec<WorkflowStep>,
}

/// Output of schema generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SchemaSet {
    pub schemas: BTreeMap<Purpose, CapabilitySchema>,
    pub workflows: Vec<UnifiedWorkflow>,
}

impl SchemaSet {
    /// Total number of directed integration interfaces across all schemas.
    #[must_use]
    pub fn interface_count(&self) -> usize {
        self.schemas
            .values()
            .map(|schema| schema.integration_interfaces.len())
            .sum()
    }
}
