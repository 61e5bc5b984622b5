//! Entity structs for every stage of the analysis pipeline.
//!
//! All purpose-keyed collections are `BTreeMap`/`BTreeSet` so serialization
//! order follows [`Purpose`](crate::enums::Purpose) declaration order and
//! repeated runs produce byte-identical JSON. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod balance;
mod classification;
mod integration;
mod pipeline;
mod schema;
mod theory;
mod vocabulary;

pub use balance::{BalanceMetrics, StageBalance};
pub use classification::{ClassificationResult, PurposeScore};
pub use integration::{
    IntegrationPattern, IntegrationResult, UnifiedInsight, WorkflowCompleteness,
};
pub use pipeline::PipelineResult;
pub use schema::{
    CapabilitySchema, InterfaceDescriptor, SchemaSet, UnifiedWorkflow, WorkflowStep,
};
pub use theory::Theory;
pub use vocabulary::{CrossPurposeTerm, VocabularyResult, VocabularyTerm};
