//! # telos-analysis
//!
//! Balanced multi-purpose analysis of theory descriptions.
//!
//! The pipeline runs, in order:
//! - [`PurposeClassifier`]: pattern evidence → per-purpose confidence,
//!   primary and secondary purposes
//! - [`VocabularyExtractor`]: purpose-tagged terms and cross-purpose overlaps
//! - [`SchemaGenerator`]: one capability schema per requested purpose, the
//!   directed interfaces between them, and unified workflows
//! - [`CrossPurposeIntegrator`]: pair quality, unified insights, workflow
//!   completeness
//!
//! Vocabulary and schema generation are each driven by the [`Rebalancer`], a
//! bounded state machine that re-runs the stage with adjusted parameters
//! until the per-purpose quantity balances or attempts run out.
//!
//! Everything here is synchronous and deterministic; the only shared state is
//! the read-only [`PatternCatalog`].

pub mod balance;
pub mod catalog;
pub mod classifier;
pub mod error;
pub mod integrator;
pub mod pipeline;
pub mod rebalance;
pub mod schema;
pub mod template;
pub mod vocabulary;

pub use balance::{BalanceThresholds, measure};
pub use catalog::{PatternCatalog, PatternDefinition, PurposeDefinition};
pub use classifier::{ClassifierParams, PurposeClassifier};
pub use error::AnalysisError;
pub use integrator::CrossPurposeIntegrator;
pub use pipeline::{EnsureBalanced, Pipeline, outcome_for};
pub use rebalance::{RebalanceStage, Rebalancer};
pub use schema::{SchemaGenerator, SchemaParams, SchemaStage};
pub use vocabulary::{VocabularyExtractor, VocabularyParams, VocabularyStage};
