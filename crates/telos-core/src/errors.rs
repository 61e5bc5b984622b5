//! Cross-cutting error types for Telos.
//!
//! Errors that can originate from the shared data model. Stage-specific
//! errors (`ConfigError`, `AnalysisError`, `SchemaError`) live in their own
//! crates; the binary converges them through `anyhow`.

use thiserror::Error;

/// Errors raised by the core data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A purpose name did not match any of the five purposes.
    #[error("Unknown purpose: '{0}' (expected descriptive, explanatory, predictive, causal, or intervention)")]
    UnknownPurpose(String),
}
