//! Central schema registry for Telos records.
//!
//! The `SchemaRegistry` builds JSON Schemas from `telos-core` and
//! `telos-config` types at construction time using [`schemars::schema_for!`]
//! and validates values with `jsonschema`.

use std::collections::BTreeMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Named JSON Schemas for every record the CLI emits.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty))?);
    };
}

impl SchemaRegistry {
    /// Build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Generation`] if a generated schema cannot be
    /// converted to JSON.
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = BTreeMap::new();

        // --- Stage outputs (5) ---
        register!(
            schemas,
            "classification_result",
            telos_core::entities::ClassificationResult
        );
        register!(
            schemas,
            "vocabulary_result",
            telos_core::entities::VocabularyResult
        );
        register!(schemas, "schema_set", telos_core::entities::SchemaSet);
        register!(
            schemas,
            "integration_result",
            telos_core::entities::IntegrationResult
        );
        register!(
            schemas,
            "pipeline_result",
            telos_core::entities::PipelineResult
        );

        // --- Batch responses (2) ---
        register!(
            schemas,
            "theory_outcome",
            telos_core::responses::TheoryOutcome
        );
        register!(schemas, "batch_report", telos_core::responses::BatchReport);

        // --- Configuration (1) ---
        register!(schemas, "pipeline_config", telos_config::PipelineConfig);

        Ok(Self { schemas })
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Serialize `record` and validate it against the named schema.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate`], plus [`SchemaError::Generation`] when the
    /// record does not serialize.
    pub fn validate_record<T: serde::Serialize>(
        &self,
        name: &str,
        record: &T,
    ) -> Result<(), SchemaError> {
        let value = serde_json::to_value(record)?;
        self.validate(name, &value)
    }

    /// All registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        self.schemas.keys().copied().collect()
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
