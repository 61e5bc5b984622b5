//! Analysis pipeline configuration.
//!
//! Every numeric threshold here is a default, not a derived constant; callers
//! may override any of them through TOML or `TELOS_PIPELINE__*` variables.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use telos_core::enums::Purpose;

use crate::ConfigError;

/// Upper bound accepted for `max_rebalance_attempts`.
pub const MAX_REBALANCE_ATTEMPTS_CAP: u32 = 32;

fn default_requested_purposes() -> BTreeSet<Purpose> {
    Purpose::ALL.into_iter().collect()
}

const fn default_sophistication_level() -> u8 {
    8
}

const fn default_secondary_threshold() -> f64 {
    0.25
}

const fn default_balance_ratio_threshold() -> f64 {
    0.7
}

const fn default_overemphasis_ratio_threshold() -> f64 {
    2.0
}

const fn default_max_rebalance_attempts() -> u32 {
    3
}

const fn default_ambiguity_floor() -> f64 {
    0.05
}

const fn default_high_integration_threshold() -> usize {
    3
}

const fn default_max_vocabulary_bindings() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct PipelineConfig {
    /// Purposes to build schemas for and to balance across.
    #[serde(default = "default_requested_purposes")]
    pub requested_purposes: BTreeSet<Purpose>,

    /// Capability depth assigned identically to every schema.
    #[serde(default = "default_sophistication_level")]
    pub sophistication_level: u8,

    /// Minimum confidence for a non-primary purpose to count as secondary.
    #[serde(default = "default_secondary_threshold")]
    pub secondary_threshold: f64,

    /// Minimum `min / max` ratio for a stage to pass balance validation.
    #[serde(default = "default_balance_ratio_threshold")]
    pub balance_ratio_threshold: f64,

    /// Maximum `max / mean(others)` ratio before overemphasis is flagged.
    #[serde(default = "default_overemphasis_ratio_threshold")]
    pub overemphasis_ratio_threshold: f64,

    /// Rebalancing attempts per stage before the balance is reported violated.
    #[serde(default = "default_max_rebalance_attempts")]
    pub max_rebalance_attempts: u32,

    /// Classification fails as ambiguous when every confidence is below this.
    #[serde(default = "default_ambiguity_floor")]
    pub ambiguity_floor: f64,

    /// Purposes a term or capability must span to become a unified insight.
    #[serde(default = "default_high_integration_threshold")]
    pub high_integration_threshold: usize,

    /// Vocabulary terms bound into each capability schema.
    #[serde(default = "default_max_vocabulary_bindings")]
    pub max_vocabulary_bindings: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            requested_purposes: default_requested_purposes(),
            sophistication_level: default_sophistication_level(),
            secondary_threshold: default_secondary_threshold(),
            balance_ratio_threshold: default_balance_ratio_threshold(),
            overemphasis_ratio_threshold: default_overemphasis_ratio_threshold(),
            max_rebalance_attempts: default_max_rebalance_attempts(),
            ambiguity_floor: default_ambiguity_floor(),
            high_integration_threshold: default_high_integration_threshold(),
            max_vocabulary_bindings: default_max_vocabulary_bindings(),
        }
    }
}

impl PipelineConfig {
    /// Replace the requested purposes.
    #[must_use]
    pub fn with_purposes(mut self, purposes: impl IntoIterator<Item = Purpose>) -> Self {
        self.requested_purposes = purposes.into_iter().collect();
        self
    }

    /// Check that every field is usable by the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.requested_purposes.is_empty() {
            return Err(ConfigError::invalid(
                "pipeline.requested_purposes",
                "at least one purpose must be requested",
            ));
        }
        if self.sophistication_level == 0 {
            return Err(ConfigError::invalid(
                "pipeline.sophistication_level",
                "must be at least 1",
            ));
        }
        check_unit_interval("pipeline.secondary_threshold", self.secondary_threshold)?;
        check_unit_interval(
            "pipeline.balance_ratio_threshold",
            self.balance_ratio_threshold,
        )?;
        check_unit_interval("pipeline.ambiguity_floor", self.ambiguity_floor)?;
        if self.ambiguity_floor <= 0.0 {
            return Err(ConfigError::invalid(
                "pipeline.ambiguity_floor",
                "must be positive so text without evidence stays ambiguous",
            ));
        }
        if !self.overemphasis_ratio_threshold.is_finite() || self.overemphasis_ratio_threshold < 1.0
        {
            return Err(ConfigError::invalid(
                "pipeline.overemphasis_ratio_threshold",
                format!(
                    "must be a finite ratio >= 1.0, got {}",
                    self.overemphasis_ratio_threshold
                ),
            ));
        }
        if self.max_rebalance_attempts > MAX_REBALANCE_ATTEMPTS_CAP {
            return Err(ConfigError::invalid(
                "pipeline.max_rebalance_attempts",
                format!(
                    "must not exceed {MAX_REBALANCE_ATTEMPTS_CAP}, got {}",
                    self.max_rebalance_attempts
                ),
            ));
        }
        if self.high_integration_threshold < 2 {
            return Err(ConfigError::invalid(
                "pipeline.high_integration_threshold",
                "a shared insight needs at least 2 purposes",
            ));
        }
        Ok(())
    }
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be within [0, 1], got {value}"),
        ))
    }
}
