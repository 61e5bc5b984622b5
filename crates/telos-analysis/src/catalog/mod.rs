//! Pattern catalog: compiled per-purpose regular expressions.
//!
//! Definitions are plain `&str` data ([`PurposeDefinition`]); compiling them
//! into a [`PatternCatalog`] validates that every purpose appears exactly once
//! and that each has at least one core category. The built-in catalog is
//! compiled once per process and shared read-only across threads.

mod definitions;

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use telos_core::enums::Purpose;

use crate::error::AnalysisError;

pub use definitions::STANDARD;

/// One named pattern category, uncompiled.
#[derive(Debug, Clone, Copy)]
pub struct PatternDefinition<'a> {
    pub category: &'a str,
    pub pattern: &'a str,
}

/// Uncompiled catalog entry for one purpose.
#[derive(Debug, Clone, Copy)]
pub struct PurposeDefinition<'a> {
    pub purpose: Purpose,
    /// Descriptor carried into the purpose's capability schema.
    pub sophistication: &'a str,
    /// Core categories, used for classification and extraction.
    pub categories: &'a [PatternDefinition<'a>],
    /// Widening tiers, enabled one at a time by vocabulary rebalancing.
    pub widening: &'a [PatternDefinition<'a>],
}

/// A compiled, case-insensitive pattern category.
#[derive(Debug, Clone)]
pub struct PatternCategory {
    pub name: String,
    pub regex: Regex,
}

impl PatternCategory {
    fn compile(definition: &PatternDefinition<'_>) -> Result<Self, AnalysisError> {
        let regex = RegexBuilder::new(definition.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| AnalysisError::Pattern {
                category: definition.category.to_string(),
                source,
            })?;
        Ok(Self {
            name: definition.category.to_string(),
            regex,
        })
    }
}

/// Compiled patterns for one purpose.
#[derive(Debug, Clone)]
pub struct PurposePatterns {
    pub purpose: Purpose,
    pub sophistication: String,
    pub categories: Vec<PatternCategory>,
    pub widening: Vec<PatternCategory>,
}

impl PurposePatterns {
    /// Core categories followed by the first `widening` tiers.
    pub fn active_categories(&self, widening: u8) -> impl Iterator<Item = &PatternCategory> {
        self.categories
            .iter()
            .chain(self.widening.iter().take(usize::from(widening)))
    }

    /// Number of widening tiers available.
    #[must_use]
    pub fn widening_tiers(&self) -> u8 {
        u8::try_from(self.widening.len()).unwrap_or(u8::MAX)
    }
}

/// Per-purpose compiled patterns, indexed in purpose declaration order.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    purposes: Vec<PurposePatterns>,
}

static STANDARD_CATALOG: OnceLock<PatternCatalog> = OnceLock::new();

impl PatternCatalog {
    /// Compile a catalog from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InputValidation`] when a purpose is missing,
    /// duplicated, or has no core categories, and [`AnalysisError::Pattern`]
    /// when a pattern does not compile.
    pub fn from_definitions(definitions: &[PurposeDefinition<'_>]) -> Result<Self, AnalysisError> {
        let mut slots: Vec<Option<PurposePatterns>> = vec![None; Purpose::ALL.len()];

        for definition in definitions {
            let slot = &mut slots[definition.purpose.index()];
            if slot.is_some() {
                return Err(AnalysisError::InputValidation(format!(
                    "purpose '{}' is defined more than once in the pattern catalog",
                    definition.purpose
                )));
            }
            if definition.categories.is_empty() {
                return Err(AnalysisError::InputValidation(format!(
                    "purpose '{}' has no pattern categories",
                    definition.purpose
                )));
            }

            let categories = definition
                .categories
                .iter()
                .map(PatternCategory::compile)
                .collect::<Result<Vec<_>, _>>()?;
            let widening = definition
                .widening
                .iter()
                .map(PatternCategory::compile)
                .collect::<Result<Vec<_>, _>>()?;

            *slot = Some(PurposePatterns {
                purpose: definition.purpose,
                sophistication: definition.sophistication.to_string(),
                categories,
                widening,
            });
        }

        let purposes = slots
            .into_iter()
            .zip(Purpose::ALL)
            .map(|(slot, purpose)| {
                slot.ok_or_else(|| {
                    AnalysisError::InputValidation(format!(
                        "purpose '{purpose}' is missing from the pattern catalog"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { purposes })
    }

    /// The built-in catalog, compiled on first use.
    ///
    /// # Errors
    ///
    /// Propagates a compilation failure of the built-in definitions.
    pub fn standard() -> Result<&'static Self, AnalysisError> {
        if let Some(catalog) = STANDARD_CATALOG.get() {
            return Ok(catalog);
        }
        let compiled = Self::from_definitions(STANDARD)?;
        Ok(STANDARD_CATALOG.get_or_init(|| compiled))
    }

    #[must_use]
    pub fn patterns(&self, purpose: Purpose) -> &PurposePatterns {
        &self.purposes[purpose.index()]
    }

    /// Iterate purposes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PurposePatterns> {
        self.purposes.iter()
    }
}
