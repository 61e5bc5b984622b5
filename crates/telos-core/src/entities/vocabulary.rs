use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Purpose;

/// A term matched by one purpose's pattern set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VocabularyTerm {
    /// Lower-cased matched text with whitespace collapsed.
    pub term: String,
    /// Every purpose whose patterns matched this term.
    pub purpose_tags: BTreeSet<Purpose>,
    /// First category (of the owning purpose) that matched the term.
    pub matched_pattern: String,
    pub frequency: u32,
}

impl VocabularyTerm {
    #[must_use]
    pub fn is_cross_purpose(&self) -> bool {
        self.purpose_tags.len() > 1
    }
}

/// A term matched by the pattern sets of two or more purposes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CrossPurposeTerm {
    pub term: String,
    pub purposes: BTreeSet<Purpose>,
    /// Matching category per purpose.
    pub patterns: BTreeMap<Purpose, String>,
    /// Highest per-purpose frequency.
    pub frequency: u32,
}

/// Output of vocabulary extraction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VocabularyResult {
    /// Terms per purpose, ordered by frequency (descending) then term.
    pub terms: BTreeMap<Purpose, Vec<VocabularyTerm>>,
    pub cross_purpose_terms: Vec<CrossPurposeTerm>,
    /// `min(|terms|) / max(|terms|)` over the extracted purposes.
    pub balance_ratio: f64,
    /// Cross-purpose terms divided by total unique terms.
    pub integration_quality: f64,
    /// Widening tiers active per purpose when this result was extracted.
    pub widening: BTreeMap<Purpose, u8>,
}

impl VocabularyResult {
    /// Number of distinct terms for `purpose`.
    #[must_use]
    pub fn term_count(&self, purpose: Purpose) -> usize {
        self.terms.get(&purpose).map_or(0, Vec::len)
    }

    /// Distinct term strings for `purpose`.
    #[must_use]
    pub fn term_set(&self, purpose: Purpose) -> BTreeSet<&str> {
        self.terms
            .get(&purpose)
            .map(|terms| terms.iter().map(|t| t.term.as_str()).collect())
            .unwrap_or_default()
    }

    /// Total number of unique term strings across all purposes.
    #[must_use]
    pub fn unique_term_count(&self) -> usize {
        self.terms
            .values()
            .flatten()
            .map(|t| t.term.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}
