//! Purpose-tagged vocabulary extraction.
//!
//! Unlike classification, extraction keeps overlapping matches: every match
//! of every active category counts toward the term's frequency.

use std::collections::{BTreeMap, BTreeSet};

use telos_core::entities::{CrossPurposeTerm, VocabularyResult, VocabularyTerm};
use telos_core::enums::{BalanceStage, Purpose};

use crate::catalog::{PatternCatalog, PurposePatterns};
use crate::error::AnalysisError;
use crate::rebalance::RebalanceStage;

/// Purposes to extract for and the widening tiers active for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyParams {
    pub purposes: BTreeSet<Purpose>,
    /// Widening tiers per purpose; absent purposes use core categories only.
    pub widening: BTreeMap<Purpose, u8>,
}

impl VocabularyParams {
    #[must_use]
    pub const fn new(purposes: BTreeSet<Purpose>) -> Self {
        Self {
            purposes,
            widening: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn widening_for(&self, purpose: Purpose) -> u8 {
        self.widening.get(&purpose).copied().unwrap_or(0)
    }
}

impl Default for VocabularyParams {
    fn default() -> Self {
        Self::new(Purpose::ALL.into_iter().collect())
    }
}

#[derive(Debug)]
struct TermCount {
    category: String,
    frequency: u32,
}

/// Extracts vocabulary for each requested purpose.
#[derive(Debug, Clone, Copy)]
pub struct VocabularyExtractor<'c> {
    catalog: &'c PatternCatalog,
}

impl<'c> VocabularyExtractor<'c> {
    #[must_use]
    pub const fn new(catalog: &'c PatternCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn extract(&self, text: &str, params: &VocabularyParams) -> VocabularyResult {
        let per_purpose: BTreeMap<Purpose, BTreeMap<String, TermCount>> = params
            .purposes
            .iter()
            .map(|&purpose| {
                let patterns = self.catalog.patterns(purpose);
                (
                    purpose,
                    count_terms(patterns, params.widening_for(purpose), text),
                )
            })
            .collect();

        // term -> every purpose that matched it
        let mut tags: BTreeMap<&str, BTreeSet<Purpose>> = BTreeMap::new();
        for (purpose, counts) in &per_purpose {
            for term in counts.keys() {
                tags.entry(term.as_str()).or_default().insert(*purpose);
            }
        }

        let terms: BTreeMap<Purpose, Vec<VocabularyTerm>> = per_purpose
            .iter()
            .map(|(purpose, counts)| {
                let mut list: Vec<VocabularyTerm> = counts
                    .iter()
                    .map(|(term, count)| VocabularyTerm {
                        term: term.clone(),
                        purpose_tags: tags.get(term.as_str()).cloned().unwrap_or_default(),
                        matched_pattern: count.category.clone(),
                        frequency: count.frequency,
                    })
                    .collect();
                list.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.term.cmp(&b.term)));
                (*purpose, list)
            })
            .collect();

        let cross_purpose_terms: Vec<CrossPurposeTerm> = tags
            .iter()
            .filter(|(_, purposes)| purposes.len() > 1)
            .map(|(term, purposes)| {
                let mut patterns = BTreeMap::new();
                let mut frequency = 0;
                for purpose in purposes {
                    if let Some(count) = per_purpose.get(purpose).and_then(|c| c.get(*term)) {
                        patterns.insert(*purpose, count.category.clone());
                        frequency = frequency.max(count.frequency);
                    }
                }
                CrossPurposeTerm {
                    term: (*term).to_string(),
                    purposes: purposes.clone(),
                    patterns,
                    frequency,
                }
            })
            .collect();

        let balance_ratio = term_balance_ratio(&terms);
        let integration_quality = if tags.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let quality = cross_purpose_terms.len() as f64 / tags.len() as f64;
            quality
        };

        let widening = params
            .purposes
            .iter()
            .map(|&purpose| (purpose, params.widening_for(purpose)))
            .collect();

        tracing::debug!(
            unique_terms = tags.len(),
            cross_purpose = cross_purpose_terms.len(),
            balance_ratio,
            "extracted vocabulary"
        );

        VocabularyResult {
            terms,
            cross_purpose_terms,
            balance_ratio,
            integration_quality,
            widening,
        }
    }
}

/// Vocabulary extraction driven by the rebalancer.
///
/// The balanced quantity is the distinct term count per purpose; adjustment
/// enables one more widening tier for each under-represented purpose, up to
/// the tiers its catalog entry defines.
pub struct VocabularyStage<'a> {
    pub extractor: VocabularyExtractor<'a>,
    pub text: &'a str,
}

impl RebalanceStage for VocabularyStage<'_> {
    type Params = VocabularyParams;
    type Output = VocabularyResult;

    fn stage(&self) -> BalanceStage {
        BalanceStage::Vocabulary
    }

    fn run(&self, params: &VocabularyParams) -> Result<VocabularyResult, AnalysisError> {
        Ok(self.extractor.extract(self.text, params))
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, output: &VocabularyResult) -> BTreeMap<Purpose, f64> {
        output
            .terms
            .iter()
            .map(|(purpose, terms)| (*purpose, terms.len() as f64))
            .collect()
    }

    fn adjust(&self, params: &mut VocabularyParams, under_represented: &[Purpose]) {
        for &purpose in under_represented {
            let available = self.extractor.catalog.patterns(purpose).widening_tiers();
            let tier = params.widening.entry(purpose).or_insert(0);
            *tier = tier.saturating_add(1).min(available);
        }
    }
}

/// Lower-case and collapse internal whitespace.
fn normalize_term(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn count_terms(patterns: &PurposePatterns, widening: u8, text: &str) -> BTreeMap<String, TermCount> {
    let mut counts: BTreeMap<String, TermCount> = BTreeMap::new();
    for category in patterns.active_categories(widening) {
        for found in category.regex.find_iter(text) {
            let term = normalize_term(found.as_str());
            if term.is_empty() {
                continue;
            }
            counts
                .entry(term)
                .or_insert_with(|| TermCount {
                    category: category.name.clone(),
                    frequency: 0,
                })
                .frequency += 1;
        }
    }
    counts
}

#[allow(clippy::cast_precision_loss)]
fn term_balance_ratio(terms: &BTreeMap<Purpose, Vec<VocabularyTerm>>) -> f64 {
    let min = terms.values().map(Vec::len).min().unwrap_or(0);
    let max = terms.values().map(Vec::len).max().unwrap_or(0);
    if max == 0 {
        0.0
    } else {
        min as f64 / max as f64
    }
}
