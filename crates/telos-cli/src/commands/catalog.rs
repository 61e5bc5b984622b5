use anyhow::Context;
use serde::Serialize;
use telos_analysis::PatternCatalog;
use telos_core::enums::Purpose;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub purpose: Purpose,
    pub sophistication: String,
    pub categories: Vec<String>,
    /// Widening tiers in the order rebalancing enables them.
    pub widening: Vec<String>,
}

/// Handle `telos catalog`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = PatternCatalog::standard().context("failed to compile the pattern catalog")?;
    output(&entries(catalog), flags.format)
}

pub fn entries(catalog: &PatternCatalog) -> Vec<CatalogEntry> {
    catalog
        .iter()
        .map(|patterns| CatalogEntry {
            purpose: patterns.purpose,
            sophistication: patterns.sophistication.clone(),
            categories: patterns.categories.iter().map(|c| c.name.clone()).collect(),
            widening: patterns.widening.iter().map(|c| c.name.clone()).collect(),
        })
        .collect()
}
