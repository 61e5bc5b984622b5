use std::collections::BTreeSet;

use anyhow::Context;
use serde::Serialize;
use telos_analysis::{PatternCatalog, VocabularyExtractor, VocabularyParams};
use telos_config::TelosConfig;
use telos_core::entities::{Theory, VocabularyResult};
use telos_core::enums::Purpose;

use crate::bootstrap;
use crate::cli::root_commands::ExtractArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::input::load_theories;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ExtractedTheory {
    pub theory_id: String,
    #[serde(flatten)]
    pub vocabulary: VocabularyResult,
}

#[derive(Debug, Serialize)]
struct TermRow {
    theory_id: String,
    purpose: Purpose,
    count: usize,
    terms: String,
}

/// Handle `telos extract`.
pub fn handle(args: &ExtractArgs, config: &TelosConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let theories = load_theories(&args.input)?;
    let extracted = extract(&theories, &args.purposes, config)?;

    match (flags.format, extracted.as_slice()) {
        (OutputFormat::Table, rows) => output(&term_rows(rows), flags.format),
        (_, [single]) => output(&single.vocabulary, flags.format),
        (_, many) => output(&many, flags.format),
    }
}

/// Extract core-category vocabulary for the requested purposes.
pub fn extract(
    theories: &[Theory],
    purposes: &[Purpose],
    config: &TelosConfig,
) -> anyhow::Result<Vec<ExtractedTheory>> {
    let pipeline = bootstrap::pipeline_config(config, purposes);
    pipeline
        .validate()
        .context("invalid vocabulary extraction settings")?;
    let catalog = PatternCatalog::standard().context("failed to compile the pattern catalog")?;
    let extractor = VocabularyExtractor::new(catalog);
    let params = VocabularyParams::new(pipeline.requested_purposes);

    Ok(theories
        .iter()
        .map(|theory| ExtractedTheory {
            theory_id: theory.id.clone(),
            vocabulary: extractor.extract(&theory.text, &params),
        })
        .collect())
}

fn term_rows(extracted: &[ExtractedTheory]) -> Vec<TermRow> {
    extracted
        .iter()
        .flat_map(|theory| {
            theory.vocabulary.terms.iter().map(move |(purpose, terms)| TermRow {
                theory_id: theory.theory_id.clone(),
                purpose: *purpose,
                count: terms.len(),
                terms: terms
                    .iter()
                    .map(|term| term.term.as_str())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>()
                    .join(", "),
            })
        })
        .collect()
}
