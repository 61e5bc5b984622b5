use std::collections::BTreeSet;

use anyhow::Context;
use serde::Serialize;
use telos_analysis::{ClassifierParams, PatternCatalog, PurposeClassifier};
use telos_config::TelosConfig;
use telos_core::entities::{ClassificationResult, Theory};
use telos_core::enums::Purpose;

use crate::cli::root_commands::ClassifyArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::input::load_theories;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ClassifiedTheory {
    pub theory_id: String,
    #[serde(flatten)]
    pub classification: ClassificationResult,
}

/// One table row per classified theory.
#[derive(Debug, Serialize)]
struct ClassificationRow {
    theory_id: String,
    primary_purpose: Purpose,
    confidence: String,
    secondary_purposes: BTreeSet<Purpose>,
    overemphasis_detected: bool,
}

impl From<&ClassifiedTheory> for ClassificationRow {
    fn from(classified: &ClassifiedTheory) -> Self {
        let classification = &classified.classification;
        Self {
            theory_id: classified.theory_id.clone(),
            primary_purpose: classification.primary_purpose,
            confidence: format!(
                "{:.2}",
                classification.confidence(classification.primary_purpose)
            ),
            secondary_purposes: classification.secondary_purposes.clone(),
            overemphasis_detected: classification.balance.overemphasis_detected,
        }
    }
}

/// Handle `telos classify`.
pub fn handle(args: &ClassifyArgs, config: &TelosConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let theories = load_theories(&args.input)?;
    let classified = classify(&theories, config)?;

    match (flags.format, classified.as_slice()) {
        (OutputFormat::Table, rows) => output(
            &rows.iter().map(ClassificationRow::from).collect::<Vec<_>>(),
            flags.format,
        ),
        (_, [single]) => output(&single.classification, flags.format),
        (_, many) => output(&many, flags.format),
    }
}

/// Classify every theory, stopping at the first failure.
pub fn classify(theories: &[Theory], config: &TelosConfig) -> anyhow::Result<Vec<ClassifiedTheory>> {
    let catalog = PatternCatalog::standard().context("failed to compile the pattern catalog")?;
    let classifier = PurposeClassifier::new(catalog, ClassifierParams::from(&config.pipeline));

    theories
        .iter()
        .map(|theory| {
            let classification = classifier
                .classify(&theory.text)
                .with_context(|| format!("failed to classify theory '{}'", theory.id))?;
            Ok(ClassifiedTheory {
                theory_id: theory.id.clone(),
                classification,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn taxonomy_text_classifies_descriptive() {
        let classified = classify(
            &[Theory::new("t1", "A taxonomy and a typology.")],
            &TelosConfig::default(),
        )
        .unwrap();

        assert_eq!(classified.len(), 1);
        let row = ClassificationRow::from(&classified[0]);
        assert_eq!(row.primary_purpose, Purpose::Descriptive);
        assert_eq!(row.confidence, "0.30");
        assert!(row.overemphasis_detected);
    }

    #[test]
    fn flattened_output_keeps_the_theory_id() {
        let classified = classify(
            &[Theory::new("t1", "A taxonomy and a typology.")],
            &TelosConfig::default(),
        )
        .unwrap();
        let value = serde_json::to_value(&classified).unwrap();
        assert_eq!(value[0]["theory_id"], "t1");
        assert_eq!(value[0]["primary_purpose"], "descriptive");
    }

    #[test]
    fn noise_reports_the_failing_theory() {
        let err = classify(
            &[Theory::new("noise", "Lorem ipsum dolor sit amet.")],
            &TelosConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("noise"));
    }
}
