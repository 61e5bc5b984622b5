use anyhow::{Context, bail};
use serde::Serialize;
use telos_analysis::{EnsureBalanced, Pipeline};
use telos_config::TelosConfig;
use telos_core::entities::{PipelineResult, Theory};
use telos_core::responses::{AnalysisSummary, BatchReport, TheoryOutcome};

use crate::bootstrap;
use crate::cli::root_commands::AnalyzeArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::input::load_theories;
use crate::output::output;
use crate::progress::Progress;

/// `telos analyze` response: a bare result for one theory, a report for several.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Single(Box<PipelineResult>),
    Batch(BatchReport),
}

impl AnalyzeResponse {
    fn summaries(&self) -> Vec<AnalysisSummary> {
        match self {
            Self::Single(result) => vec![AnalysisSummary::from(&TheoryOutcome::Completed {
                result: result.clone(),
            })],
            Self::Batch(report) => report.outcomes.iter().map(AnalysisSummary::from).collect(),
        }
    }

    /// Number of completed analyses that ended with a violated balance.
    fn violated(&self) -> u32 {
        match self {
            Self::Single(result) => u32::from(!result.is_balanced()),
            Self::Batch(report) => report.violated,
        }
    }
}

/// Handle `telos analyze`.
pub fn handle(args: &AnalyzeArgs, config: &TelosConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let theories = load_theories(&args.input)?;
    let response = analyze(&theories, args, config)?;

    if flags.format == OutputFormat::Table {
        output(&response.summaries(), flags.format)?;
    } else {
        output(&response, flags.format)?;
    }

    if let AnalyzeResponse::Batch(report) = &response {
        if report.failed > 0 {
            bail!("{} of {} theories failed to analyse", report.failed, report.total);
        }
    }
    if args.strict {
        if let AnalyzeResponse::Single(result) = &response {
            result.ensure_balanced()?;
        }
        let violated = response.violated();
        if violated > 0 {
            bail!("{violated} theories ended with a violated balance");
        }
    }
    Ok(())
}

/// Run the pipeline over `theories` with the configured overrides applied.
pub fn analyze(
    theories: &[Theory],
    args: &AnalyzeArgs,
    config: &TelosConfig,
) -> anyhow::Result<AnalyzeResponse> {
    let pipeline = Pipeline::standard(bootstrap::pipeline_config(config, &args.purposes))
        .context("failed to prepare the analysis pipeline")?;

    if let [theory] = theories {
        let result = pipeline
            .run(theory)
            .with_context(|| format!("failed to analyse theory '{}'", theory.id))?;
        return Ok(AnalyzeResponse::Single(Box::new(result)));
    }

    let progress = if config.general.progress {
        Progress::bar(theories.len() as u64, "analysing theories")
    } else {
        Progress::hidden()
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.general.batch_threads)
        .build()
        .context("failed to build the analysis thread pool")?;
    let outcomes = pool.install(|| {
        pipeline.run_batch_with(theories, |outcome| {
            progress.set_message(outcome.theory_id());
            progress.inc(1);
        })
    });
    progress.finish_clear();

    Ok(AnalyzeResponse::Batch(BatchReport::from_outcomes(outcomes)))
}
