use std::path::PathBuf;

use clap::{Args, Subcommand};
use telos_core::enums::Purpose;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the full balanced pipeline over one or more theories.
    Analyze(AnalyzeArgs),
    /// Classify theories by purpose, without later stages.
    Classify(ClassifyArgs),
    /// Extract purpose-specific vocabulary, without rebalancing.
    Extract(ExtractArgs),
    /// List the built-in pattern catalog.
    Catalog,
    /// Print a JSON Schema by name, or list the available names.
    Schema(SchemaArgs),
}

/// Where theory text comes from: files, or a single inline string.
#[derive(Clone, Debug, Args)]
pub struct InputArgs {
    /// Theory text files; each file is one theory, identified by its stem
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub files: Vec<PathBuf>,

    /// Analyse inline text instead of files
    #[arg(long)]
    pub text: Option<String>,

    /// Identifier for the inline theory
    #[arg(long, requires = "text", default_value = "inline")]
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Restrict analysis to these purposes (repeatable)
    #[arg(short = 'p', long = "purpose")]
    pub purposes: Vec<Purpose>,

    /// Exit non-zero when any theory ends with a violated balance
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Restrict extraction to these purposes (repeatable)
    #[arg(short = 'p', long = "purpose")]
    pub purposes: Vec<Purpose>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name (for example `pipeline_result`); omit to list names
    pub name: Option<String>,
}
