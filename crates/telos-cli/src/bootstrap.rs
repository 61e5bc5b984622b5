use anyhow::Context;
use telos_config::{PipelineConfig, TelosConfig};
use telos_core::enums::Purpose;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TelosConfig> {
    load_dotenv()?;

    let config = TelosConfig::load_from(flags.config.as_deref()).with_context(|| {
        flags.config.as_ref().map_or_else(
            || String::from("failed to load telos configuration"),
            |path| format!("failed to load telos configuration with {}", path.display()),
        )
    })?;
    tracing::debug!(
        purposes = config.pipeline.requested_purposes.len(),
        attempts = config.pipeline.max_rebalance_attempts,
        "configuration loaded"
    );
    Ok(config)
}

/// Pipeline configuration with `--purpose` overrides applied.
///
/// An empty override list keeps the configured purposes.
#[must_use]
pub fn pipeline_config(config: &TelosConfig, purposes: &[Purpose]) -> PipelineConfig {
    if purposes.is_empty() {
        config.pipeline.clone()
    } else {
        config.pipeline.clone().with_purposes(purposes.iter().copied())
    }
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
