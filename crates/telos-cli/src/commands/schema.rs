use anyhow::Context;
use telos_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `telos schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new().context("failed to build the schema registry")?;
    match &args.name {
        Some(name) => output(lookup(&registry, name)?, flags.format),
        None => output(&registry.list(), flags.format),
    }
}

fn lookup<'r>(registry: &'r SchemaRegistry, name: &str) -> anyhow::Result<&'r serde_json::Value> {
    let normalized = name.replace('-', "_");
    registry.get(&normalized).with_context(|| {
        format!(
            "unknown schema '{name}' (available: {})",
            registry.list().join(", ")
        )
    })
}
