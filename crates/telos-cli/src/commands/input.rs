use std::path::Path;

use anyhow::Context;
use telos_core::entities::Theory;

use crate::cli::root_commands::InputArgs;

/// Resolve command input into theories, in argument order.
pub fn load_theories(input: &InputArgs) -> anyhow::Result<Vec<Theory>> {
    if let Some(text) = &input.text {
        return Ok(vec![Theory::new(input.id.clone(), text.clone())]);
    }

    input.files.iter().map(|path| read_theory(path)).collect()
}

fn read_theory(path: &Path) -> anyhow::Result<Theory> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read theory file {}", path.display()))?;
    Ok(Theory::new(theory_id(path), text))
}

fn theory_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}
