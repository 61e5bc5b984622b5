//! General application configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Show progress bars for batch analysis by default.
const fn default_progress() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GeneralConfig {
    /// Worker threads for batch analysis (`0` = one per core).
    #[serde(default)]
    pub batch_threads: usize,

    /// Whether batch commands may draw progress bars on a terminal.
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            batch_threads: 0,
            progress: default_progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.batch_threads, 0);
        assert!(config.progress);
    }
}
