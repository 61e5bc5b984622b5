use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A free-text theory description submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Theory {
    pub id: String,
    pub text: String,
}

impl Theory {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// True when the text has no non-whitespace content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
