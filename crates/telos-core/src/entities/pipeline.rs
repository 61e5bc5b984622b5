use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    ClassificationResult, IntegrationResult, SchemaSet, StageBalance, VocabularyResult,
};
use crate::enums::BalanceStatus;

/// Combined output of one theory analysis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PipelineResult {
    pub theory_id: String,
    pub classification: ClassificationResult,
    pub vocabulary: VocabularyResult,
    pub schemas: SchemaSet,
    pub integration: IntegrationResult,
    /// One record per validated stage, in pipeline order.
    pub stage_balance: Vec<StageBalance>,
    pub balance_status: BalanceStatus,
    /// Rebalancing attempts summed over all stages.
    pub rebalance_attempts: u32,
}

impl PipelineResult {
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.balance_status == BalanceStatus::Passed
    }
}
