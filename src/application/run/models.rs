use crate::config::RunLimitsConfig;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use utoipa::ToSchema;

/// Local bounds on the orchestration loop. The remote protocol guarantees
/// neither bounded run duration nor a limit on tool-request cycles, so both
/// ceilings are enforced here.
#[derive(Debug, Clone, Copy)]
pub struct RunPolicy {
    pub poll_interval: Duration,
    pub max_polls: u32,
    pub max_action_cycles: u32,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self::from_limits(RunLimitsConfig::default())
    }
}

impl RunPolicy {
    pub fn from_limits(limits: RunLimitsConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(limits.poll_interval_ms),
            max_polls: limits.max_polls,
            max_action_cycles: limits.max_action_cycles,
        }
    }
}

/// Audit record of one locally executed tool invocation within a run.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolStep {
    pub tool: String,
    pub invocation_id: String,
    pub success: bool,
    #[schema(value_type = Object)]
    pub output: Value,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: String,
    pub reply: String,
    pub steps: Vec<ToolStep>,
}
