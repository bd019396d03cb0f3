use crate::run::ToolStep;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Absent or blank input is rejected before a run is started.
    #[serde(default, rename = "userInput")]
    pub user_input: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    #[serde(rename = "toolSteps")]
    pub tool_steps: Vec<ToolStep>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
