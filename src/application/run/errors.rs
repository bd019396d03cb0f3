use crate::assistants::ServiceError;
use crate::types::RunStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("run ended in terminal status '{status}'")]
    TerminalFailure {
        status: RunStatus,
        detail: Option<String>,
    },
    #[error("run exceeded the local {phase} bound after {limit} iterations")]
    Timeout { phase: &'static str, limit: u32 },
    #[error("assistant reply has unsupported content type '{kind}'")]
    UnexpectedContent { kind: String },
}

impl RunError {
    pub fn user_message(&self) -> String {
        match self {
            RunError::Service(err) => err.user_message(),
            RunError::TerminalFailure { status, .. } => format!(
                "The assistant could not complete this request (run {status}). Try again."
            ),
            RunError::Timeout { .. } => {
                "The assistant took too long to answer. Try again shortly.".to_string()
            }
            RunError::UnexpectedContent { .. } => {
                "The assistant produced a response format this service does not support."
                    .to_string()
            }
        }
    }
}
