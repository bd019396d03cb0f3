use super::errors::RunError;
use crate::assistants::{AssistantsService, ServiceError};
use crate::types::{MessageContent, RunSnapshot, RunStatus};
use tracing::debug;

/// Interpret a terminal run. Only `completed` yields a reply: the newest
/// assistant message in the thread, which must be plain text.
pub(super) async fn resolve_reply<S>(
    service: &S,
    thread_id: &str,
    terminal: &RunSnapshot,
) -> Result<String, RunError>
where
    S: AssistantsService + ?Sized,
{
    if terminal.status != RunStatus::Completed {
        return Err(RunError::TerminalFailure {
            status: terminal.status.clone(),
            detail: terminal.failure_detail.clone(),
        });
    }

    let message = service
        .latest_assistant_message(thread_id)
        .await?
        .ok_or_else(|| {
            RunError::Service(ServiceError::InvalidResponse(
                "thread has no assistant reply".into(),
            ))
        })?;

    match message.content {
        MessageContent::Text(text) => {
            debug!(thread_id, "Extracted assistant reply");
            Ok(text)
        }
        MessageContent::Other { kind } => Err(RunError::UnexpectedContent { kind }),
    }
}
