use super::errors::RunError;
use super::extractor;
use super::models::{RunOutcome, RunPolicy, ToolStep};
use crate::assistants::AssistantsService;
use crate::tools::{ToolError, ToolRegistry, ToolReply};
use crate::types::{RunSnapshot, RunStatus, ToolInvocation, ToolOutput};
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Drives one remote run to a terminal state: create, poll, dispatch tool
/// invocations through the registry, submit the output batch, resume polling.
/// All waiting happens at the single sleep before each status fetch.
pub struct RunDriver<S: AssistantsService> {
    service: Arc<S>,
    registry: Arc<ToolRegistry>,
    policy: RunPolicy,
}

impl<S: AssistantsService> RunDriver<S> {
    pub fn new(service: Arc<S>, registry: Arc<ToolRegistry>, policy: RunPolicy) -> Self {
        Self {
            service,
            registry,
            policy,
        }
    }

    pub async fn execute(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<RunOutcome, RunError> {
        let mut snapshot = self.service.create_run(thread_id, assistant_id).await?;
        info!(run_id = snapshot.id.as_str(), "Run created");

        let mut steps = Vec::new();
        let mut polls = 0u32;
        let mut action_cycles = 0u32;

        while !snapshot.status.is_terminal() {
            if snapshot.status == RunStatus::RequiresAction {
                action_cycles += 1;
                if action_cycles > self.policy.max_action_cycles {
                    warn!(
                        run_id = snapshot.id.as_str(),
                        cycles = action_cycles,
                        "Run exceeded tool-action cycle bound"
                    );
                    return Err(RunError::Timeout {
                        phase: "tool-action",
                        limit: self.policy.max_action_cycles,
                    });
                }
                let outputs = self
                    .resolve_invocations(&snapshot.pending_calls, &mut steps)
                    .await;
                // The remote service will not progress while any pending
                // invocation id is unanswered, and it only accepts the batch
                // as a whole.
                self.service
                    .submit_tool_outputs(thread_id, &snapshot.id, outputs)
                    .await?;
            } else {
                debug!(
                    run_id = snapshot.id.as_str(),
                    status = %snapshot.status,
                    "Run still in progress"
                );
            }
            snapshot = self.poll(thread_id, &snapshot.id, &mut polls).await?;
        }
        let terminal = snapshot;

        info!(
            run_id = terminal.id.as_str(),
            status = %terminal.status,
            tool_steps = steps.len(),
            "Run reached terminal state"
        );
        let reply = extractor::resolve_reply(self.service.as_ref(), thread_id, &terminal).await?;
        Ok(RunOutcome {
            run_id: terminal.id,
            reply,
            steps,
        })
    }

    async fn poll(
        &self,
        thread_id: &str,
        run_id: &str,
        polls: &mut u32,
    ) -> Result<RunSnapshot, RunError> {
        *polls += 1;
        if *polls > self.policy.max_polls {
            warn!(run_id, polls = *polls, "Run exceeded poll bound");
            return Err(RunError::Timeout {
                phase: "poll",
                limit: self.policy.max_polls,
            });
        }
        sleep(self.policy.poll_interval).await;
        Ok(self.service.fetch_run(thread_id, run_id).await?)
    }

    /// Produce exactly one output per pending invocation id. Invocations are
    /// independent and resolved concurrently; an unknown tool name still gets
    /// an error payload so the batch never leaves an id unanswered.
    async fn resolve_invocations(
        &self,
        calls: &[ToolInvocation],
        steps: &mut Vec<ToolStep>,
    ) -> Vec<ToolOutput> {
        let replies = join_all(calls.iter().map(|call| {
            let registry = Arc::clone(&self.registry);
            async move {
                match registry.invoke(&call.name, &call.arguments).await {
                    Ok(reply) => reply,
                    Err(ToolError::UnknownTool(name)) => {
                        ToolReply::failure(format!("tool '{name}' is not available"))
                    }
                }
            }
        }))
        .await;

        calls
            .iter()
            .zip(replies)
            .map(|(call, reply)| {
                steps.push(ToolStep {
                    tool: call.name.clone(),
                    invocation_id: call.id.clone(),
                    success: reply.success,
                    output: reply.data.clone(),
                    message: reply.message.clone(),
                });
                ToolOutput {
                    invocation_id: call.id.clone(),
                    output: reply.to_wire(),
                }
            })
            .collect()
    }
}
