use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            _ => None,
        }
    }
}

/// Content of a thread message as relayed by the remote service. Only plain
/// text is supported end-to-end; anything else carries its kind so the
/// extractor can report what it refused to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Other { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub role: MessageRole,
    pub content: MessageContent,
}

/// Remote run lifecycle. `Completed`, `Failed`, `Cancelled` and `Expired` are
/// terminal; `RequiresAction` means the service is waiting on tool outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Completed,
    Failed,
    Cancelled,
    Expired,
    Other(String),
}

impl RunStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "requires_action" => RunStatus::RequiresAction,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            "cancelled" => RunStatus::Cancelled,
            "expired" => RunStatus::Expired,
            other => RunStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Other(value) => value,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative description of a tool as presented to the remote model:
/// a unique name, a human description, and a JSON-schema parameter shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One tool execution requested by the remote service inside a run. The
/// argument payload stays in its raw wire form until the registry parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// The resolved output for one invocation id, submitted back as part of a
/// batch. Exactly one output must exist per pending invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub invocation_id: String,
    pub output: String,
}

/// Point-in-time view of a remote run as returned by a status fetch.
#[derive(Debug, Clone)]
pub struct RunSnapshot {
    pub id: String,
    pub status: RunStatus,
    pub pending_calls: Vec<ToolInvocation>,
    pub failure_detail: Option<String>,
}

/// Identifiers of the long-lived remote conversation context. The remote
/// service is the system of record for message history; locally only these
/// handles are retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub assistant_id: String,
    pub thread_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_status_round_trips_known_values() {
        for wire in [
            "queued",
            "in_progress",
            "requires_action",
            "completed",
            "failed",
            "cancelled",
            "expired",
        ] {
            assert_eq!(RunStatus::from_wire(wire).as_str(), wire);
        }
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = RunStatus::from_wire("incomplete");
        assert_eq!(status, RunStatus::Other("incomplete".into()));
        assert!(!status.is_terminal());
    }

    #[test]
    fn terminal_set_matches_contract() {
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(RunStatus::Expired.is_terminal());
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
        assert!(!RunStatus::RequiresAction.is_terminal());
    }
}
