//! Client for the hosted assistant execution service.
//!
//! The service owns assistants, threads, messages and runs; this module only
//! speaks its wire format. Everything above it depends on the
//! [`AssistantsService`] trait so the whole remote side can be scripted in
//! tests.

use crate::types::{
    MessageContent, MessageRole, RunSnapshot, RunStatus, ThreadMessage, ToolDefinition,
    ToolInvocation, ToolOutput,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const ASSISTANTS_BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Parameters for creating the long-lived assistant configuration.
#[derive(Debug, Clone)]
pub struct AssistantSpec {
    pub model: String,
    pub name: String,
    pub instructions: String,
    pub tools: Vec<ToolDefinition>,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("assistant service returned status {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("assistant service returned invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Network(err) => {
                if err.is_connect() {
                    "Could not reach the assistant service. Check network connectivity."
                        .to_string()
                } else if err.is_timeout() {
                    "The assistant service took too long to respond. Try again shortly."
                        .to_string()
                } else {
                    "A network error occurred while contacting the assistant service.".to_string()
                }
            }
            ServiceError::Api { status, .. } => match StatusCode::from_u16(*status) {
                Ok(StatusCode::UNAUTHORIZED) | Ok(StatusCode::FORBIDDEN) => {
                    "The assistant service rejected the configured credentials.".to_string()
                }
                Ok(StatusCode::TOO_MANY_REQUESTS) => {
                    "The assistant service is rate limiting requests. Try again shortly."
                        .to_string()
                }
                Ok(StatusCode::SERVICE_UNAVAILABLE) | Ok(StatusCode::BAD_GATEWAY) => {
                    "The assistant service is temporarily unavailable. Try again later."
                        .to_string()
                }
                _ => format!(
                    "The assistant service rejected the request with status {status}. Try again later."
                ),
            },
            ServiceError::InvalidResponse(_) => {
                "The assistant service returned a response that could not be processed."
                    .to_string()
            }
        }
    }
}

/// The remote execution service as consumed by the run driver and advisor.
/// Messages in a thread are served newest-first.
#[async_trait]
pub trait AssistantsService: Send + Sync {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<String, ServiceError>;

    async fn create_thread(&self) -> Result<String, ServiceError>;

    async fn append_user_message(&self, thread_id: &str, text: &str) -> Result<(), ServiceError>;

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<RunSnapshot, ServiceError>;

    async fn fetch_run(&self, thread_id: &str, run_id: &str) -> Result<RunSnapshot, ServiceError>;

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> Result<(), ServiceError>;

    async fn latest_assistant_message(
        &self,
        thread_id: &str,
    ) -> Result<Option<ThreadMessage>, ServiceError>;
}

#[derive(Clone)]
pub struct OpenAiAssistants {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiAssistants {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(DEFAULT_API_BASE, api_key, Client::new())
    }

    pub fn with_base(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let trimmed = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{trimmed}/{path}")
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + Sync,
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .header(ASSISTANTS_BETA_HEADER.0, ASSISTANTS_BETA_HEADER.1)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ServiceError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .http
            .get(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .header(ASSISTANTS_BETA_HEADER.0, ASSISTANTS_BETA_HEADER.1)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T>(response: reqwest::Response) -> Result<T, ServiceError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl AssistantsService for OpenAiAssistants {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<String, ServiceError> {
        info!(
            model = spec.model.as_str(),
            tools = spec.tools.len(),
            "Creating assistant configuration"
        );
        let payload = CreateAssistantRequest::from(spec);
        let created: CreatedObject = self.post_json("/assistants", &payload).await?;
        Ok(created.id)
    }

    async fn create_thread(&self) -> Result<String, ServiceError> {
        let created: CreatedObject = self
            .post_json("/threads", &serde_json::json!({}))
            .await?;
        info!(thread_id = created.id.as_str(), "Created conversation thread");
        Ok(created.id)
    }

    async fn append_user_message(&self, thread_id: &str, text: &str) -> Result<(), ServiceError> {
        debug!(thread_id, "Appending user message to thread");
        let payload = AppendMessageRequest {
            role: "user",
            content: text,
        };
        let _: CreatedObject = self
            .post_json(&format!("/threads/{thread_id}/messages"), &payload)
            .await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<RunSnapshot, ServiceError> {
        let payload = CreateRunRequest { assistant_id };
        let run: RunObject = self
            .post_json(&format!("/threads/{thread_id}/runs"), &payload)
            .await?;
        info!(thread_id, run_id = run.id.as_str(), "Created run");
        Ok(run.into_snapshot())
    }

    async fn fetch_run(&self, thread_id: &str, run_id: &str) -> Result<RunSnapshot, ServiceError> {
        let run: RunObject = self
            .get_json(&format!("/threads/{thread_id}/runs/{run_id}"))
            .await?;
        Ok(run.into_snapshot())
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> Result<(), ServiceError> {
        debug!(thread_id, run_id, outputs = outputs.len(), "Submitting tool outputs");
        let payload = SubmitOutputsRequest {
            tool_outputs: outputs
                .into_iter()
                .map(|output| WireToolOutput {
                    tool_call_id: output.invocation_id,
                    output: output.output,
                })
                .collect(),
        };
        let _: RunObject = self
            .post_json(
                &format!("/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
                &payload,
            )
            .await?;
        Ok(())
    }

    async fn latest_assistant_message(
        &self,
        thread_id: &str,
    ) -> Result<Option<ThreadMessage>, ServiceError> {
        let list: MessageList = self
            .get_json(&format!("/threads/{thread_id}/messages?order=desc&limit=10"))
            .await?;
        for message in list.data {
            if MessageRole::from_str(&message.role) == Some(MessageRole::Assistant) {
                return Ok(Some(message.into_thread_message()?));
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct CreatedObject {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateAssistantRequest {
    model: String,
    name: String,
    instructions: String,
    tools: Vec<WireToolDefinition>,
}

impl From<&AssistantSpec> for CreateAssistantRequest {
    fn from(spec: &AssistantSpec) -> Self {
        Self {
            model: spec.model.clone(),
            name: spec.name.clone(),
            instructions: spec.instructions.clone(),
            tools: spec
                .tools
                .iter()
                .cloned()
                .map(|function| WireToolDefinition {
                    kind: "function",
                    function,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireToolDefinition {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ToolDefinition,
}

#[derive(Debug, Serialize)]
struct AppendMessageRequest<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SubmitOutputsRequest {
    tool_outputs: Vec<WireToolOutput>,
}

#[derive(Debug, Serialize)]
struct WireToolOutput {
    tool_call_id: String,
    output: String,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    id: String,
    status: String,
    #[serde(default)]
    required_action: Option<RequiredAction>,
    #[serde(default)]
    last_error: Option<LastError>,
}

impl RunObject {
    fn into_snapshot(self) -> RunSnapshot {
        let pending_calls = self
            .required_action
            .and_then(|action| action.submit_tool_outputs)
            .map(|submit| {
                submit
                    .tool_calls
                    .into_iter()
                    .map(|call| ToolInvocation {
                        id: call.id,
                        name: call.function.name,
                        arguments: call.function.arguments,
                    })
                    .collect()
            })
            .unwrap_or_default();
        RunSnapshot {
            id: self.id,
            status: RunStatus::from_wire(&self.status),
            pending_calls,
            failure_detail: self.last_error.map(|error| error.describe()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RequiredAction {
    #[serde(default)]
    submit_tool_outputs: Option<SubmitToolOutputsAction>,
}

#[derive(Debug, Deserialize)]
struct SubmitToolOutputsAction {
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunctionCall,
}

#[derive(Debug, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct LastError {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

impl LastError {
    fn describe(self) -> String {
        match self.code {
            Some(code) => format!("{code}: {}", self.message),
            None => self.message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageList {
    #[serde(default)]
    data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
struct MessageObject {
    role: String,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

impl MessageObject {
    fn into_thread_message(self) -> Result<ThreadMessage, ServiceError> {
        let role = MessageRole::from_str(&self.role)
            .ok_or_else(|| ServiceError::InvalidResponse("unknown role in message".into()))?;
        let block = self
            .content
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::InvalidResponse("message without content".into()))?;
        let content = match block.kind.as_str() {
            "text" => {
                let text = block.text.ok_or_else(|| {
                    ServiceError::InvalidResponse("text block missing value".into())
                })?;
                MessageContent::Text(text.value)
            }
            other => MessageContent::Other {
                kind: other.to_string(),
            },
        };
        Ok(ThreadMessage { role, content })
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<TextBlock>,
}

#[derive(Debug, Deserialize)]
struct TextBlock {
    value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_paths_correctly() {
        let client = OpenAiAssistants::with_base("https://api.example.test/v1/", "key");
        assert_eq!(
            client.endpoint("/threads"),
            "https://api.example.test/v1/threads"
        );
    }

    #[test]
    fn run_object_maps_pending_calls() {
        let raw = r#"{
            "id": "run_1",
            "status": "requires_action",
            "required_action": {
                "type": "submit_tool_outputs",
                "submit_tool_outputs": {
                    "tool_calls": [
                        {
                            "id": "call_a",
                            "type": "function",
                            "function": { "name": "get_indian_gold_price", "arguments": "{}" }
                        },
                        {
                            "id": "call_b",
                            "type": "function",
                            "function": { "name": "sip_gold_planning", "arguments": "{\"duration\":12}" }
                        }
                    ]
                }
            }
        }"#;
        let run: RunObject = serde_json::from_str(raw).expect("deserialize run");
        let snapshot = run.into_snapshot();
        assert_eq!(snapshot.status, RunStatus::RequiresAction);
        assert_eq!(snapshot.pending_calls.len(), 2);
        assert_eq!(snapshot.pending_calls[0].id, "call_a");
        assert_eq!(snapshot.pending_calls[1].name, "sip_gold_planning");
        assert!(snapshot.failure_detail.is_none());
    }

    #[test]
    fn run_object_maps_failure_detail() {
        let raw = r#"{
            "id": "run_2",
            "status": "failed",
            "last_error": { "code": "rate_limit_exceeded", "message": "too many requests" }
        }"#;
        let run: RunObject = serde_json::from_str(raw).expect("deserialize run");
        let snapshot = run.into_snapshot();
        assert_eq!(snapshot.status, RunStatus::Failed);
        assert!(snapshot.pending_calls.is_empty());
        assert_eq!(
            snapshot.failure_detail.as_deref(),
            Some("rate_limit_exceeded: too many requests")
        );
    }

    #[test]
    fn message_object_maps_text_and_other_blocks() {
        let text: MessageObject = serde_json::from_str(
            r#"{ "role": "assistant", "content": [ { "type": "text", "text": { "value": "hello" } } ] }"#,
        )
        .expect("deserialize message");
        let message = text.into_thread_message().expect("map message");
        assert_eq!(message.role, MessageRole::Assistant);
        assert_eq!(message.content, MessageContent::Text("hello".into()));

        let image: MessageObject = serde_json::from_str(
            r#"{ "role": "assistant", "content": [ { "type": "image_file", "image_file": { "file_id": "f" } } ] }"#,
        )
        .expect("deserialize message");
        let message = image.into_thread_message().expect("map message");
        assert_eq!(
            message.content,
            MessageContent::Other {
                kind: "image_file".into()
            }
        );
    }

    #[test]
    fn assistant_request_wraps_function_definitions() {
        let spec = AssistantSpec {
            model: "gpt-4o-mini".into(),
            name: "SwarnaMitra".into(),
            instructions: "advise".into(),
            tools: vec![ToolDefinition {
                name: "get_indian_gold_price".into(),
                description: "Current gold prices".into(),
                parameters: serde_json::json!({ "type": "object", "properties": {} }),
            }],
        };
        let payload = CreateAssistantRequest::from(&spec);
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(
            value["tools"][0]["function"]["name"],
            "get_indian_gold_price"
        );
    }
}
