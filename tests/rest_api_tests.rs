// REST surface tests - driving /chat over a real socket against a scripted
// remote service.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use swarnamitra_backend::advisor::{Advisor, AdvisorProfile};
use swarnamitra_backend::assistants::{AssistantSpec, AssistantsService, ServiceError};
use swarnamitra_backend::run::RunPolicy;
use swarnamitra_backend::server;
use swarnamitra_backend::tools::{Tool, ToolRegistry, ToolReply};
use swarnamitra_backend::types::{
    MessageContent, MessageRole, RunSnapshot, RunStatus, ThreadMessage, ToolDefinition,
    ToolInvocation, ToolOutput,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

// ============================================================================
// Scripted remote service
// ============================================================================

struct ScriptedService {
    initial: Option<RunSnapshot>,
    fetches: Mutex<VecDeque<RunSnapshot>>,
    runs_created: Mutex<u32>,
    appended: Mutex<Vec<String>>,
    reply: Option<ThreadMessage>,
}

impl ScriptedService {
    fn new(
        initial: Option<RunSnapshot>,
        fetches: Vec<RunSnapshot>,
        reply: Option<ThreadMessage>,
    ) -> Self {
        Self {
            initial,
            fetches: Mutex::new(fetches.into_iter().collect()),
            runs_created: Mutex::new(0),
            appended: Mutex::new(Vec::new()),
            reply,
        }
    }
}

#[async_trait]
impl AssistantsService for ScriptedService {
    async fn create_assistant(&self, _spec: &AssistantSpec) -> Result<String, ServiceError> {
        Ok("asst_rest".to_string())
    }

    async fn create_thread(&self) -> Result<String, ServiceError> {
        Ok("thread_rest".to_string())
    }

    async fn append_user_message(&self, _thread_id: &str, text: &str) -> Result<(), ServiceError> {
        self.appended.lock().await.push(text.to_string());
        Ok(())
    }

    async fn create_run(
        &self,
        _thread_id: &str,
        _assistant_id: &str,
    ) -> Result<RunSnapshot, ServiceError> {
        *self.runs_created.lock().await += 1;
        self.initial
            .clone()
            .ok_or_else(|| ServiceError::InvalidResponse("no run scripted".into()))
    }

    async fn fetch_run(&self, _thread_id: &str, _run_id: &str) -> Result<RunSnapshot, ServiceError> {
        self.fetches
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| ServiceError::InvalidResponse("status script exhausted".into()))
    }

    async fn submit_tool_outputs(
        &self,
        _thread_id: &str,
        _run_id: &str,
        _outputs: Vec<ToolOutput>,
    ) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn latest_assistant_message(
        &self,
        _thread_id: &str,
    ) -> Result<Option<ThreadMessage>, ServiceError> {
        Ok(self.reply.clone())
    }
}

struct StaticTool {
    definition: ToolDefinition,
    reply: ToolReply,
}

impl StaticTool {
    fn new(name: &str, reply: ToolReply) -> Self {
        Self {
            definition: ToolDefinition {
                name: name.to_string(),
                description: format!("{name} stub"),
                parameters: json!({ "type": "object", "properties": {} }),
            },
            reply,
        }
    }
}

#[async_trait]
impl Tool for StaticTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, _arguments: Value) -> ToolReply {
        self.reply.clone()
    }
}

// ============================================================================
// Harness
// ============================================================================

fn snapshot(status: RunStatus, calls: Vec<ToolInvocation>) -> RunSnapshot {
    RunSnapshot {
        id: "run_rest".to_string(),
        status,
        pending_calls: calls,
        failure_detail: None,
    }
}

fn text_reply(text: &str) -> Option<ThreadMessage> {
    Some(ThreadMessage {
        role: MessageRole::Assistant,
        content: MessageContent::Text(text.to_string()),
    })
}

fn advisor(
    service: Arc<ScriptedService>,
    tools: Vec<Arc<dyn Tool>>,
    policy: RunPolicy,
) -> Arc<Advisor<ScriptedService>> {
    Arc::new(Advisor::new(
        service,
        Arc::new(ToolRegistry::new(tools)),
        AdvisorProfile {
            model: "gpt-4o-mini".to_string(),
            assistant_name: "SwarnaMitra".to_string(),
            instructions: "advise on gold".to_string(),
        },
        policy,
    ))
}

fn fast_policy() -> RunPolicy {
    RunPolicy {
        poll_interval: Duration::ZERO,
        max_polls: 20,
        max_action_cycles: 4,
    }
}

async fn start_server(advisor: Arc<Advisor<ScriptedService>>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = server::router(advisor, &[]);
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("serve");
    });
    addr
}

async fn post_chat(addr: SocketAddr, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/chat"))
        .json(&body)
        .send()
        .await
        .expect("request");
    let status = response.status().as_u16();
    let payload = response.json().await.expect("json body");
    (status, payload)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn chat_round_trip_executes_tool_and_returns_reply() {
    let service = Arc::new(ScriptedService::new(
        Some(snapshot(
            RunStatus::RequiresAction,
            vec![ToolInvocation {
                id: "call_gold".to_string(),
                name: "get_indian_gold_price".to_string(),
                arguments: "{}".to_string(),
            }],
        )),
        vec![snapshot(RunStatus::Completed, Vec::new())],
        text_reply("24k gold in Delhi trades at ₹10,200 per gram."),
    ));
    let tools: Vec<Arc<dyn Tool>> = vec![Arc::new(StaticTool::new(
        "get_indian_gold_price",
        ToolReply::ok(json!([{ "city": "Delhi", "gold_24k": 10_200 }]), "prices"),
    ))];
    let advisor = advisor(Arc::clone(&service), tools, fast_policy());
    advisor.bootstrap().await.expect("bootstrap");
    let addr = start_server(advisor).await;

    let (status, body) = post_chat(
        addr,
        json!({ "userInput": "What is 2 gram gold price in Delhi?" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body["response"],
        "24k gold in Delhi trades at ₹10,200 per gram."
    );
    assert_eq!(body["toolSteps"][0]["tool"], "get_indian_gold_price");
    assert_eq!(body["toolSteps"][0]["success"], true);
    assert_eq!(
        service.appended.lock().await.as_slice(),
        ["What is 2 gram gold price in Delhi?"]
    );
}

#[tokio::test]
async fn blank_input_is_rejected_before_any_run() {
    let service = Arc::new(ScriptedService::new(
        Some(snapshot(RunStatus::Completed, Vec::new())),
        Vec::new(),
        text_reply("unused"),
    ));
    let advisor = advisor(Arc::clone(&service), Vec::new(), fast_policy());
    advisor.bootstrap().await.expect("bootstrap");
    let addr = start_server(advisor).await;

    let (status, body) = post_chat(addr, json!({ "userInput": "   " })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "userInput must not be empty");

    // Missing field deserializes to an empty string and is rejected the same.
    let (status, _) = post_chat(addr, json!({})).await;
    assert_eq!(status, 400);

    assert_eq!(*service.runs_created.lock().await, 0);
}

#[tokio::test]
async fn unbootstrapped_advisor_reports_service_unavailable() {
    let service = Arc::new(ScriptedService::new(None, Vec::new(), None));
    let advisor = advisor(Arc::clone(&service), Vec::new(), fast_policy());
    let addr = start_server(advisor).await;

    let (status, body) = post_chat(addr, json!({ "userInput": "hello" })).await;
    assert_eq!(status, 503);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("starting up")
    );
}

#[tokio::test]
async fn failed_run_maps_to_bad_gateway() {
    let mut failed = snapshot(RunStatus::Failed, Vec::new());
    failed.failure_detail = Some("server_error".to_string());
    let service = Arc::new(ScriptedService::new(Some(failed), Vec::new(), None));
    let advisor = advisor(Arc::clone(&service), Vec::new(), fast_policy());
    advisor.bootstrap().await.expect("bootstrap");
    let addr = start_server(advisor).await;

    let (status, body) = post_chat(addr, json!({ "userInput": "anything" })).await;
    assert_eq!(status, 502);
    assert!(!body["error"].as_str().expect("error message").is_empty());
}

#[tokio::test]
async fn stuck_run_maps_to_gateway_timeout() {
    let stuck: Vec<RunSnapshot> = (0..10)
        .map(|_| snapshot(RunStatus::InProgress, Vec::new()))
        .collect();
    let service = Arc::new(ScriptedService::new(
        Some(snapshot(RunStatus::Queued, Vec::new())),
        stuck,
        None,
    ));
    let policy = RunPolicy {
        poll_interval: Duration::ZERO,
        max_polls: 3,
        max_action_cycles: 4,
    };
    let advisor = advisor(Arc::clone(&service), Vec::new(), policy);
    advisor.bootstrap().await.expect("bootstrap");
    let addr = start_server(advisor).await;

    let (status, body) = post_chat(addr, json!({ "userInput": "slow question" })).await;
    assert_eq!(status, 504);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("too long")
    );
}
