//! The advisor owns the long-lived conversation context and adapts chat
//! requests onto the run driver. It is constructed once during process
//! bootstrap and shared by reference with every request handler.

use crate::assistants::{AssistantSpec, AssistantsService, ServiceError};
use crate::run::{RunDriver, RunError, RunPolicy, ToolStep};
use crate::tools::ToolRegistry;
use crate::types::Conversation;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Identity the assistant is created with at bootstrap.
#[derive(Debug, Clone)]
pub struct AdvisorProfile {
    pub model: String,
    pub assistant_name: String,
    pub instructions: String,
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub steps: Vec<ToolStep>,
}

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("user input must not be empty")]
    EmptyInput,
    #[error("assistant and conversation thread are not initialized")]
    NotInitialized,
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Run(#[from] RunError),
}

impl AdvisorError {
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::EmptyInput => "Please provide a question or instruction.".to_string(),
            AdvisorError::NotInitialized => {
                "The advisory service is still starting up. Try again in a moment.".to_string()
            }
            AdvisorError::Service(err) => err.user_message(),
            AdvisorError::Run(err) => err.user_message(),
        }
    }
}

pub struct Advisor<S: AssistantsService> {
    service: Arc<S>,
    registry: Arc<ToolRegistry>,
    driver: RunDriver<S>,
    profile: AdvisorProfile,
    conversation: OnceLock<Conversation>,
    // Two concurrent runs on one thread race on append-then-run and can
    // cross-talk, so at most one run may be in flight per conversation.
    run_lock: Mutex<()>,
}

impl<S: AssistantsService> Advisor<S> {
    pub fn new(
        service: Arc<S>,
        registry: Arc<ToolRegistry>,
        profile: AdvisorProfile,
        policy: RunPolicy,
    ) -> Self {
        let driver = RunDriver::new(Arc::clone(&service), Arc::clone(&registry), policy);
        Self {
            service,
            registry,
            driver,
            profile,
            conversation: OnceLock::new(),
            run_lock: Mutex::new(()),
        }
    }

    /// Create the remote assistant configuration and the conversation thread.
    /// Must succeed once before `handle_chat` is usable; calling it again is
    /// a no-op.
    pub async fn bootstrap(&self) -> Result<&Conversation, AdvisorError> {
        if let Some(existing) = self.conversation.get() {
            return Ok(existing);
        }

        let spec = AssistantSpec {
            model: self.profile.model.clone(),
            name: self.profile.assistant_name.clone(),
            instructions: self.profile.instructions.clone(),
            tools: self.registry.definitions(),
        };
        let assistant_id = self.service.create_assistant(&spec).await?;
        let thread_id = self.service.create_thread().await?;
        info!(
            assistant_id = assistant_id.as_str(),
            thread_id = thread_id.as_str(),
            tools = self.registry.len(),
            "Advisor bootstrapped"
        );
        Ok(self.conversation.get_or_init(|| Conversation {
            assistant_id,
            thread_id,
        }))
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.get()
    }

    /// One full chat turn: validate, append the user message, drive the run
    /// to its terminal state, and surface the assistant's final text.
    pub async fn handle_chat(&self, user_input: &str) -> Result<ChatOutcome, AdvisorError> {
        let trimmed = user_input.trim();
        if trimmed.is_empty() {
            warn!("Rejecting chat request with empty input");
            return Err(AdvisorError::EmptyInput);
        }
        let conversation = self
            .conversation
            .get()
            .ok_or(AdvisorError::NotInitialized)?;

        let _guard = self.run_lock.lock().await;
        self.service
            .append_user_message(&conversation.thread_id, trimmed)
            .await?;
        match self
            .driver
            .execute(&conversation.thread_id, &conversation.assistant_id)
            .await
        {
            Ok(outcome) => {
                info!(
                    run_id = outcome.run_id.as_str(),
                    tool_steps = outcome.steps.len(),
                    "Chat turn completed"
                );
                Ok(ChatOutcome {
                    reply: outcome.reply,
                    steps: outcome.steps,
                })
            }
            Err(error) => {
                error!(%error, "Chat turn failed");
                Err(error.into())
            }
        }
    }
}
