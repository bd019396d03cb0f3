use super::super::dto::{ChatRequest, ChatResponse, ErrorResponse};
use super::super::state::ServerState;
use crate::advisor::AdvisorError;
use crate::assistants::AssistantsService;
use crate::run::RunError;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat turn processed", body = ChatResponse),
        (status = 400, description = "Missing or empty user input", body = ErrorResponse),
        (status = 502, description = "The assistant run failed", body = ErrorResponse),
        (status = 503, description = "Advisor not yet initialized", body = ErrorResponse),
        (status = 504, description = "The assistant run exceeded its local time bound", body = ErrorResponse)
    )
)]
pub async fn chat_handler<S: AssistantsService>(
    State(state): State<Arc<ServerState<S>>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("Received /chat request");

    if payload.user_input.trim().is_empty() {
        error!("Rejecting /chat request due to empty input");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "userInput must not be empty".to_string(),
            }),
        ));
    }

    let advisor = state.advisor();
    match advisor.handle_chat(&payload.user_input).await {
        Ok(outcome) => {
            info!(
                tool_steps = outcome.steps.len(),
                "Chat request completed successfully"
            );
            Ok(Json(ChatResponse {
                response: outcome.reply,
                tool_steps: outcome.steps,
            }))
        }
        Err(advisor_error) => {
            error!(error = %advisor_error, "Chat request failed");
            Err((
                status_for(&advisor_error),
                Json(ErrorResponse {
                    error: advisor_error.user_message(),
                }),
            ))
        }
    }
}

fn status_for(error: &AdvisorError) -> StatusCode {
    match error {
        AdvisorError::EmptyInput => StatusCode::BAD_REQUEST,
        AdvisorError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
        AdvisorError::Run(RunError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
        AdvisorError::Run(_) | AdvisorError::Service(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses_are_distinct_per_cause() {
        assert_eq!(
            status_for(&AdvisorError::EmptyInput),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AdvisorError::NotInitialized),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&AdvisorError::Run(RunError::Timeout {
                phase: "poll",
                limit: 3
            })),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_for(&AdvisorError::Run(RunError::TerminalFailure {
                status: crate::types::RunStatus::Failed,
                detail: None
            })),
            StatusCode::BAD_GATEWAY
        );
    }
}
