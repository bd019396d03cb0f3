mod dto;
mod error;
mod routes;
mod state;

pub use error::ServerError;

use crate::advisor::Advisor;
use crate::assistants::AssistantsService;
use crate::run::ToolStep;
use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::post;
use dto::{ChatRequest, ChatResponse, ErrorResponse};
use routes::chat::chat_handler;
use state::ServerState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(routes::chat::chat_handler),
    components(schemas(ChatRequest, ChatResponse, ErrorResponse, ToolStep)),
    tags(
        (name = "chat", description = "Conversational gold investment advisory")
    )
)]
struct ApiDoc;

pub fn router<S>(advisor: Arc<Advisor<S>>, cors_origins: &[String]) -> Router
where
    S: AssistantsService + 'static,
{
    let api = ApiDoc::openapi();
    let state = Arc::new(ServerState::new(advisor));
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", api))
        .route("/chat", post(chat_handler::<S>))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

pub async fn serve<S>(
    advisor: Arc<Advisor<S>>,
    addr: SocketAddr,
    cors_origins: &[String],
) -> Result<(), ServerError>
where
    S: AssistantsService + 'static,
{
    info!(%addr, "Binding REST server");
    let app = router(advisor, cors_origins);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "REST server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)
}

/// Permissive by default; an explicit origin list narrows it.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    if origins.is_empty() {
        return cors.allow_origin(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(parsed)
}
