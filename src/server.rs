//! HTTP API for the chat client.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/chat/complete` | Complete a conversation |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Request
//!
//! ```json
//! {
//!   "messages": [{ "role": "user", "content": "מה כתבתי על טיולים?" }],
//!   "mode": "strict",
//!   "groundWithPosts": true
//! }
//! ```
//!
//! All fields are optional. `mode` takes precedence over the legacy
//! `groundWithPosts` flag; with neither, the request runs in strict mode.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "provider_error", "message": "provider returned HTTP 500: ..." } }
//! ```
//!
//! | Code | Status |
//! |------|--------|
//! | `bad_request` | 400 / 415 / 422 |
//! | `configuration` | 500 |
//! | `retrieval_failed` | 503 |
//! | `provider_error` | 502 |
//! | `upstream_unreachable` | 502 |
//! | `timeout` | 504 |
//!
//! If the client disconnects, the handler future is dropped and the
//! in-flight provider request with it.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, Instrument};

use postchat_core::models::ConversationRequest;
use postchat_core::{ChatError, ChatService};

use crate::chat::build_service;
use crate::config::Config;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    service: Arc<ChatService>,
}

/// Starts the HTTP server on `[server].bind` and runs until terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let service = build_service(config).await?;
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(bind = %config.server.bind, "postchat server listening");
    println!("postchat server listening on http://{}", config.server.bind);

    axum::serve(listener, router(Arc::new(service))).await?;
    Ok(())
}

/// Build the application router around an existing service.
pub fn router(service: Arc<ChatService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat/complete", post(handle_complete))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { service })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"provider_error"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        let status = match &err {
            ChatError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ChatError::Retrieval(_) => StatusCode::SERVICE_UNAVAILABLE,
            ChatError::Provider { .. } => StatusCode::BAD_GATEWAY,
            ChatError::Transport(postchat_core::transport::TransportError::Timeout) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ChatError::Transport(_) => StatusCode::BAD_GATEWAY,
        };
        AppError {
            status,
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError {
            status: rejection.status(),
            code: "bad_request".to_string(),
            message: rejection.body_text(),
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /chat/complete ============

#[derive(Serialize)]
struct CompleteResponse {
    content: String,
}

async fn handle_complete(
    State(state): State<AppState>,
    payload: Result<Json<ConversationRequest>, JsonRejection>,
) -> Result<Json<CompleteResponse>, AppError> {
    let Json(request) = payload?;
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("chat_complete", %request_id);

    let result = state
        .service
        .complete(&request)
        .instrument(span)
        .await
        .map_err(|e| {
            error!(%request_id, code = e.code(), error = %e, "completion failed");
            AppError::from(e)
        })?;

    Ok(Json(CompleteResponse {
        content: result.content,
    }))
}
