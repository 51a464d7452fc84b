//! HTTP surface: POST /ask → tutoring turn → JSON response.
//!
//! Also serves the static chat page on `GET /`, a liveness summary on `GET /health` and an
//! optional `GET /debug` endpoint. CORS is open to any origin.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

use crate::chat::ChatService;
use crate::core::TutorError;

/// Request body for POST /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Conversation to continue; the shared default conversation when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /ask.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    /// Echo of the request's session id; omitted when the caller did not send one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
    pub window: usize,
    pub model: String,
}

/// Options for the HTTP surface that are not part of the chat service.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub index_html_path: PathBuf,
    pub debug_endpoint: bool,
}

#[derive(Clone)]
struct AppState {
    chat: Arc<ChatService>,
    index_html_path: Arc<PathBuf>,
}

impl IntoResponse for TutorError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            TutorError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", self),
            ),
        };
        let body = Json(json!({ "detail": detail, "kind": self.kind() }));
        (status, body).into_response()
    }
}

/// Validate request body; returns error for blank question or blank session_id.
pub fn validate_ask_request(body: &AskRequest) -> Result<(), TutorError> {
    if body.question.trim().is_empty() {
        return Err(TutorError::InvalidRequest(
            "question must be non-empty".to_string(),
        ));
    }
    if let Some(ref session_id) = body.session_id {
        if session_id.trim().is_empty() {
            return Err(TutorError::InvalidRequest(
                "session_id must be non-empty when provided".to_string(),
            ));
        }
    }
    Ok(())
}

async fn handle_ask(
    State(state): State<AppState>,
    Json(body): Json<AskRequest>,
) -> Result<Json<AskResponse>, TutorError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("ask", request_id = %request_id);
    async move {
        validate_ask_request(&body).inspect_err(|e| warn!(error = %e, "Rejected ask request"))?;
        let session_id = body.session_id.as_deref().map(str::trim);
        let reply = state
            .chat
            .ask(session_id, &body.question)
            .await
            .inspect_err(|e| error!(error = %e, kind = e.kind(), "Server error"))?;
        Ok::<_, TutorError>(Json(AskResponse {
            question: reply.question,
            answer: reply.answer,
            session_id: session_id.map(String::from),
        }))
    }
    .instrument(span)
    .await
}

async fn serve_index(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(state.index_html_path.as_path()).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!(path = %state.index_html_path.display(), error = %e, "index.html not found");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>index.html not found</h1>"),
            )
                .into_response()
        }
    }
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        sessions: state.chat.store().len().await,
        window: state.chat.store().window(),
        model: state.chat.model().to_string(),
    })
}

async fn handle_debug() -> Result<Json<serde_json::Value>, TutorError> {
    let cwd = std::env::current_dir()?;
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(&cwd).await?;
    while let Some(entry) = entries.next_entry().await? {
        files.push(entry.file_name().to_string_lossy().into_owned());
    }
    files.sort();
    let key_loaded = std::env::var("GROQ_API_KEY")
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);
    Ok(Json(json!({
        "cwd": cwd.display().to_string(),
        "files": files,
        "GROQ_API_KEY_loaded": key_loaded,
    })))
}

/// Build the router (GET /, POST /ask, GET /health, optional GET /debug) with permissive CORS.
pub fn router(chat: Arc<ChatService>, options: HttpOptions) -> Router {
    let state = AppState {
        chat,
        index_html_path: Arc::new(options.index_html_path),
    };
    let mut app = Router::new()
        .route("/", get(serve_index))
        .route("/ask", post(handle_ask))
        .route("/health", get(handle_health));
    if options.debug_endpoint {
        app = app.route("/debug", get(handle_debug));
    }
    app.layer(CorsLayer::permissive()).with_state(state)
}

/// Run the HTTP server on `bind_addr` (e.g. `0.0.0.0:8000`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix); in-flight requests complete before exit.
pub async fn run_http(app: Router, bind_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!(bind_addr = %bind_addr, "tutor server listening (Ctrl+C/SIGTERM to stop)");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("tutor server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
