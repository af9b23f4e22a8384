use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use chat_core::persist::{load_index, IndexPaths};
use chat_core::{CoreError, MatchConfig, SharedIndex};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

pub const NOT_READY: &str = "Model not loaded. Please train the model first.";

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Clone)]
pub struct AppState {
    pub index_dir: PathBuf,
    pub index: Arc<SharedIndex>,
    pub match_config: Arc<MatchConfig>,
    pub admin_token: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// Build the router, loading whatever index is on disk. A missing index is
/// not fatal: `/chat` answers 503 until `/admin/reload` succeeds.
pub fn build_app(index_dir: impl Into<PathBuf>, match_config: MatchConfig) -> Result<Router> {
    let index_dir = index_dir.into();
    let index = load_index(&IndexPaths::new(&index_dir))?;
    match &index {
        Some(idx) => tracing::info!(num_docs = idx.num_docs(), num_terms = idx.num_terms(), "index loaded"),
        None => tracing::warn!(dir = %index_dir.display(), "no index found; run the indexer first"),
    }
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let state = AppState {
        index_dir,
        index: Arc::new(SharedIndex::new(index)),
        match_config: Arc::new(match_config),
        admin_token,
    };
    Ok(router(state))
}

pub fn router(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/chat", post(chat_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = match body {
        Ok(Json(req)) => match req.message {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => return Err(api_error(StatusCode::BAD_REQUEST, "Message is required")),
        },
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected chat body");
            return Err(api_error(StatusCode::BAD_REQUEST, "Message is required"));
        }
    };

    match state.index.respond(&message, &state.match_config) {
        Ok(reply) => {
            tracing::debug!(matched = reply.matched.is_some(), "chat reply");
            Ok(Json(ChatResponse { response: reply.text }))
        }
        Err(CoreError::ModelUnavailable) => Err(api_error(StatusCode::SERVICE_UNAVAILABLE, NOT_READY)),
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// Reload the index from disk and swap it in for subsequent requests.
pub async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers)?;
    match load_index(&IndexPaths::new(&state.index_dir)) {
        Ok(Some(index)) => {
            let num_docs = index.num_docs();
            state.index.swap(index);
            tracing::info!(num_docs, "index reloaded");
            Ok(Json(json!({ "reloaded": true, "num_docs": num_docs })))
        }
        Ok(None) => Err(api_error(StatusCode::SERVICE_UNAVAILABLE, NOT_READY)),
        Err(e) => {
            tracing::error!(error = %e, "index reload failed");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))
        }
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err(api_error(StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set")),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(api_error(StatusCode::UNAUTHORIZED, "invalid admin token"))
    }
}
