// src/routes/mod.rs
pub mod chat;

use crate::config::{Config, ConfigError};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use chat::{chat_handler, get_metrics_handler};
use serde_json::{Value, json};
use subtle::ConstantTimeEq;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

pub const LIVENESS_MESSAGE: &str = "MindMitra Chatbot API is running 🚀";

/// Routes mounted under `/api`.
pub fn create_router(state: SharedState) -> Router<SharedState> {
    let admin_routes = Router::new()
        .route("/metrics", get(get_metrics_handler))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/chat", post(chat_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}

/// The whole application: liveness root, `/api` router and CORS policy.
pub fn create_app(state: SharedState, config: &Config) -> Result<Router, ConfigError> {
    // Credentials forbid wildcards, so methods and headers are mirrored.
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origins()?)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Ok(Router::new()
        .route("/", get(root))
        .nest("/api", create_router(state.clone()))
        .with_state(state)
        .layer(cors))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state.admin_api_key.as_deref().ok_or(AppError::Unauthorized)?;
    match req.headers().get("x-admin-key") {
        Some(val) if bool::from(val.as_bytes().ct_eq(expected.as_bytes())) => Ok(next.run(req).await),
        _ => Err(AppError::Unauthorized),
    }
}
