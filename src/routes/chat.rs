use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, ChatTurn},
    services::{analyzer::FALLBACK_REPLY, metrics_manager::MetricsData},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => state.sessions.ensure_session(s).await,
        _ => state.sessions.create_session().await,
    };

    // Caller-supplied history wins over what the session has recorded.
    let history = match payload.history {
        Some(history) => history,
        None => state.sessions.get_history(&session_id).await.unwrap_or_default(),
    };

    let analysis = state.analyzer.analyze(&payload.message, &payload.role, &history).await?;

    state
        .metrics
        .record(analysis.intent(), &payload.role, analysis.reply == FALLBACK_REPLY)
        .await;
    state
        .sessions
        .append_turns(
            &session_id,
            [ChatTurn::user(payload.message.as_str()), ChatTurn::bot(analysis.reply.clone())],
        )
        .await;

    tracing::info!(%session_id, intent = analysis.intent(), "chat reply sent");

    Ok(Json(ChatResponse { session_id, analysis }))
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
