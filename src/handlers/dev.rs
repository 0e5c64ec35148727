use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DevUtterance {
    pub utterance: String,
}

// POST /api/dev/utterance — inject a recognition result into the console
// speech actor. Only wired in dev mode.
pub async fn inject_utterance(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DevUtterance>,
) -> Result<Json<serde_json::Value>, AppError> {
    let utterance = payload.utterance.trim().to_string();
    if utterance.is_empty() {
        return Err(AppError::Invalid("empty utterance".to_string()));
    }

    let inject_tx = state
        .inject_tx
        .as_ref()
        .ok_or_else(|| AppError::NotFound("dev injection not enabled".to_string()))?;

    inject_tx
        .send(utterance)
        .await
        .map_err(|_| AppError::EngineClosed)?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

// GET /api/dev/config
pub async fn dev_config(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "locale": state.config.locale,
        "tts_voice": state.config.tts_voice,
        "asr_no_input_timeout_ms": state.config.asr_no_input_timeout_ms,
        "asr_complete_timeout_ms": state.config.asr_complete_timeout_ms,
        "dev_injection": state.inject_tx.is_some(),
    }))
}
