use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{HealthResponse, SpeechRequest, TranslateRequest, TranslateResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::prompt;

pub async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let api_key = state.config.api_key().ok_or(AppError::Configuration)?;

    // Validate input
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let (text, source_lang, target_lang) = request.into_parts()?;

    if source_lang == target_lang {
        return Ok(Json(TranslateResponse {
            translated_text: text,
        }));
    }

    let prompt =
        prompt::translation_prompt(state.config.prompt_style, &text, &source_lang, &target_lang);
    let translated_text = state.gemini.translate(api_key, &prompt).await?;

    Ok(Json(TranslateResponse { translated_text }))
}

pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let api_key = state.config.api_key().ok_or(AppError::Configuration)?;

    // Validate input
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let (text, speaker) = request.into_parts()?;

    let body = state.gemini.synthesize(api_key, &text, &speaker).await?;

    // Relay the upstream body untouched
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
