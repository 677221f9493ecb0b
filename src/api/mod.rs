pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fields are optional so that a missing field is reported as an invalid
/// request rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

impl TranslateRequest {
    /// Returns `(text, source_lang, target_lang)` when all are non-empty.
    pub fn into_parts(self) -> Result<(String, String, String), AppError> {
        match (
            non_empty(self.text),
            non_empty(self.source_lang),
            non_empty(self.target_lang),
        ) {
            (Some(text), Some(source), Some(target)) => Ok((text, source, target)),
            _ => Err(AppError::InvalidRequest(
                "text, sourceLang and targetLang are required.".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
}

impl SpeechRequest {
    /// Returns `(text, speaker)` when both are non-empty.
    pub fn into_parts(self) -> Result<(String, String), AppError> {
        match (non_empty(self.text), non_empty(self.speaker)) {
            (Some(text), Some(speaker)) => Ok((text, speaker)),
            _ => Err(AppError::InvalidRequest(
                "text and speaker are required.".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
