pub mod types;

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::Client;

use crate::config::RelayConfig;
use crate::error::{AppError, UPSTREAM_FALLBACK_MESSAGE};

pub use types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Client for the Gemini `generateContent` endpoints used by the relay.
pub struct GeminiClient {
    client: Client,
    api_base: String,
    translate_model: String,
    speech_model: String,
}

impl GeminiClient {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base: config.api_base.clone(),
            translate_model: config.translate_model.clone(),
            speech_model: config.speech_model.clone(),
        })
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<(StatusCode, Bytes), AppError> {
        let response = self
            .client
            .post(self.generate_url(model))
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body))
    }

    /// Sends `prompt` to the translation model and returns the trimmed reply.
    pub async fn translate(&self, api_key: &str, prompt: &str) -> Result<String, AppError> {
        tracing::debug!(
            model = %self.translate_model,
            prompt_len = prompt.len(),
            "Sending translation request to Gemini API"
        );

        let request = GenerateContentRequest::single_turn(prompt);
        let (status, body) = self
            .generate(api_key, &self.translate_model, &request)
            .await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %String::from_utf8_lossy(&body),
                "Gemini translation API error"
            );
            return Err(AppError::TranslationFailed(format!(
                "upstream status {}",
                status
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&body).map_err(|e| {
            AppError::TranslationFailed(format!("malformed response body: {}", e))
        })?;

        match parsed.first_text() {
            Some(text) => Ok(text.trim().to_string()),
            None => {
                tracing::error!(
                    body = %String::from_utf8_lossy(&body),
                    "Gemini translation response has no candidate text"
                );
                Err(AppError::TranslationFailed(
                    "response has no candidate text".to_string(),
                ))
            }
        }
    }

    /// Asks the speech model to read `text` with `voice` and returns the raw
    /// upstream JSON body.
    pub async fn synthesize(
        &self,
        api_key: &str,
        text: &str,
        voice: &str,
    ) -> Result<Bytes, AppError> {
        tracing::debug!(
            model = %self.speech_model,
            voice = %voice,
            text_len = text.len(),
            "Sending speech request to Gemini API"
        );

        let request = GenerateContentRequest::speech(&self.speech_model, text, voice);
        let (status, body) = self.generate(api_key, &self.speech_model, &request).await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %String::from_utf8_lossy(&body),
                "Gemini speech API error"
            );
            return Err(AppError::Upstream {
                status,
                message: upstream_message(&body),
            });
        }

        serde_json::from_slice::<serde::de::IgnoredAny>(&body)
            .map_err(|e| AppError::Internal(format!("speech response is not JSON: {}", e)))?;

        Ok(body)
    }
}

/// Message from an upstream error body, or the generic fallback.
fn upstream_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string())
}
