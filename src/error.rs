use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const CONFIGURATION_MESSAGE: &str = "API key is not configured on the server.";
pub const TRANSLATION_FAILED_MESSAGE: &str = "Translation failed.";
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "The Gemini API returned an error.";
pub const INTERNAL_MESSAGE: &str = "An internal server error occurred.";

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("GEMINI_API_KEY is not set")]
    Configuration,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Translation upstream failure. The detail is logged, never returned.
    #[error("Translation upstream failed: {0}")]
    TranslationFailed(String),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

// The request URL carries the API key as a query parameter.
impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Internal(e.without_url().to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                CONFIGURATION_MESSAGE.to_string(),
            ),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::TranslationFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                TRANSLATION_FAILED_MESSAGE.to_string(),
            ),
            AppError::Upstream { status, message } => (*status, message.clone()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request failed: {}", self);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn translation_failure_hides_detail() {
        let (status, body) =
            body_of(AppError::TranslationFailed("quota exceeded for key".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": TRANSLATION_FAILED_MESSAGE }));
    }

    #[tokio::test]
    async fn upstream_error_keeps_status_and_message() {
        let (status, body) = body_of(AppError::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "rate limited".into(),
        })
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "rate limited");
    }

    #[tokio::test]
    async fn internal_error_is_generic() {
        let (status, body) = body_of(AppError::Internal("connection reset".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn invalid_request_is_bad_request() {
        let (status, body) = body_of(AppError::InvalidRequest("text is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "text is required");
    }
}
