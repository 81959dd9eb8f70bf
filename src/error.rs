use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::Category;

/// Message shown to clients for any failure of the recommendation pipeline
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while fetching recommendations. Please try again.";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Language model error: {0}")]
    Model(String),

    #[error("Failed to parse model reply: {0}")]
    ReplyParse(String),

    #[error("Invalid {0} recommendations format")]
    InvalidFormat(Category),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Request URLs can carry API keys as query parameters
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpClient(err.without_url())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::HttpClient(_)
            | AppError::ExternalApi(_)
            | AppError::Model(_)
            | AppError::ReplyParse(_)
            | AppError::InvalidFormat(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Clients only ever see one message; the cause goes to the log
        tracing::error!(error = %self, status = %status, "Recommendation request failed");

        let body = Json(json!({
            "error": GENERIC_ERROR_MESSAGE
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
