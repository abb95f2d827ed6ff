use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shown when the text generation service could not answer
pub const GENERATION_FAILED_MESSAGE: &str =
    "No se pudieron obtener recomendaciones en este momento. Por favor, inténtalo de nuevo.";

/// Message shown for any other server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Missing API key for {0}")]
    MissingApiKey(&'static str),

    #[error("Text generation failed: {0}")]
    Generation(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl AppError {
    /// Status code and user-facing message for this error.
    ///
    /// Upstream details never leak to the client; they are logged instead.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Generation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERATION_FAILED_MESSAGE.to_string(),
            ),
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::HttpClient(_)
            | AppError::MissingApiKey(_)
            | AppError::ExternalApi(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = AppError::InvalidInput("La consulta del usuario es requerida".to_string());
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "La consulta del usuario es requerida");
    }

    #[test]
    fn test_generation_error_hides_upstream_detail() {
        let err = AppError::Generation("Cohere API returned status 503".to_string());
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, GENERATION_FAILED_MESSAGE);
    }

    #[test]
    fn test_missing_key_is_internal_error() {
        let (status, message) = AppError::MissingApiKey("TMDB").status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_conflict_status() {
        let (status, _) = AppError::Conflict("taken".to_string()).status_and_message();
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
