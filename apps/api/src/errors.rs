use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures that make a whole analysis meaningless.
/// Everything else in the pipeline degrades to static defaults instead of surfacing here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),
}

/// Errors at the skill catalog provider boundary.
/// Callers log these as "catalog unavailable" / "recommendations unavailable" and fall back.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Table '{0}' does not exist")]
    MissingTable(&'static str),

    #[error("Provider returned no rows")]
    Empty,
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::FileNotFound(_) => AppError::NotFound(err.to_string()),
            AnalysisError::DocumentUnreadable(_) => AppError::UnprocessableEntity(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_maps_to_404() {
        let err: AppError = AnalysisError::FileNotFound(PathBuf::from("/nope.pdf")).into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unreadable_maps_to_422() {
        let err: AppError = AnalysisError::DocumentUnreadable("bad xref".into()).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        let resp = AppError::Validation("No file provided".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
