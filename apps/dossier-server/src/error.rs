//! Error types for the dossier server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dossier_core::FAILURE_NOTICE;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Composition or rendering failed; the client only sees the notice
    #[error("Dossier generation failed: {0}")]
    DossierFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::PropertyNotFound(id) => (
                StatusCode::NOT_FOUND,
                "PROPERTY_NOT_FOUND",
                format!("Property '{}' not found", id),
            ),
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::DossierFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DOSSIER_FAILED",
                FAILURE_NOTICE.to_string(),
            ),
            ServerError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<dossier_core::DossierError> for ServerError {
    fn from(err: dossier_core::DossierError) -> Self {
        use dossier_core::DossierError;
        match err {
            DossierError::InvalidViewer(e) => ServerError::InvalidRequest(e.to_string()),
            other => ServerError::DossierFailed(other.to_string()),
        }
    }
}
