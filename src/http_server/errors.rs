//! # API Errors
//!
//! Error types for the HTTP layer and their status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::classifier::ClassifyError;
use crate::dna::{GridError, ValidationError};
use crate::stats::StatsError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body missing, not JSON, or not the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// DNA rejected by validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Grid could not be built from the rows
    #[error("{0}")]
    Grid(#[from] GridError),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Classification could not consult or update the store
    #[error("{0}")]
    Classify(#[from] ClassifyError),

    /// Stats could not be read from the store
    #[error("{0}")]
    Stats(#[from] StatsError),

    /// Worker task failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Grid(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            ApiError::Classify(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Stats(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
