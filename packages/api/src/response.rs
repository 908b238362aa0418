// ABOUTME: Error-to-HTTP mapping and response helpers for API handlers
// ABOUTME: Domain errors become JSON bodies of the shape { "error": "..." }

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use scrumline_board::BoardError;
use scrumline_projects::DomainError;

/// A JSON API error with the right status for the failure class.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Missing or invalid identity".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Authorization(_) => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::StateTransition(_) => StatusCode::CONFLICT,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Board(BoardError::IndexOutOfRange { .. }) => StatusCode::BAD_REQUEST,
            DomainError::Board(_) => StatusCode::CONFLICT,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {}", err);
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// 200 with the JSON body, or the mapped domain error.
pub fn ok_or_error<T: Serialize>(result: Result<T, DomainError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// 201 with the JSON body, or the mapped domain error.
pub fn created_or_error<T: Serialize>(result: Result<T, DomainError>) -> Response {
    match result {
        Ok(value) => (StatusCode::CREATED, Json(value)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// 204 on success, or the mapped domain error.
pub fn no_content_or_error(result: Result<(), DomainError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
