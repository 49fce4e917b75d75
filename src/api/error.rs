//! API error types and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::core::menu::{ServiceError, StoreError};
use crate::git::GitError;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around domain failures that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A menu operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Login or token validation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request itself was malformed (bad id, negative price).
    #[error("{0}")]
    BadRequest(String),

    /// Something inside the server broke (blocking pool, panic).
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            ApiError::Service(err) => status_for_service(err),
            ApiError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials")
            }
            ApiError::Auth(AuthError::InvalidToken) => (StatusCode::UNAUTHORIZED, "invalid_token"),
            ApiError::Auth(AuthError::Hash(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Map a service failure to a status and a machine code.
///
/// Repository failures that the sync endpoint can repair report 502 so
/// clients can tell "retry later / reconcile" apart from a plain 500.
fn status_for_service(err: &ServiceError) -> (StatusCode, &'static str) {
    match err {
        ServiceError::CategoryNotFound(_) => (StatusCode::NOT_FOUND, "category_not_found"),
        ServiceError::DishNotFound { .. } => (StatusCode::NOT_FOUND, "dish_not_found"),
        ServiceError::DuplicateCategory(_) => (StatusCode::CONFLICT, "duplicate_category"),
        ServiceError::DuplicateDish { .. } => (StatusCode::CONFLICT, "duplicate_dish"),
        ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        ServiceError::Store(StoreError::Git(git)) => match git {
            GitError::Push { .. } | GitError::Sync { .. } | GitError::MergeConflict { .. } => {
                (StatusCode::BAD_GATEWAY, "repository_sync_failed")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "repository_error"),
        },
        ServiceError::Store(StoreError::Document(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "document_error")
        }
    }
}
