//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::use_cases::{CharacterError, MonsterError, UserError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Forbidden,
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    /// Logged server-side; the client only sees a generic message.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<CharacterError> for ApiError {
    fn from(err: CharacterError) -> Self {
        match err {
            CharacterError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CharacterError::Forbidden(_) => ApiError::Forbidden,
            CharacterError::Conflict(_) => ApiError::Conflict(err.to_string()),
            CharacterError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CharacterError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            CharacterError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<MonsterError> for ApiError {
    fn from(err: MonsterError) -> Self {
        match err {
            MonsterError::NotFound(_) => ApiError::NotFound(err.to_string()),
            MonsterError::InvalidInput(msg) => ApiError::BadRequest(msg),
            MonsterError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::InvalidInput(msg) => ApiError::BadRequest(msg),
            UserError::Conflict(msg) => ApiError::Conflict(msg),
            UserError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<herobook_domain::DomainError> for ApiError {
    fn from(err: herobook_domain::DomainError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
