//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP responses
//! with JSON error bodies.
//!
//! Error mappings:
//! - `InvalidPageRequest`, `InvalidBranchName` → 400
//! - `ReadOnly` → 403
//! - `RepoNotFound`, `BranchNotFound`, `ChangesetNotFound` → 404
//! - `BranchAlreadyExists` → 409
//! - `Git`, `Internal` → 500
//!
//! Git errors are the failures of the entity sources; they are passed through
//! untouched and never retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("Changeset not found: {0}")]
    ChangesetNotFound(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Branch already exists: {0}")]
    BranchAlreadyExists(String),

    #[error("Repository is served read-only")]
    ReadOnly,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPageRequest(_) | AppError::InvalidBranchName(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::ReadOnly => StatusCode::FORBIDDEN,
            AppError::RepoNotFound(_)
            | AppError::BranchNotFound(_)
            | AppError::ChangesetNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BranchAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::Git(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            AppError::InvalidPageRequest("page".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::ReadOnly.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::BranchNotFound("main".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BranchAlreadyExists("main".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn git_errors_pass_through_as_server_errors() {
        let err: AppError = git2::Error::from_str("object not found").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("object not found"));
    }
}
