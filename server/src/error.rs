//! Mapping of failures to HTTP responses.
//!
//! Responses carry the status code only. Whatever detail exists goes to the
//! log, never to the client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_core::StoreError;

use crate::dto::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("todo not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request could not be decoded (bad JSON, wrong content type,
    /// non-numeric id). Keeps the status axum chose for the rejection.
    #[error("request rejected: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::Storage(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request refused");
        }
        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(ValidationError::DoneMissing).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: "bad id".to_string(),
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_failure_is_internal_error() {
        let err = ApiError::from(StoreError::from(
            todo_core::DbError::UnsupportedSchemaVersion {
                db_version: 2,
                latest_supported: 1,
            },
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn panicked_storage_task_is_internal_error() {
        let handle: tokio::task::JoinHandle<()> =
            tokio::task::spawn_blocking(|| panic!("storage worker crashed"));
        let err = ApiError::from(handle.await.unwrap_err());
        assert!(matches!(err, ApiError::Task(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
