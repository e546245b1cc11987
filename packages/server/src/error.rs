use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use folio_common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::guard::login_redirect;

/// Structured error response returned by endpoints that fail without a
/// redirect.
#[derive(Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `INTERNAL_ERROR`.
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// Owner session missing. Carries the path to come back to after login.
    LoginRequired {
        next: String,
    },
    /// Rejected upload. Sends the client back to the form without detail.
    InvalidUpload {
        back_to: String,
    },
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::LoginRequired { next } => {
                return Redirect::to(&login_redirect(&next)).into_response();
            }
            AppError::InvalidUpload { back_to } => {
                tracing::debug!(back_to = %back_to, "Upload rejected");
                return Redirect::to(&back_to).into_response();
            }
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => {
                tracing::debug!("Asset not found: {path}");
                AppError::NotFound("Asset not found".into())
            }
            StorageError::InvalidPath(detail) => {
                tracing::warn!("Rejected asset path: {detail}");
                AppError::NotFound("Asset not found".into())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
