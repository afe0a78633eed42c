//! API error handling
//!
//! Every domain error is recovered here and translated into a structured
//! JSON response; nothing in the accounting core can crash a request past
//! this boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_ledger::{LedgerError, StoreError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                msg.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::DocumentNotFound(_)
            | LedgerError::CompanyNotFound(_)
            | LedgerError::AccountNotFound(_) => ApiError::NotFound(err.to_string()),

            LedgerError::InvalidStateTransition { .. }
            | LedgerError::Imbalanced { .. }
            | LedgerError::EmptyDocument(_)
            | LedgerError::EmptyVoidReason
            | LedgerError::NoPostingRule { .. }
            | LedgerError::AccountInactive(_)
            | LedgerError::InvalidLine(_) => ApiError::BadRequest(err.to_string()),

            LedgerError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),

            LedgerError::ConcurrencyConflict(_) => ApiError::Conflict(err.to_string()),

            LedgerError::Calculation(_)
            | LedgerError::Authorization(_)
            | LedgerError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Conflict(_) => ApiError::Conflict(err.to_string()),
            StoreError::ConstraintViolation(_) => ApiError::BadRequest(err.to_string()),
            StoreError::Backend(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::DocumentId;
    use domain_ledger::DocumentStatus;

    #[test]
    fn test_ledger_error_status_mapping() {
        let not_found: ApiError = LedgerError::DocumentNotFound(DocumentId::new()).into();
        assert!(matches!(not_found, ApiError::NotFound(_)));

        let invalid: ApiError = LedgerError::InvalidStateTransition {
            current: DocumentStatus::Posted,
            requested: DocumentStatus::Posted,
        }
        .into();
        assert!(matches!(invalid, ApiError::BadRequest(_)));

        let conflict: ApiError = LedgerError::ConcurrencyConflict(DocumentId::new()).into();
        assert!(matches!(conflict, ApiError::Conflict(_)));
    }
}
