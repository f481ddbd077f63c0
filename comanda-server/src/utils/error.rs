//! Unified error handling
//!
//! [`AppError`] is the HTTP-facing error enum. Domain errors from the store
//! and the POS workflow convert into it via `From`, so handlers can use `?`
//! throughout and let the `IntoResponse` impl pick status code and error
//! code.
//!
//! # Error code scheme
//!
//! | Code  | Meaning              |
//! |-------|----------------------|
//! | E0002 | Validation failed    |
//! | E0003 | Resource not found   |
//! | E0004 | Resource conflict    |
//! | E0005 | Business rule broken |
//! | E3001 | Not logged in        |
//! | E9002 | Storage error        |
//! | E9001 | Internal error       |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::pos::PosError;
use crate::store::StoreError;

/// Application-level Result type used in HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Error body returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (4xx) ==========
    #[error("Authentication required")]
    Unauthorized,

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System errors (5xx) ==========
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        AppError::BusinessRule(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TicketNotFound(id) => {
                AppError::NotFound(format!("Ticket {} not found", id))
            }
            StoreError::Transition(e) => AppError::BusinessRule(e.to_string()),
            StoreError::InvalidTicket(msg) => AppError::Validation(msg),
            StoreError::NoHeldOrders => {
                AppError::NotFound("No held orders to recall".to_string())
            }
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl From<PosError> for AppError {
    fn from(err: PosError) -> Self {
        match err {
            PosError::PadNotFound(id) => AppError::NotFound(format!("Pad {} not found", id)),
            PosError::NotReady { .. } => AppError::BusinessRule(err.to_string()),
            _ => AppError::Validation(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "E3001",
                "Please login first".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.clone())
            }
            AppError::Storage(msg) => {
                error!(target: "storage", error = %msg, "Storage error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Storage error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{TicketStatus, TransitionError};

    #[test]
    fn test_store_error_mapping() {
        let err: AppError = StoreError::TicketNotFound("ORD-1".to_string()).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = StoreError::Transition(TransitionError {
            from: TicketStatus::Served,
            to: TicketStatus::Sent,
        })
        .into();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[test]
    fn test_pos_error_mapping() {
        let err: AppError = PosError::EmptyOrder.into();
        assert!(matches!(err, AppError::Validation(_)));

        let err: AppError = PosError::PadNotFound("abc".to_string()).into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
