// Error types for order operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid item_id")]
    InvalidItem,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Order not found")]
    NotFound,

    #[error("Access denied")]
    AccessDenied,

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => OrderError::NotFound,
            StoreError::Database(msg) => OrderError::DatabaseError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            OrderError::InvalidItem => (StatusCode::BAD_REQUEST, "Invalid item_id".to_string()),
            OrderError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            OrderError::InsufficientPermissions => (
                StatusCode::BAD_REQUEST,
                "Insufficient permissions".to_string(),
            ),
            OrderError::NotFound => (StatusCode::NOT_FOUND, "Order not found".to_string()),
            // Denials read as 404 so order existence is not disclosed to
            // non-owners.
            OrderError::AccessDenied => (StatusCode::NOT_FOUND, "Access denied".to_string()),
            OrderError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            OrderError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            OrderError::DatabaseError(msg) => {
                error!("Database error in orders: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
