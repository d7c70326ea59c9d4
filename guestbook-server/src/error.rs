//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use guestbook_core::{GuestbookError, StoreError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request input rejected (400)
    Validation { message: String },

    /// Store failure (502 for upstream status errors, 500 otherwise, logged)
    Store(StoreError),

    /// Internal error (500)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": message
                }),
            ),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                let status = match e {
                    StoreError::Status { .. } | StoreError::Http(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (
                    status,
                    json!({
                        "error": "store_error",
                        "message": "the database request failed"
                    }),
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<GuestbookError> for ApiError {
    fn from(e: GuestbookError) -> Self {
        match e {
            GuestbookError::InvalidGiftReference { .. } => Self::Validation {
                message: e.to_string(),
            },
            GuestbookError::Store(e) => Self::Store(e),
            GuestbookError::KeyGeneration | GuestbookError::Config { .. } => Self::Internal {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_gift_is_400() {
        let err = ApiError::from(GuestbookError::invalid_gift("99"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upstream_status_is_502() {
        let err = ApiError::from(GuestbookError::Store(StoreError::Status {
            method: "GET",
            path: "posts".into(),
            status: 401,
            body: "Permission denied".into(),
        }));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn missing_key_is_500() {
        let err = ApiError::from(GuestbookError::KeyGeneration);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
