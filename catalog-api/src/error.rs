/// Error handling for the API server
///
/// Every handler returns `ApiResult<T>`; failures are converted here into a
/// JSON body that always carries a `message` field, plus an `error` field
/// with the underlying cause for persistence failures.
///
/// ```text
/// 404 {"message": "Product not found or unauthorized"}
/// 500 {"message": "Error creating product", "error": "<driver message>"}
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_shared::models::product::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned when a product is missing or owned by someone else
pub const NOT_FOUND_OR_UNAUTHORIZED: &str = "Product not found or unauthorized";

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Not found (404) - the product does not exist under the caller's ownership
    ///
    /// Deliberately covers both "no such id" and "owned by another user".
    NotFoundOrUnauthorized,

    /// Internal server error (500) - the store rejected or failed the operation
    Persistence {
        /// Operation-level message, e.g. "Error creating product"
        message: String,

        /// Underlying store error message
        error: String,
    },
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,

    /// Underlying cause, present for persistence failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    /// Returns a mapper wrapping a store error under an operation message
    ///
    /// ```ignore
    /// store.list_owned(user_id).await.map_err(ApiError::persistence("Error fetching products"))?;
    /// ```
    pub fn persistence(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |err| ApiError::Persistence {
            message: message.to_string(),
            error: err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFoundOrUnauthorized => write!(f, "{}", NOT_FOUND_OR_UNAUTHORIZED),
            ApiError::Persistence { message, error } => write!(f, "{}: {}", message, error),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::NotFoundOrUnauthorized => (
                StatusCode::NOT_FOUND,
                NOT_FOUND_OR_UNAUTHORIZED.to_string(),
                None,
            ),
            ApiError::Persistence { message, error } => {
                tracing::error!(error = %error, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(error))
            }
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}
