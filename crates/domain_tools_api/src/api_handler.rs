//! Shared API types and utilities
//!
//! Common request validation, error handling, and response conversions
//! used across all API endpoints.

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json};
use serde_json::json;

/// Result type for API handlers
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Client-side problem with the request payload
    InvalidRequest(String),
    /// Unexpected server-side failure; `context` describes the operation
    /// that broke, `details` the underlying error
    Internal {
        context: &'static str,
        details: String,
    },
}

impl ApiError {
    pub fn internal(context: &'static str, details: impl ToString) -> Self {
        ApiError::Internal {
            context,
            details: details.to_string(),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal { context, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": context, "details": details })),
            )
                .into_response(),
        }
    }
}

/// Unwrap a JSON body extraction, turning malformed or mistyped bodies into
/// the 400 error envelope instead of axum's default rejection response.
pub fn require_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::InvalidRequest(rejection.body_text())),
    }
}

/// Normalize and validate a domain from a request body. Trims whitespace
/// and lowercases; rejects empty and over-length input.
pub fn sanitize_domain(domain: &str) -> Result<String, ApiError> {
    let sanitized = domain.trim().to_lowercase();
    if sanitized.is_empty() {
        return Err(ApiError::InvalidRequest("Invalid domain provided".to_string()));
    }
    if sanitized.len() > 253 {
        return Err(ApiError::InvalidRequest(
            "Domain name too long (max 253 characters)".to_string(),
        ));
    }
    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_domain() {
        assert_eq!(sanitize_domain("  Example.COM ").unwrap(), "example.com");
        assert_eq!(sanitize_domain("sub.example.com").unwrap(), "sub.example.com");
        assert!(sanitize_domain("   ").is_err());
        assert!(sanitize_domain(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_error_status_codes() {
        let response = ApiError::InvalidRequest("Invalid domain provided".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::internal("Failed to check ICP domain", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
