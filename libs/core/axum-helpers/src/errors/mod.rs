pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response body.
///
/// ```json
/// {
///   "code": 1008,
///   "error": "CONFLICT",
///   "message": "Email 'ada@example.com' is already registered",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details (e.g., validation field errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status, code, and client-facing body for this error. Messages of
    /// server-side failures are replaced by the code's default text.
    fn parts(self) -> (StatusCode, ErrorResponse) {
        let (status, code, message) = match self {
            AppError::Database(e) => return map_db_error(&e),
            AppError::ValidationError(e) => {
                let body = ErrorResponse::new(
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message(),
                )
                .with_details(validation_details(&e));
                return (StatusCode::BAD_REQUEST, body);
            }
            AppError::JsonExtractorRejection(e) => {
                (e.status(), ErrorCode::JsonExtraction, e.body_text())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Conflict, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "Internal error: {msg}");
                let code = ErrorCode::InternalError;
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(code, code.default_message()),
                );
            }
        };
        (status, ErrorResponse::new(code, message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let summary = self.to_string();
        let (status, body) = self.parts();

        if status.is_server_error() {
            tracing::warn!(error_code = body.code, status = status.as_u16(), "{summary}");
        } else {
            tracing::info!(error_code = body.code, status = status.as_u16(), "{summary}");
        }

        (status, Json(body)).into_response()
    }
}

/// Maps SeaORM errors to a status and body. Driver details stay in the logs.
fn map_db_error(error: &DbErr) -> (StatusCode, ErrorResponse) {
    let code = match error {
        DbErr::RecordNotFound(_) => ErrorCode::DatabaseNotFound,
        DbErr::ConnectionAcquire(_) => ErrorCode::DatabasePoolTimeout,
        _ => ErrorCode::DatabaseError,
    };

    let status = match code {
        ErrorCode::DatabaseNotFound => {
            tracing::info!(error_code = code.code(), "Database record not found: {}", error);
            StatusCode::NOT_FOUND
        }
        ErrorCode::DatabasePoolTimeout => {
            tracing::warn!(error_code = code.code(), "Database pool exhausted: {}", error);
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => {
            tracing::error!(error_code = code.code(), "Database error: {:?}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, ErrorResponse::new(code, code.default_message()))
}

/// Flattens validator errors into `{ field: [{code, message, params}] }`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

/// Helper to build an error response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}
