//! Machine-readable codes carried in every error body.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    JsonExtraction,
    NotFound,
    InternalError,
    /// Duplicate email or group name.
    Conflict,
    DatabaseError,
    DatabasePoolTimeout,
    DatabaseNotFound,
}

/// Wire name, log code, and fallback message of one [`ErrorCode`].
struct Meta(&'static str, i32, &'static str);

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 8] = [
        Self::ValidationError,
        Self::JsonExtraction,
        Self::NotFound,
        Self::InternalError,
        Self::Conflict,
        Self::DatabaseError,
        Self::DatabasePoolTimeout,
        Self::DatabaseNotFound,
    ];

    // 1xxx: rejected requests. 2xxx: persistence failures.
    const fn meta(&self) -> Meta {
        match self {
            Self::ValidationError => Meta("VALIDATION_ERROR", 1001, "Request validation failed"),
            Self::JsonExtraction => Meta("JSON_EXTRACTION", 1003, "Failed to parse request body"),
            Self::NotFound => Meta("NOT_FOUND", 1004, "Resource not found"),
            Self::InternalError => Meta("INTERNAL_ERROR", 1005, "An internal server error occurred"),
            Self::Conflict => Meta("CONFLICT", 1008, "Resource already exists"),
            Self::DatabaseNotFound => Meta("DATABASE_NOT_FOUND", 2001, "Record not found"),
            Self::DatabaseError => Meta("DATABASE_ERROR", 2003, "Database operation failed"),
            Self::DatabasePoolTimeout => {
                Meta("DATABASE_POOL_TIMEOUT", 2013, "Database is busy, try again later")
            }
        }
    }

    pub const fn as_str(&self) -> &'static str {
        self.meta().0
    }

    /// Numeric code attached to structured log events.
    pub const fn code(&self) -> i32 {
        self.meta().1
    }

    pub const fn default_message(&self) -> &'static str {
        self.meta().2
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
