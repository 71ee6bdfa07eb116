//! # API Error Type
//!
//! Unified error type for the explorer entry points.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Explorer                           │
//! │                                                                         │
//! │  Presentation                 Rust Backend                              │
//! │  ────────────                 ────────────                              │
//! │                                                                         │
//! │  explorer.toggle_favorite(3)                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Entry Point                                                     │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── DbError::QueryFailed("...") ───┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad Input? ──────── ValidationError ──────────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "DATABASE_ERROR", "message": "Database operation failed" }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog fetch failures usually never reach this type: the loaders turn
//! them into a `Failed` view state. `ApiError` is for calls that are
//! rejected outright.

use explorer_catalog::{FetchError, LifecycleError};
use explorer_core::{CoreError, ValidationError};
use explorer_db::DbError;
use serde::Serialize;
use ts_rs::TS;

use crate::state::SettingsError;

/// Error returned from explorer entry points.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_STATE",
///   "message": "Cannot retry while ready"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Local storage failed
    DatabaseError,

    /// The catalog service could not be read
    FetchError,

    /// Action not allowed in the current load state
    InvalidState,

    /// Settings could not be loaded or are invalid
    ConfigError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::InvalidValue { key, reason } => {
                tracing::error!(key = %key, "Invalid stored value: {}", reason);
                ApiError::new(ErrorCode::DatabaseError, "Stored data is invalid")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidAmount { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Keeps the user-facing message; the cause chain goes to the log.
impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        tracing::error!(error = %err.detail(), "Catalog fetch failed");
        let code = match err.http_status() {
            Some(status) if status.as_u16() == 404 => ErrorCode::NotFound,
            _ => ErrorCode::FetchError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        ApiError::new(ErrorCode::InvalidState, err.to_string())
    }
}

impl From<explorer_catalog::ConfigError> for ApiError {
    fn from(err: explorer_catalog::ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
