//! # Catalog Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  FetchError          one kind for every failed catalog read            │
//! │  ├── resource        products | categories | product                   │
//! │  └── source (cause)  HTTP status | transport | undecodable body        │
//! │                                                                         │
//! │  Display is the message users see:  "Failed to fetch products"         │
//! │  The cause only reaches the logs (via Error::source).                  │
//! │                                                                         │
//! │  LifecycleError      rejected state transitions (retry while Ready)    │
//! │  ConfigError         invalid CatalogConfig                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use thiserror::Error;

// =============================================================================
// Fetch Error
// =============================================================================

/// Which catalog read failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Categories,
    Product,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Products => "products",
            Resource::Categories => "categories",
            Resource::Product => "product",
        };
        f.write_str(name)
    }
}

/// A failed catalog read.
///
/// Non-success status, transport failure and an unreadable body all surface
/// as this one type; callers never branch on the cause.
#[derive(Debug, Error)]
#[error("Failed to fetch {resource}")]
pub struct FetchError {
    resource: Resource,
    #[source]
    cause: FetchCause,
}

#[derive(Debug, Error)]
enum FetchCause {
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("transport error")]
    Transport(#[source] reqwest::Error),

    #[error("invalid response body")]
    Decode(#[source] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

impl FetchError {
    /// The server answered with a non-success status.
    pub fn status(resource: Resource, status: reqwest::StatusCode) -> Self {
        FetchError {
            resource,
            cause: FetchCause::Status(status),
        }
    }

    /// The request never produced a response (DNS, connect, timeout, ...).
    pub fn transport(resource: Resource, err: reqwest::Error) -> Self {
        FetchError {
            resource,
            cause: FetchCause::Transport(err),
        }
    }

    /// The body did not match the expected shape.
    pub fn decode(resource: Resource, err: serde_json::Error) -> Self {
        FetchError {
            resource,
            cause: FetchCause::Decode(err),
        }
    }

    /// The catalog could not be reached for some other reason.
    pub fn unavailable(resource: Resource, reason: impl Into<String>) -> Self {
        FetchError {
            resource,
            cause: FetchCause::Unavailable(reason.into()),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// The HTTP status, when the failure was a non-success response.
    pub fn http_status(&self) -> Option<reqwest::StatusCode> {
        match &self.cause {
            FetchCause::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// Message plus cause chain, for logs.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            detail.push_str(": ");
            detail.push_str(&err.to_string());
            source = err.source();
        }
        detail
    }
}

/// Result type for catalog reads.
pub type FetchResult<T> = Result<T, FetchError>;

// =============================================================================
// Lifecycle Error
// =============================================================================

/// Rejected lifecycle actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The action is not valid in the current state.
    ///
    /// ## When This Occurs
    /// - `retry` when the last load did not fail
    /// - `reload` while a load is in flight
    /// - `retry` on a detail loader that never loaded anything
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

// =============================================================================
// Config Error
// =============================================================================

/// Invalid catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_user_message() {
        let err = FetchError::status(Resource::Products, reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Failed to fetch products");
        assert_eq!(err.http_status(), Some(reqwest::StatusCode::NOT_FOUND));

        let err = FetchError::unavailable(Resource::Categories, "offline");
        assert_eq!(err.to_string(), "Failed to fetch categories");
        assert_eq!(err.http_status(), None);
    }

    #[test]
    fn test_cause_is_kept_as_source() {
        let decode = serde_json::from_str::<Vec<u64>>("{").unwrap_err();
        let err = FetchError::decode(Resource::Product, decode);

        assert_eq!(err.to_string(), "Failed to fetch product");
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.detail().starts_with("Failed to fetch product: invalid response body: "));
    }

    #[test]
    fn test_lifecycle_error_message() {
        let err = LifecycleError::InvalidTransition {
            action: "retry",
            state: "ready",
        };
        assert_eq!(err.to_string(), "Cannot retry while ready");
    }
}
