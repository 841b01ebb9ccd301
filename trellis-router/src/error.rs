//! Error types for routing operations
//!
//! Most routing conditions are recovered locally: a malformed path yields an
//! empty match, an unmatched path renders the not-found placeholder and a
//! stale outlet write is reported as `Ok(false)`. The variants here cover
//! what callers still have to handle.
//!
//! # Error Codes
//!
//! Error codes are represented by the [`RouterErrorCode`] enum. When
//! serialized, codes are converted to SCREAMING_SNAKE_CASE strings.
//!
//! # Example
//! ```rust,ignore
//! use trellis_router::{RouterError, RouterErrorCode};
//!
//! let error = RouterError::new(RouterErrorCode::InvalidRoute, "wildcard must be last");
//! let error = RouterError::redirect_limit(5, "/login"); // Convenience method
//! assert!(error.is_fatal());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Type-safe error codes for routing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouterErrorCode {
    /// A path could not be parsed or a reverse lookup missed a parameter
    InvalidPath,
    /// A route record cannot be compiled into the route tree
    InvalidRoute,
    /// A named route does not exist
    RouteNotFound,
    /// Chained redirects exceeded the configured ceiling
    RedirectLimitExceeded,
    /// A lazy component loader rejected
    LoaderFailed,
    /// A navigation middleware failed
    MiddlewareError,
    /// Configuration could not be (de)serialized
    SerializationError,
    /// An unexpected internal error occurred
    InternalError,
}

impl RouterErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPath => "INVALID_PATH",
            Self::InvalidRoute => "INVALID_ROUTE",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::RedirectLimitExceeded => "REDIRECT_LIMIT_EXCEEDED",
            Self::LoaderFailed => "LOADER_FAILED",
            Self::MiddlewareError => "MIDDLEWARE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for RouterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Router error with type-safe code and message.
///
/// # Example
/// ```rust,ignore
/// use trellis_router::RouterError;
///
/// let error = RouterError::loader_failed("/settings", "chunk request timed out")
///     .with_details(serde_json::json!({"attempt": 1}));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("[{code}] {message}")]
pub struct RouterError {
    /// Type-safe error code
    pub code: RouterErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (JSON value)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Optional underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl RouterError {
    /// Create a new error with code and message.
    pub fn new(code: RouterErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            cause: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Add a cause string for debugging.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Only an exhausted redirect ceiling is fatal to a navigation chain.
    pub fn is_fatal(&self) -> bool {
        self.code == RouterErrorCode::RedirectLimitExceeded
    }

    // Convenience constructors

    /// Create an INVALID_PATH error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(RouterErrorCode::InvalidPath, message)
    }

    /// Create an INVALID_ROUTE error.
    pub fn invalid_route(message: impl Into<String>) -> Self {
        Self::new(RouterErrorCode::InvalidRoute, message)
    }

    /// Create a ROUTE_NOT_FOUND error for a named route.
    pub fn route_not_found(name: &str) -> Self {
        Self::new(
            RouterErrorCode::RouteNotFound,
            format!("Route '{}' not found", name),
        )
    }

    /// Create a REDIRECT_LIMIT_EXCEEDED error.
    pub fn redirect_limit(max_redirects: usize, path: &str) -> Self {
        Self::new(
            RouterErrorCode::RedirectLimitExceeded,
            format!(
                "Exceeded {} chained redirects while navigating to '{}'",
                max_redirects, path
            ),
        )
    }

    /// Create a LOADER_FAILED error.
    pub fn loader_failed(path: &str, message: impl Into<String>) -> Self {
        Self::new(RouterErrorCode::LoaderFailed, message)
            .with_details(serde_json::json!({ "path": path }))
    }

    /// Create a MIDDLEWARE_ERROR error.
    pub fn middleware(message: impl Into<String>) -> Self {
        Self::new(RouterErrorCode::MiddlewareError, message)
    }

    /// Create a SERIALIZATION_ERROR error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(RouterErrorCode::SerializationError, message)
    }

    /// Create an INTERNAL_ERROR error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RouterErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for RouterError {
    fn from(err: url::ParseError) -> Self {
        Self::invalid_path(format!("URL parse error: {}", err))
    }
}

/// Result type alias for routing operations.
pub type RouterResult<T> = Result<T, RouterError>;
