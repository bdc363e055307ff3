//! Unified error types for the user service.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Unified error type for the user service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Route registration error.
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// User store error.
    #[error("user store error: {0}")]
    User(#[from] UserError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Route registration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The registrar cannot bind handlers for this HTTP method.
    #[error("registrar cannot bind {method} routes")]
    CapabilityMissing {
        /// The method that could not be bound.
        method: String,
    },

    /// A route with the same method and path is already registered.
    #[error("duplicate route: {method} {path}")]
    DuplicateRoute {
        /// Method of the existing route.
        method: String,
        /// Path of the existing route.
        path: String,
    },

    /// The path is not a pattern the router accepts.
    #[error("invalid route path {path:?}: {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The path overlaps an already bound pattern.
    #[error("route {path} conflicts with {existing}")]
    ConflictingRoute {
        /// The rejected path.
        path: String,
        /// The bound path it overlaps.
        existing: String,
    },

    /// The versioned prefix is malformed.
    #[error("invalid api prefix {prefix:?}: {reason}")]
    InvalidPrefix {
        /// The offending prefix.
        prefix: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// User store errors.
#[derive(Error, Debug)]
pub enum UserError {
    /// The users file could not be read.
    #[error("failed to load users from {path}: {reason}")]
    Load {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying reason.
        reason: String,
    },

    /// The users document is not valid JSON for a user list.
    #[error("failed to parse users: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two users share an id.
    #[error("duplicate user id {0}")]
    DuplicateId(u64),

    /// The store cannot serve requests right now.
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Error returned from HTTP handlers, rendered as a JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Failure in the user store.
    #[error(transparent)]
    User(#[from] UserError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::User(UserError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::User(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = %status, error = %self, "request failed");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
