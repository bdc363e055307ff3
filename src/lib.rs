//! User service: a health check and a versioned user listing over HTTP.
//!
//! The service exposes two routes:
//!
//! ```text
//! GET /health          -> health_check
//! GET /api/v1/users    -> get_users
//! ```
//!
//! Routes are bound once at startup by [`routes::RouteInitializer`] onto any
//! [`routes::RouteRegistrar`]; the axum adapter is [`routes::RouterBuilder`].
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`routes`]: Route table, prefix and initializer
//! - [`api`]: HTTP handlers and router assembly
//! - [`users`]: User records and storage
//! - [`metrics`]: Prometheus metrics
//! - [`server`]: Startup assembly from configuration
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod users;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
