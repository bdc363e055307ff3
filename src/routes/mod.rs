//! Route table for the service.
//!
//! | Method | Path               | Handler        |
//! |--------|--------------------|----------------|
//! | GET    | `/health`          | `health_check` |
//! | GET    | `{prefix}/users`   | `get_users`    |
//!
//! `{prefix}` defaults to `/api/v1`. Routes are bound once at startup through
//! a [`RouteRegistrar`]; binding the same method and path twice is rejected.

mod initializer;
mod pattern;
mod prefix;
mod registrar;
mod table;

pub use initializer::{initialize, RouteInitializer};
pub use prefix::ApiPrefix;
pub use registrar::{RouteRegistrar, RouterBuilder};
pub use table::{HandlerId, Route, RouteTable};

/// Health check path. Not versioned.
pub const PATH_HEALTH: &str = "/health";
/// User listing path, relative to the versioned prefix.
pub const PATH_USERS: &str = "/users";
