//! HTTP API module for the health check and user listing endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, RouterOptions};
