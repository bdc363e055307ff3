//! HTTP router assembly.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::AppState;
use crate::error::RouteError;
use crate::routes::{RouteInitializer, RouterBuilder};

/// Options applied around the route table.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Allow cross-origin requests from any origin.
    pub cors_allow_any: bool,
}

/// Create the API router.
pub fn create_router(
    state: AppState,
    initializer: &RouteInitializer,
    options: &RouterOptions,
) -> Result<Router, RouteError> {
    let mut builder = RouterBuilder::<AppState>::new();
    initializer.initialize(&mut builder)?;

    let mut router = builder.into_router().layer(TraceLayer::new_for_http());
    if options.cors_allow_any {
        router = router.layer(CorsLayer::permissive());
    }

    Ok(router.with_state(state))
}
