//! Route registration capability and its axum implementation.

use std::mem;

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{on, MethodFilter};
use axum::Router;
use tracing::debug;

use super::table::{HandlerId, Route, RouteTable};
use crate::error::RouteError;

/// Something handlers can be bound onto.
///
/// `S` is the router state the handlers extract from.
pub trait RouteRegistrar<S> {
    /// Bind `handler` to `method` requests on `path`.
    fn register<H, T>(&mut self, method: Method, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler<T, S>,
        T: 'static;

    /// Bind `handler` to GET requests on `path`.
    fn get<H, T>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.register(Method::GET, path, handler)
    }
}

/// Builds an [`axum::Router`] from registrations, keeping a table of what
/// was bound.
pub struct RouterBuilder<S = ()> {
    router: Router<S>,
    table: RouteTable,
}

impl<S> RouterBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create a builder with no routes.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            table: RouteTable::new(),
        }
    }

    /// Routes bound so far.
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Finish building and return the router.
    pub fn into_router(self) -> Router<S> {
        self.router
    }
}

impl<S> Default for RouterBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RouteRegistrar<S> for RouterBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn register<H, T>(&mut self, method: Method, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let filter =
            MethodFilter::try_from(method.clone()).map_err(|_| RouteError::CapabilityMissing {
                method: method.to_string(),
            })?;

        // The table rejects malformed and overlapping patterns, so axum never
        // sees a route it would panic on.
        self.table
            .insert(Route::new(method.clone(), path, HandlerId::of::<H>()))?;

        let router = mem::take(&mut self.router);
        self.router = router.route(path, on(filter, handler));

        debug!(method = %method, path, "route bound");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn ping() -> &'static str {
        "pong"
    }

    async fn echo() -> &'static str {
        "echo"
    }

    #[tokio::test]
    async fn builder_binds_handlers_onto_router() {
        let mut builder = RouterBuilder::<()>::new();
        builder.get("/ping", ping).unwrap();
        builder.register(Method::POST, "/ping", echo).unwrap();

        assert_eq!(builder.routes().len(), 2);

        let app = builder.into_router();
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn builder_rejects_duplicate_without_panicking() {
        let mut builder = RouterBuilder::<()>::new();
        builder.get("/ping", ping).unwrap();

        let err = builder.get("/ping", echo).unwrap_err();
        assert!(matches!(err, RouteError::DuplicateRoute { .. }));
        assert_eq!(builder.routes().len(), 1);
    }

    #[test]
    fn builder_reports_unbindable_method() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        let mut builder = RouterBuilder::<()>::new();

        let err = builder.register(purge, "/cache", ping).unwrap_err();
        assert_eq!(
            err,
            RouteError::CapabilityMissing {
                method: "PURGE".to_string()
            }
        );
        assert!(builder.routes().is_empty());
    }

    #[test]
    fn builder_rejects_relative_path_without_panicking() {
        let mut builder = RouterBuilder::<()>::new();
        let err = builder.get("ping", ping).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPath { .. }));
    }

    #[test]
    fn builder_rejects_overlapping_params_without_panicking() {
        let mut builder = RouterBuilder::<()>::new();
        builder.get("/x/:id", ping).unwrap();

        let err = builder.get("/x/:name", echo).unwrap_err();
        assert_eq!(
            err,
            RouteError::ConflictingRoute {
                path: "/x/:name".to_string(),
                existing: "/x/:id".to_string(),
            }
        );

        let err = builder.get("/a/*x/b", ping).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPath { .. }));
        assert_eq!(builder.routes().len(), 1);
    }
}
