//! Binds the service's routes onto a registrar.

use tracing::{debug, info};

use super::{ApiPrefix, RouteRegistrar, PATH_HEALTH, PATH_USERS};
use crate::api::handlers::{get_users, health_check};
use crate::api::AppState;
use crate::error::RouteError;
use crate::metrics;

/// Registers the health check and the versioned user routes.
#[derive(Debug, Clone, Default)]
pub struct RouteInitializer {
    prefix: ApiPrefix,
}

impl RouteInitializer {
    /// Create an initializer that mounts versioned routes under `prefix`.
    pub fn new(prefix: ApiPrefix) -> Self {
        Self { prefix }
    }

    /// Bind every route onto `app`.
    ///
    /// Fails on the first route `app` refuses. Registering onto an app that
    /// already holds these routes fails with [`RouteError::DuplicateRoute`].
    pub fn initialize<R>(&self, app: &mut R) -> Result<(), RouteError>
    where
        R: RouteRegistrar<AppState>,
    {
        app.get(PATH_HEALTH, health_check)?;
        metrics::inc_routes_registered();
        debug!(path = PATH_HEALTH, "registered health check");

        let users = self.prefix.join(PATH_USERS);
        app.get(&users, get_users)?;
        metrics::inc_routes_registered();
        debug!(path = %users, "registered user listing");

        info!(prefix = %self.prefix, "routes initialized");
        Ok(())
    }
}

/// Bind every route onto `app` under the default `/api/v1` prefix.
pub fn initialize<R>(app: &mut R) -> Result<(), RouteError>
where
    R: RouteRegistrar<AppState>,
{
    RouteInitializer::default().initialize(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{HandlerId, RouteTable};
    use axum::handler::Handler;
    use axum::http::Method;
    use pretty_assertions::assert_eq;

    /// Registrar that can only bind POST routes.
    #[derive(Default)]
    struct PostOnly {
        table: RouteTable,
    }

    impl RouteRegistrar<AppState> for PostOnly {
        fn register<H, T>(
            &mut self,
            method: Method,
            path: &str,
            handler: H,
        ) -> Result<(), RouteError>
        where
            H: Handler<T, AppState>,
            T: 'static,
        {
            if method != Method::POST {
                return Err(RouteError::CapabilityMissing {
                    method: method.to_string(),
                });
            }
            RouteRegistrar::<AppState>::register(&mut self.table, method, path, handler)
        }
    }

    #[test]
    fn initialize_registers_both_routes() {
        let mut app = RouteTable::new();
        assert!(app.is_empty());

        initialize(&mut app).unwrap();

        assert_eq!(
            app.bindings(),
            vec![(Method::GET, "/health"), (Method::GET, "/api/v1/users")]
        );
    }

    #[test]
    fn routes_are_bound_to_the_service_handlers() {
        let mut app = RouteTable::new();
        initialize(&mut app).unwrap();

        let health = app.find(&Method::GET, "/health").unwrap();
        assert_eq!(health.handler, HandlerId::of_val(&health_check));

        let users = app.find(&Method::GET, "/api/v1/users").unwrap();
        assert_eq!(users.handler, HandlerId::of_val(&get_users));
        assert_ne!(health.handler, users.handler);
    }

    #[test]
    fn initialize_twice_is_rejected() {
        let mut app = RouteTable::new();
        initialize(&mut app).unwrap();

        let err = initialize(&mut app).unwrap_err();

        assert_eq!(
            err,
            RouteError::DuplicateRoute {
                method: "GET".to_string(),
                path: "/health".to_string(),
            }
        );
        assert_eq!(app.len(), 2);
    }

    #[test]
    fn missing_get_capability_fails_instead_of_no_op() {
        let mut app = PostOnly::default();

        let err = initialize(&mut app).unwrap_err();

        assert_eq!(
            err,
            RouteError::CapabilityMissing {
                method: "GET".to_string()
            }
        );
        assert!(app.table.is_empty());
    }

    #[test]
    fn custom_prefix_moves_only_versioned_routes() {
        let mut app = RouteTable::new();
        let initializer = RouteInitializer::new(ApiPrefix::parse("/api/v2").unwrap());

        initializer.initialize(&mut app).unwrap();

        assert!(app.contains(&Method::GET, "/health"));
        assert!(app.contains(&Method::GET, "/api/v2/users"));
        assert!(!app.contains(&Method::GET, "/api/v1/users"));
    }

    #[test]
    fn every_route_but_health_shares_the_prefix() {
        let mut app = RouteTable::new();
        initialize(&mut app).unwrap();

        for route in app.routes() {
            if route.path != PATH_HEALTH {
                assert!(route.path.starts_with("/api/v1/"), "{}", route.path);
            }
        }
    }
}
