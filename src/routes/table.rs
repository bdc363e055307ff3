//! Recorded route bindings.

use std::any::{type_name, TypeId};
use std::fmt;

use axum::handler::Handler;
use axum::http::Method;

use super::{pattern, RouteRegistrar};
use crate::error::RouteError;

/// Identity of a handler function.
///
/// Every Rust function item has its own type, so two handlers are the same
/// function exactly when their `TypeId`s match.
#[derive(Clone, Copy)]
pub struct HandlerId {
    type_id: TypeId,
    name: &'static str,
}

impl HandlerId {
    /// Identity of handler type `H`.
    pub fn of<H: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<H>(),
            name: type_name::<H>(),
        }
    }

    /// Identity of the handler `_handler`.
    pub fn of_val<H: 'static>(_handler: &H) -> Self {
        Self::of::<H>()
    }

    /// Fully qualified type name of the handler.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for HandlerId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for HandlerId {}

impl fmt::Debug for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A single method + path binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// URL path pattern.
    pub path: String,
    /// Handler bound to the route.
    pub handler: HandlerId,
}

impl Route {
    /// Create a route.
    pub fn new(method: Method, path: impl Into<String>, handler: HandlerId) -> Self {
        Self {
            method,
            path: path.into(),
            handler,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<7} {}", self.method.as_str(), self.path)
    }
}

/// Ordered set of routes with unique `(method, path)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route, rejecting malformed patterns, duplicates, and paths
    /// that overlap a bound pattern.
    ///
    /// The table is left unchanged on error.
    pub fn insert(&mut self, route: Route) -> Result<(), RouteError> {
        pattern::validate(&route.path)?;

        if self.contains(&route.method, &route.path) {
            return Err(RouteError::DuplicateRoute {
                method: route.method.to_string(),
                path: route.path,
            });
        }

        if let Some(existing) = self
            .routes
            .iter()
            .find(|r| pattern::conflicts(&r.path, &route.path))
        {
            return Err(RouteError::ConflictingRoute {
                path: route.path,
                existing: existing.path.clone(),
            });
        }

        self.routes.push(route);
        Ok(())
    }

    /// Whether `(method, path)` is bound.
    pub fn contains(&self, method: &Method, path: &str) -> bool {
        self.find(method, path).is_some()
    }

    /// Look up the route bound to `(method, path)`.
    pub fn find(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| &r.method == method && r.path == path)
    }

    /// Routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// `(method, path)` pairs in registration order.
    pub fn bindings(&self) -> Vec<(Method, &str)> {
        self.routes
            .iter()
            .map(|r| (r.method.clone(), r.path.as_str()))
            .collect()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are bound.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<S> RouteRegistrar<S> for RouteTable {
    fn register<H, T>(&mut self, method: Method, path: &str, _handler: H) -> Result<(), RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.insert(Route::new(method, path, HandlerId::of::<H>()))
    }
}
