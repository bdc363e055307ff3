//! Application assembly from configuration.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{create_router, AppState, RouterOptions};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::metrics;
use crate::routes::RouteInitializer;
use crate::users::InMemoryUserStore;

/// Build the user store described by `config`.
pub fn build_store(config: &Config) -> Result<InMemoryUserStore> {
    match &config.users_file {
        Some(path) => Ok(InMemoryUserStore::from_json_file(path)?),
        None => {
            warn!("USERS_FILE not set, serving an empty user list");
            Ok(InMemoryUserStore::new())
        }
    }
}

/// Build the full router: route table, middleware, state, and metrics.
pub fn build_app(config: &Config, metrics_handle: Option<PrometheusHandle>) -> Result<Router> {
    let state = AppState::new(Arc::new(build_store(config)?));
    let initializer = RouteInitializer::new(config.prefix()?);
    let options = RouterOptions {
        cors_allow_any: config.cors_allow_any,
    };

    let mut router = create_router(state, &initializer, &options)?;

    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::metrics_router(handle));
        info!("Metrics available on {}", metrics::PATH_METRICS);
    }

    Ok(router)
}

/// Bind the listener for `config`.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr: SocketAddr = config
        .listen_addr()
        .map_err(ServiceError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    Ok(listener)
}

/// Serve `router` on `listener` until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(crate::utils::shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
