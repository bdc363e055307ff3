//! HTTP API handlers.

use std::fmt;
use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::metrics;
use crate::users::{InMemoryUserStore, UserStore, UsersResponse};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of users for the listing endpoint.
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Create app state backed by `users`.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryUserStore::new()))
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
    /// Time the check was answered (RFC 3339).
    pub timestamp: String,
}

/// Health check handler - always returns 200.
pub async fn health_check() -> impl IntoResponse {
    let _timer = metrics::track_request("health");

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// User listing handler - returns every user ordered by id.
#[instrument(skip_all)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    let _timer = metrics::track_request("users");

    let users = state.users.list()?;
    debug!(count = users.len(), "listing users");
    metrics::add_users_listed(users.len());

    Ok(Json(UsersResponse::from(users)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::User;

    #[tokio::test]
    async fn get_users_wraps_store_contents() {
        let store = InMemoryUserStore::with_users(vec![User::new(
            1,
            "alice",
            "alice@example.com",
        )])
        .unwrap();
        let state = AppState::new(Arc::new(store));

        let Json(body) = get_users(State(state)).await.unwrap();

        assert_eq!(body.total, 1);
        assert_eq!(body.users[0].name, "alice");
    }

    #[tokio::test]
    async fn default_state_lists_no_users() {
        let Json(body) = get_users(State(AppState::default())).await.unwrap();
        assert_eq!(body.total, 0);
        assert!(body.users.is_empty());
    }
}
