//! Application State
//!
//! Shared state accessible by all handlers, plus the bearer-token extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use super::error::ServerError;
use super::store::Store;
use crate::models::UserProfile;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::new())),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// The user a request's bearer token belongs to
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(ServerError::credentials)?;

        let store = state.store.read().await;
        store
            .user_for_token(token)
            .map(CurrentUser)
            .ok_or_else(ServerError::credentials)
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
