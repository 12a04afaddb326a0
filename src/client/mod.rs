//! Planner REST API Client
//!
//! HTTP client for the planner backend. One `ApiClient` is built per
//! session and hands out thin per-domain facades:
//!
//! - [`ApiClient::courses`], [`ApiClient::assignments`], [`ApiClient::schedules`]:
//!   CRUD over the three entity collections
//! - [`ApiClient::chat`]: the study assistant
//! - [`ApiClient::auth`]: register, login and the current user
//!
//! The bearer token comes from the [`Session`] given at construction; there
//! is no ambient credential lookup. Calls are never retried.

mod auth;
mod chat;
mod error;
mod resource;
mod session;
mod token_store;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use error::{ClientError, ClientResult};
pub use resource::{Assignments, Courses, Resource, ResourceApi, Schedules};
pub use session::Session;
pub use token_store::{TokenStore, TokenStoreError};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

/// Planner REST API client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a client for the given backend URL and credentials
    pub fn new(base_url: impl Into<String>, session: Session) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("studyplan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url: String = base_url.into();

        Ok(Self {
            http,
            // Normalize: remove trailing slash
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Create a client from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig, session: Session) -> ClientResult<Self> {
        Self::new(&config.base_url, session)
    }

    /// Same backend, different credentials (e.g. right after login)
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn courses(&self) -> ResourceApi<'_, Courses> {
        self.resource()
    }

    pub fn assignments(&self) -> ResourceApi<'_, Assignments> {
        self.resource()
    }

    pub fn schedules(&self) -> ResourceApi<'_, Schedules> {
        self.resource()
    }

    /// CRUD facade for any entity collection
    pub fn resource<R: Resource>(&self) -> ResourceApi<'_, R> {
        ResourceApi::new(self)
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Start a request against `path` with the session's credentials attached
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.session.apply(self.http.request(method, url))
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request whose response body is irrelevant
    pub(crate) async fn send_unit(&self, request: RequestBuilder) -> ClientResult<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<String> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::debug!(%method, %path, error = %e, "Request failed");
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%method, %path, status = status.as_u16(), "API call");

        if status.is_success() {
            Ok(body)
        } else {
            Err(ClientError::from_response(status.as_u16(), &body))
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}
