use reqwest::Method;

use super::{ApiClient, ClientResult};
use crate::models::{AccessToken, NewUser, UserProfile};

/// Facade for `/api/auth/*`
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, user: &NewUser) -> ClientResult<UserProfile> {
        let request = self
            .client
            .request(Method::POST, "/api/auth/register")
            .json(user);

        let profile: UserProfile = self.client.send_json(request).await?;
        tracing::info!(email = %profile.email, "Registered account");
        Ok(profile)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Credentials are sent form-encoded (`username`, `password`).
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AccessToken> {
        let request = self
            .client
            .request(Method::POST, "/api/auth/login")
            .form(&[("username", email), ("password", password)]);

        self.client.send_json(request).await
    }

    /// The user the current session belongs to
    pub async fn current_user(&self) -> ClientResult<UserProfile> {
        let request = self.client.request(Method::GET, "/api/auth/me");
        self.client.send_json(request).await
    }
}
