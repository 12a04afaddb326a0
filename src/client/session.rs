//! Request credentials
//!
//! A `Session` is handed to the client when it is built and decides which
//! `Authorization` header every request carries.

use reqwest::RequestBuilder;

/// Credentials attached to outgoing requests
#[derive(Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// No credentials; only register and login will succeed
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Authenticate every request with the given bearer token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Build from a token that may be absent (e.g. read from storage)
    pub fn from_token(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Attach the credentials to a request
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let session = Session::bearer("s3cr3t");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("authenticated: true"));
    }

    #[test]
    fn test_apply_sets_bearer_header() {
        let client = reqwest::Client::new();
        let request = Session::bearer("abc")
            .apply(client.get("http://localhost/api/courses/"))
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn test_anonymous_sends_no_header() {
        let client = reqwest::Client::new();
        let request = Session::anonymous()
            .apply(client.get("http://localhost/api/courses/"))
            .build()
            .unwrap();

        assert!(request.headers().get("authorization").is_none());
    }
}
