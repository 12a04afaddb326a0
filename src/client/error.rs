//! Client error types
//!
//! Classifies every failed call into the planner's error taxonomy and keeps
//! the backend's human-readable `detail` so views can show it verbatim.

use thiserror::Error;

/// Errors returned by the API client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never reached the backend or no response came back
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected the payload (400/422)
    #[error("Validation error: {}", .detail.as_deref().unwrap_or("request rejected"))]
    Validation { detail: Option<String> },

    /// The referenced id does not exist (404)
    #[error("Not found: {}", .detail.as_deref().unwrap_or("resource not found"))]
    NotFound { detail: Option<String> },

    /// Missing, expired, or rejected credentials (401/403)
    #[error("Not authorized: {}", .detail.as_deref().unwrap_or("credentials rejected"))]
    Unauthorized { detail: Option<String> },

    /// Any other non-success status
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no details"))]
    Api { status: u16, detail: Option<String> },

    /// The response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Build the error for a non-success response
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);

        match status {
            400 | 422 => ClientError::Validation { detail },
            401 | 403 => ClientError::Unauthorized { detail },
            404 => ClientError::NotFound { detail },
            _ => ClientError::Api { status, detail },
        }
    }

    /// The backend-provided message, if the response carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Validation { detail }
            | ClientError::NotFound { detail }
            | ClientError::Unauthorized { detail }
            | ClientError::Api { detail, .. } => detail.as_deref(),
            ClientError::Network(_) | ClientError::Decode(_) => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Pull `detail` out of an error body.
///
/// Plain string details are returned as-is; structured validation details
/// (a list of `{loc, msg}` objects) are flattened into one line.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .and_then(|loc| loc.last())
                        .and_then(|last| last.as_str());
                    Some(match field {
                        Some(field) => format!("{}: {}", field, msg),
                        None => msg.to_string(),
                    })
                })
                .collect();

            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let body = r#"{"detail": "Course not found"}"#;

        assert!(matches!(
            ClientError::from_response(404, body),
            ClientError::NotFound { .. }
        ));
        assert!(matches!(
            ClientError::from_response(400, body),
            ClientError::Validation { .. }
        ));
        assert!(matches!(
            ClientError::from_response(422, body),
            ClientError::Validation { .. }
        ));
        assert!(matches!(
            ClientError::from_response(401, body),
            ClientError::Unauthorized { .. }
        ));
        assert!(matches!(
            ClientError::from_response(500, body),
            ClientError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_detail_is_verbatim() {
        let err = ClientError::from_response(400, r#"{"detail": "Email already registered"}"#);
        assert_eq!(err.detail(), Some("Email already registered"));
        assert_eq!(err.to_string(), "Validation error: Email already registered");
    }

    #[test]
    fn test_structured_detail_flattened() {
        let body = r#"{"detail": [
            {"loc": ["body", "title"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "due_date"], "msg": "invalid datetime", "type": "value_error"}
        ]}"#;

        let err = ClientError::from_response(422, body);
        assert_eq!(
            err.detail(),
            Some("title: field required; due_date: invalid datetime")
        );
    }

    #[test]
    fn test_missing_detail() {
        let err = ClientError::from_response(502, "Bad Gateway");
        assert_eq!(err.detail(), None);
        assert_eq!(err.to_string(), "API error 502: no details");
    }
}
