//! Dev server error types
//!
//! Every failure becomes `{"detail": "..."}` with the matching status, the
//! same body shape the client extracts notifications from.

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Request conflicts with existing data (400)
    #[error("{0}")]
    BadRequest(String),

    /// Body could not be parsed or failed field checks (422)
    #[error("{0}")]
    Validation(String),

    /// Missing or rejected credentials (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Unknown id, or owned by another user (404)
    #[error("{0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ServerError {
    pub fn credentials() -> Self {
        ServerError::Unauthorized("Could not validate credentials".to_string())
    }

    pub fn not_found(title: &str) -> Self {
        ServerError::NotFound(format!("{} not found", title))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ServerError {
    fn from(rejection: FormRejection) -> Self {
        ServerError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), detail = %self, "Request rejected");
        }

        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::BadRequest("Email already registered".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Validation("bad".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ServerError::credentials().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServerError::not_found("Course").to_string(), "Course not found");
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ServerError::credentials().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
