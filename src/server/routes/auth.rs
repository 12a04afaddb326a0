//! Auth Routes
//!
//! - POST /api/auth/register - Create an account
//! - POST /api/auth/login - Exchange form credentials for a bearer token
//! - GET /api/auth/me - The token's user

use axum::{
    extract::{rejection::FormRejection, rejection::JsonRejection, State},
    Form, Json,
};
use std::sync::Arc;

use crate::models::{AccessToken, NewUser, UserProfile};
use crate::server::dto::LoginForm;
use crate::server::error::ServerResult;
use crate::server::state::{AppState, CurrentUser};

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ServerResult<Json<UserProfile>> {
    let Json(user) = payload?;
    let profile = state.store.write().await.register(user)?;
    Ok(Json(profile))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ServerResult<Json<AccessToken>> {
    let Form(form) = form?;
    let token = state
        .store
        .write()
        .await
        .login(&form.username, &form.password)?;
    Ok(Json(token))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Json<UserProfile> {
    Json(user.0)
}
