//! Assignment Routes
//!
//! - GET /api/assignments/ - List, earliest due first
//! - POST /api/assignments/ - Create (course must exist)
//! - GET /api/assignments/:id - Get one
//! - PUT /api/assignments/:id - Update editable fields
//! - PATCH /api/assignments/:id/complete - Flip the completed flag
//! - DELETE /api/assignments/:id - Delete

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::{Assignment, AssignmentInput, CompletionStatus};
use crate::server::dto::MessageResponse;
use crate::server::error::ServerResult;
use crate::server::state::{AppState, CurrentUser};

/// GET /api/assignments/
pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Json<Vec<Assignment>> {
    Json(state.store.read().await.list_assignments(user.id()))
}

/// GET /api/assignments/:id
pub async fn get_assignment(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ServerResult<Json<Assignment>> {
    Ok(Json(state.store.read().await.get_assignment(user.id(), &id)?))
}

/// POST /api/assignments/
pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    payload: Result<Json<AssignmentInput>, JsonRejection>,
) -> ServerResult<Json<Assignment>> {
    let Json(input) = payload?;
    let assignment = state
        .store
        .write()
        .await
        .create_assignment(user.id(), input)?;

    tracing::info!(id = %assignment.id, title = %assignment.title, "Assignment created");
    Ok(Json(assignment))
}

/// PUT /api/assignments/:id
pub async fn update_assignment(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<AssignmentInput>, JsonRejection>,
) -> ServerResult<Json<Assignment>> {
    let Json(input) = payload?;
    let assignment = state
        .store
        .write()
        .await
        .update_assignment(user.id(), &id, input)?;
    Ok(Json(assignment))
}

/// PATCH /api/assignments/:id/complete
pub async fn toggle_complete(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ServerResult<Json<CompletionStatus>> {
    let status = state
        .store
        .write()
        .await
        .toggle_assignment(user.id(), &id)?;

    tracing::info!(%id, completed = status.completed, "Assignment toggled");
    Ok(Json(status))
}

/// DELETE /api/assignments/:id
pub async fn delete_assignment(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ServerResult<Json<MessageResponse>> {
    state
        .store
        .write()
        .await
        .delete_assignment(user.id(), &id)?;
    Ok(Json(MessageResponse::new("Assignment deleted successfully")))
}
