//! Schedule Routes
//!
//! - GET /api/schedules/ - List, earliest start first
//! - POST /api/schedules/ - Create (optional course must exist)
//! - GET /api/schedules/:id - Get one
//! - PUT /api/schedules/:id - Update
//! - DELETE /api/schedules/:id - Delete

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::{Schedule, ScheduleInput};
use crate::server::dto::MessageResponse;
use crate::server::error::ServerResult;
use crate::server::state::{AppState, CurrentUser};

/// GET /api/schedules/
pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Json<Vec<Schedule>> {
    Json(state.store.read().await.list_schedules(user.id()))
}

/// GET /api/schedules/:id
pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ServerResult<Json<Schedule>> {
    Ok(Json(state.store.read().await.get_schedule(user.id(), &id)?))
}

/// POST /api/schedules/
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    payload: Result<Json<ScheduleInput>, JsonRejection>,
) -> ServerResult<Json<Schedule>> {
    let Json(input) = payload?;
    if input.end_time < input.start_time {
        tracing::debug!(title = %input.title, "Schedule ends before it starts");
    }

    let schedule = state
        .store
        .write()
        .await
        .create_schedule(user.id(), input)?;

    tracing::info!(id = %schedule.id, title = %schedule.title, "Schedule created");
    Ok(Json(schedule))
}

/// PUT /api/schedules/:id
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<ScheduleInput>, JsonRejection>,
) -> ServerResult<Json<Schedule>> {
    let Json(input) = payload?;
    let schedule = state
        .store
        .write()
        .await
        .update_schedule(user.id(), &id, input)?;
    Ok(Json(schedule))
}

/// DELETE /api/schedules/:id
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ServerResult<Json<MessageResponse>> {
    state.store.write().await.delete_schedule(user.id(), &id)?;
    Ok(Json(MessageResponse::new("Schedule deleted successfully")))
}
