//! Course Routes
//!
//! - GET /api/courses/ - List the user's courses
//! - POST /api/courses/ - Create a course
//! - GET /api/courses/:id - Get a course
//! - PUT /api/courses/:id - Update a course
//! - DELETE /api/courses/:id - Delete a course (no cascade)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::{Course, CourseInput};
use crate::server::dto::MessageResponse;
use crate::server::error::ServerResult;
use crate::server::state::{AppState, CurrentUser};

/// GET /api/courses/
pub async fn list_courses(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Json<Vec<Course>> {
    Json(state.store.read().await.list_courses(user.id()))
}

/// GET /api/courses/:id
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ServerResult<Json<Course>> {
    Ok(Json(state.store.read().await.get_course(user.id(), &id)?))
}

/// POST /api/courses/
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> ServerResult<Json<Course>> {
    let Json(input) = payload?;
    let course = state.store.write().await.create_course(user.id(), input)?;

    tracing::info!(id = %course.id, name = %course.course_name, "Course created");
    Ok(Json(course))
}

/// PUT /api/courses/:id
pub async fn update_course(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> ServerResult<Json<Course>> {
    let Json(input) = payload?;
    let course = state
        .store
        .write()
        .await
        .update_course(user.id(), &id, input)?;
    Ok(Json(course))
}

/// DELETE /api/courses/:id
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ServerResult<Json<MessageResponse>> {
    state.store.write().await.delete_course(user.id(), &id)?;

    tracing::info!(%id, "Course deleted");
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
