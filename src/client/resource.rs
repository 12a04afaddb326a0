//! Entity collection endpoints
//!
//! The three entity domains share one route shape:
//!
//! - `GET    {collection}`        list
//! - `POST   {collection}`        create
//! - `GET    {collection}{id}`    fetch one
//! - `PUT    {collection}{id}`    update
//! - `DELETE {collection}{id}`    delete
//!
//! Assignments additionally expose `PATCH {collection}{id}/complete`.

use reqwest::Method;
use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;

use super::{ApiClient, ClientResult};
use crate::models::{
    Assignment, AssignmentInput, CompletionStatus, Course, CourseInput, Entity, Schedule,
    ScheduleInput,
};

/// An entity collection exposed by the backend
pub trait Resource: Send + Sync + 'static {
    type Entity: Entity;
    type Input: Serialize + Clone + Debug + Send + Sync;

    /// Collection path, with trailing slash
    const COLLECTION: &'static str;
    /// Lowercase singular noun, e.g. "course"
    const SINGULAR: &'static str;
    /// Lowercase plural noun, e.g. "courses"
    const PLURAL: &'static str;
    /// Capitalized singular noun, e.g. "Course"
    const TITLE: &'static str;
}

/// Marker for `/api/courses/`
#[derive(Debug)]
pub struct Courses;

/// Marker for `/api/assignments/`
#[derive(Debug)]
pub struct Assignments;

/// Marker for `/api/schedules/`
#[derive(Debug)]
pub struct Schedules;

impl Resource for Courses {
    type Entity = Course;
    type Input = CourseInput;
    const COLLECTION: &'static str = "/api/courses/";
    const SINGULAR: &'static str = "course";
    const PLURAL: &'static str = "courses";
    const TITLE: &'static str = "Course";
}

impl Resource for Assignments {
    type Entity = Assignment;
    type Input = AssignmentInput;
    const COLLECTION: &'static str = "/api/assignments/";
    const SINGULAR: &'static str = "assignment";
    const PLURAL: &'static str = "assignments";
    const TITLE: &'static str = "Assignment";
}

impl Resource for Schedules {
    type Entity = Schedule;
    type Input = ScheduleInput;
    const COLLECTION: &'static str = "/api/schedules/";
    const SINGULAR: &'static str = "schedule";
    const PLURAL: &'static str = "schedules";
    const TITLE: &'static str = "Schedule";
}

/// CRUD facade over one entity collection
pub struct ResourceApi<'a, R> {
    client: &'a ApiClient,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceApi<'a, R> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &str) -> String {
        format!("{}{}", R::COLLECTION, urlencoding::encode(id))
    }

    /// Fetch the whole collection
    pub async fn list_all(&self) -> ClientResult<Vec<R::Entity>> {
        let request = self.client.request(Method::GET, R::COLLECTION);
        self.client.send_json(request).await
    }

    /// Fetch one entity
    pub async fn get_by_id(&self, id: &str) -> ClientResult<R::Entity> {
        let request = self.client.request(Method::GET, &Self::item_path(id));
        self.client.send_json(request).await
    }

    /// Create an entity; the backend assigns the id
    pub async fn create(&self, input: &R::Input) -> ClientResult<R::Entity> {
        let request = self.client.request(Method::POST, R::COLLECTION).json(input);
        let created: R::Entity = self.client.send_json(request).await?;

        tracing::info!(kind = R::SINGULAR, id = created.id(), "Created");
        Ok(created)
    }

    /// Replace the editable fields of an entity
    pub async fn update(&self, id: &str, input: &R::Input) -> ClientResult<R::Entity> {
        let request = self
            .client
            .request(Method::PUT, &Self::item_path(id))
            .json(input);
        let updated: R::Entity = self.client.send_json(request).await?;

        tracing::info!(kind = R::SINGULAR, id, "Updated");
        Ok(updated)
    }

    /// Delete an entity
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let request = self.client.request(Method::DELETE, &Self::item_path(id));
        self.client.send_unit(request).await?;

        tracing::info!(kind = R::SINGULAR, id, "Deleted");
        Ok(())
    }
}

impl ResourceApi<'_, Assignments> {
    /// Flip the completed flag server-side.
    ///
    /// Not idempotent in its result: two calls return opposite states.
    pub async fn toggle_complete(&self, id: &str) -> ClientResult<CompletionStatus> {
        let path = format!("{}/complete", Self::item_path(id));
        let request = self.client.request(Method::PATCH, &path);
        let status: CompletionStatus = self.client.send_json(request).await?;

        tracing::info!(id, completed = status.completed, "Toggled assignment");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_escapes_id() {
        assert_eq!(
            ResourceApi::<Courses>::item_path("abc123"),
            "/api/courses/abc123"
        );
        assert_eq!(
            ResourceApi::<Schedules>::item_path("a/b c"),
            "/api/schedules/a%2Fb%20c"
        );
    }
}
