//! Entity list views
//!
//! One `EntityListView` per entity collection. The view owns its collection
//! snapshot and replaces it wholesale after every successful mutation
//! (invalidate and reload); results of mutations are never merged locally.

use crate::client::{ApiClient, Assignments, ClientError, Courses, Resource, Schedules};
use crate::models::{Course, Entity};

use super::drafts::{AssignmentDraft, CourseDraft, ScheduleDraft};
use super::form::{EntityForm, FormDraft, FormState, Submission};
use super::notify::Notifications;

/// How an entity type refers to courses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseLink {
    /// Courses themselves
    None,
    /// May reference a course
    Optional,
    /// Must reference a course; creation needs at least one
    Required,
}

/// An entity collection that has a list view and form
pub trait Managed: Resource {
    type Draft: FormDraft<Entity = Self::Entity, Input = Self::Input>;
    const COURSE_LINK: CourseLink;
}

impl Managed for Courses {
    type Draft = CourseDraft;
    const COURSE_LINK: CourseLink = CourseLink::None;
}

impl Managed for Assignments {
    type Draft = AssignmentDraft;
    const COURSE_LINK: CourseLink = CourseLink::Required;
}

impl Managed for Schedules {
    type Draft = ScheduleDraft;
    const COURSE_LINK: CourseLink = CourseLink::Optional;
}

/// Why a view has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Entities need a course and none exists yet
    NoCourses,
    /// Nothing created yet
    NoEntities,
}

/// Interactive yes/no prompt shown before destructive actions
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// List view over one entity collection
pub struct EntityListView<R: Managed> {
    items: Vec<R::Entity>,
    courses: Vec<Course>,
    loaded: bool,
    form: EntityForm<R::Draft>,
    notifications: Notifications,
}

impl<R: Managed> Default for EntityListView<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            courses: Vec::new(),
            loaded: false,
            form: EntityForm::new(),
            notifications: Notifications::new(),
        }
    }
}

pub type CourseListView = EntityListView<Courses>;
pub type AssignmentListView = EntityListView<Assignments>;
pub type ScheduleListView = EntityListView<Schedules>;

impl<R: Managed> EntityListView<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current collection snapshot
    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    /// Reference courses (empty for the course view itself)
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn find(&self, id: &str) -> Option<&R::Entity> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether at least one load has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn form(&self) -> &EntityForm<R::Draft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntityForm<R::Draft> {
        &mut self.form
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Fetch the collection (and courses, when referenced) and replace the snapshot.
    ///
    /// Both fetches run concurrently and must both succeed; on failure the
    /// previous snapshot stays in place.
    pub async fn load(&mut self, client: &ApiClient) -> bool {
        let items_api = client.resource::<R>();
        let courses_api = client.courses();

        let result: Result<(Vec<R::Entity>, Vec<Course>), ClientError> = match R::COURSE_LINK {
            CourseLink::None => items_api.list_all().await.map(|items| (items, Vec::new())),
            CourseLink::Optional | CourseLink::Required => {
                tokio::try_join!(items_api.list_all(), courses_api.list_all())
            }
        };

        match result {
            Ok((items, courses)) => {
                tracing::debug!(kind = R::PLURAL, count = items.len(), "Loaded snapshot");
                self.items = items;
                self.courses = courses;
                self.loaded = true;
                true
            }
            Err(e) => {
                tracing::debug!(kind = R::PLURAL, error = %e, "Load failed");
                self.notifications
                    .error(format!("Failed to load {}", R::PLURAL));
                false
            }
        }
    }

    /// Empty-state guidance, `None` when there is something to list
    pub fn empty_state(&self) -> Option<EmptyState> {
        if R::COURSE_LINK == CourseLink::Required && self.courses.is_empty() {
            Some(EmptyState::NoCourses)
        } else if self.items.is_empty() {
            Some(EmptyState::NoEntities)
        } else {
            None
        }
    }

    pub fn can_create(&self) -> bool {
        R::COURSE_LINK != CourseLink::Required || !self.courses.is_empty()
    }

    /// Open the form for a new entity
    pub fn open_create(&mut self) -> bool {
        if !self.can_create() {
            self.notifications.error(format!(
                "Please add a course first before creating {}",
                R::PLURAL
            ));
            return false;
        }

        self.form.open_create(&self.courses);
        true
    }

    /// Open the form pre-filled from an entity in the snapshot
    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.find(id).cloned() {
            Some(entity) => {
                self.form.open_edit(entity);
                true
            }
            None => {
                self.notifications
                    .error(format!("{} not found", R::TITLE));
                false
            }
        }
    }

    /// Close the form; refused while a submission is in flight
    pub fn cancel_form(&mut self) -> bool {
        self.form.cancel()
    }

    /// Validate and submit the open form, then reload on success.
    ///
    /// On failure the form stays open with the entered values.
    pub async fn submit_form(&mut self, client: &ApiClient) -> bool {
        for warning in self.form.draft().map(|d| d.warnings()).unwrap_or_default() {
            tracing::warn!(kind = R::SINGULAR, %warning, "Submitting with warning");
        }

        let submission = match self.form.begin_submit() {
            Ok(submission) => submission,
            Err(e) => {
                self.notifications.error(e.to_string());
                return false;
            }
        };

        let api = client.resource::<R>();
        let (result, verb) = match &submission {
            Submission::Create(input) => (api.create(input).await.map(|_| ()), "created"),
            Submission::Update { id, input } => {
                (api.update(id, input).await.map(|_| ()), "updated")
            }
        };

        match result {
            Ok(()) => {
                self.form.finish_submit(true);
                self.notifications
                    .success(format!("{} {} successfully", R::TITLE, verb));
                self.load(client).await;
                true
            }
            Err(e) => {
                self.form.finish_submit(false);
                self.notifications.error(
                    e.detail()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Failed to save {}", R::SINGULAR)),
                );
                false
            }
        }
    }

    /// Delete after interactive confirmation, then reload.
    ///
    /// Dependents (e.g. a course's assignments) are left to the backend.
    pub async fn delete(
        &mut self,
        client: &ApiClient,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> bool {
        let prompt = format!("Are you sure you want to delete this {}?", R::SINGULAR);
        if !confirm.confirm(&prompt) {
            tracing::debug!(kind = R::SINGULAR, id, "Delete declined");
            return false;
        }

        match client.resource::<R>().delete(id).await {
            Ok(()) => {
                self.notifications
                    .success(format!("{} deleted successfully", R::TITLE));
                self.load(client).await;
                true
            }
            Err(e) => {
                tracing::debug!(kind = R::SINGULAR, id, error = %e, "Delete failed");
                self.notifications
                    .error(format!("Failed to delete {}", R::SINGULAR));
                false
            }
        }
    }

    /// Whether the form is currently editing (as opposed to creating)
    pub fn is_editing(&self) -> bool {
        matches!(self.form.state(), FormState::Editing(..))
    }
}

impl EntityListView<Assignments> {
    /// Flip an assignment's completed flag, then reload
    pub async fn toggle_complete(&mut self, client: &ApiClient, id: &str) -> bool {
        match client.assignments().toggle_complete(id).await {
            Ok(_) => {
                self.notifications.success("Assignment status updated");
                self.load(client).await;
                true
            }
            Err(e) => {
                tracing::debug!(id, error = %e, "Toggle failed");
                self.notifications.error("Failed to update assignment");
                false
            }
        }
    }
}
