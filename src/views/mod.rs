//! View state
//!
//! Frontend-agnostic state for each screen of the planner. A view owns its
//! collection snapshot, its form modality and its notification queue, and
//! talks to the backend only through [`crate::client::ApiClient`]. Failures
//! surface as notifications; views never return transport errors.
//!
//! - [`list`]: course, assignment and schedule lists with their forms
//! - [`dashboard`]: counts and urgency previews
//! - [`chat`]: the assistant conversation

pub mod chat;
pub mod dashboard;
pub mod drafts;
pub mod form;
pub mod list;
pub mod notify;

pub use chat::{ChatPanel, FALLBACK, GREETING, SUGGESTED_QUESTIONS};
pub use dashboard::{
    AssignmentPreview, Dashboard, DashboardSnapshot, DashboardStats, Urgency, PREVIEW_LIMIT,
};
pub use drafts::{AssignmentDraft, CourseDraft, ScheduleDraft};
pub use form::{EntityForm, FormDraft, FormError, FormState, Submission};
pub use list::{
    AssignmentListView, Confirm, CourseLink, CourseListView, EmptyState, EntityListView, Managed,
    ScheduleListView,
};
pub use notify::{Notifications, Toast, ToastLevel};
