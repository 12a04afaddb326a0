//! Planner domain types
//!
//! The records exchanged with the backend:
//! - `Course`: a class the student is enrolled in
//! - `Assignment`: graded work owned by a course, with a due date and priority
//! - `Schedule`: a calendar entry, optionally tied to a course
//! - `ChatMessage`: one turn of the assistant conversation (client-local only)
//!
//! Each entity has a matching `*Input` type, the payload accepted by the
//! create and update endpoints. Identifiers are opaque server-assigned strings.

mod assignment;
mod chat;
mod course;
pub mod format;
mod schedule;
pub mod timestamp;
mod user;

pub use assignment::{Assignment, AssignmentInput, CompletionStatus, Priority};
pub use chat::{ChatMessage, ChatReply, ChatRequest, Role};
pub use course::{Course, CourseInput};
pub use schedule::{DayOfWeek, Schedule, ScheduleInput};
pub use user::{AccessToken, NewUser, UserProfile};

use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A backend-persisted record managed through CRUD operations
pub trait Entity: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    /// Server-assigned identifier
    fn id(&self) -> &str;

    /// Human-readable name for listings and prompts
    fn label(&self) -> &str;
}

/// Error returned when parsing one of the enumerated fields from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {value}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}
