//! Chat Routes
//!
//! - POST /api/chat/ - Ask the planning assistant
//!
//! The development assistant does not call a language model. It answers with
//! a summary of the user's current workload so the client flow can be driven
//! end to end.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::models::{timestamp, Assignment, ChatReply, ChatRequest, Course, Schedule};
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::{AppState, CurrentUser};
use crate::models::format;

/// POST /api/chat/
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ServerResult<Json<ChatReply>> {
    let Json(request) = payload?;
    if request.message.trim().is_empty() {
        return Err(ServerError::Validation("message: field required".to_string()));
    }

    let response = {
        let store = state.store.read().await;
        planning_summary(
            &store.list_courses(user.id()),
            &store.list_assignments(user.id()),
            &store.list_schedules(user.id()),
            timestamp::now(),
        )
    };

    tracing::debug!(user = %user.0.email, chars = request.message.len(), "Chat message answered");
    Ok(Json(ChatReply {
        response,
        timestamp: timestamp::now(),
    }))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Workload summary; assignments are expected sorted by due date
fn planning_summary(
    courses: &[Course],
    assignments: &[Assignment],
    schedules: &[Schedule],
    now: NaiveDateTime,
) -> String {
    if courses.is_empty() {
        return "You have no courses yet. Add your courses first, then your assignments, \
                and I can help you plan around their deadlines."
            .to_string();
    }

    let pending: Vec<&Assignment> = assignments.iter().filter(|a| a.is_pending()).collect();
    let overdue = pending.iter().filter(|a| a.due_date < now).count();
    let upcoming = schedules.iter().filter(|s| s.start_time > now).count();

    let mut parts = vec![format!(
        "You are taking {} with {} pending.",
        plural(courses.len(), "course"),
        plural(pending.len(), "assignment")
    )];

    if overdue > 0 {
        parts.push(format!(
            "{} overdue; tackle those first.",
            if overdue == 1 { "1 is" } else { "Several are" }
        ));
    }

    if let Some(next) = pending.iter().find(|a| a.due_date >= now) {
        parts.push(format!(
            "Next up: \"{}\" ({}) due {}.",
            next.title,
            next.course_name.as_deref().unwrap_or("Unknown Course"),
            format::due_date(&next.due_date)
        ));
    }

    parts.push(format!(
        "You have {} on your schedule.",
        plural(upcoming, "upcoming event")
    ));

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_summary_without_courses() {
        let text = planning_summary(&[], &[], &[], now());
        assert!(text.starts_with("You have no courses yet."));
    }

    #[test]
    fn test_summary_names_next_due() {
        let course = Course {
            id: "c1".to_string(),
            course_name: "History".to_string(),
            course_code: None,
            instructor: None,
            description: None,
            created_at: None,
        };
        let assignment = Assignment {
            id: "a1".to_string(),
            title: "Essay".to_string(),
            description: None,
            course_id: "c1".to_string(),
            course_name: Some("History".to_string()),
            due_date: now() + Duration::days(2),
            priority: Priority::High,
            completed: false,
            created_at: None,
        };

        let text = planning_summary(&[course], &[assignment], &[], now());
        assert!(text.contains("1 course with 1 assignment pending"));
        assert!(text.contains("Next up: \"Essay\" (History) due May 3, 2024 9:00 AM."));
        assert!(text.contains("0 upcoming events"));
    }
}
