//! Plain-text rendering
//!
//! Pure functions from view state to terminal output. Nothing here performs
//! I/O; the CLI prints whatever these return.

use chrono::NaiveDateTime;

use crate::client::{Assignments, Courses, Schedules};
use crate::models::{format, Assignment, ChatMessage, Course, Role, Schedule, UserProfile};
use crate::views::{
    AssignmentListView, CourseListView, DashboardSnapshot, EmptyState, Managed,
    ScheduleListView, Toast, ToastLevel,
};

const UNKNOWN_COURSE: &str = "Unknown Course";

/// Guidance shown instead of an empty table
pub fn empty_state<R: Managed>(state: EmptyState) -> String {
    match state {
        EmptyState::NoCourses => format!(
            "No courses available\nPlease add a course first before creating {}\n",
            R::PLURAL
        ),
        EmptyState::NoEntities => format!(
            "No {} yet\nGet started by adding your first {}\n",
            R::PLURAL,
            R::SINGULAR
        ),
    }
}

pub fn course_list(view: &CourseListView) -> String {
    if let Some(state) = view.empty_state() {
        return empty_state::<Courses>(state);
    }

    let mut lines = vec![
        format!("{:<26} {:<30} {:<10} {}", "ID", "Name", "Code", "Instructor"),
        "-".repeat(84),
    ];
    lines.extend(view.items().iter().map(|course| {
        format!(
            "{:<26} {:<30} {:<10} {}",
            truncate(&course.id, 26),
            truncate(&course.course_name, 30),
            course.course_code.as_deref().unwrap_or("-"),
            course.instructor.as_deref().unwrap_or("-"),
        )
    }));
    block(lines)
}

pub fn assignment_list(view: &AssignmentListView) -> String {
    if let Some(state) = view.empty_state() {
        return empty_state::<Assignments>(state);
    }

    let mut lines = vec![
        format!(
            "{:<4} {:<26} {:<28} {:<20} {:<24} {}",
            "", "ID", "Title", "Course", "Due", "Priority"
        ),
        "-".repeat(112),
    ];
    lines.extend(view.items().iter().map(|a| {
        format!(
            "{:<4} {:<26} {:<28} {:<20} {:<24} {}",
            if a.completed { "[x]" } else { "[ ]" },
            truncate(&a.id, 26),
            truncate(&a.title, 28),
            truncate(a.course_name.as_deref().unwrap_or(UNKNOWN_COURSE), 20),
            format::due_date(&a.due_date),
            a.priority.label(),
        )
    }));
    block(lines)
}

pub fn schedule_list(view: &ScheduleListView) -> String {
    if let Some(state) = view.empty_state() {
        return empty_state::<Schedules>(state);
    }

    let mut lines = vec![
        format!(
            "{:<26} {:<26} {:<34} {:<10} {}",
            "ID", "Title", "When", "Day", "Location"
        ),
        "-".repeat(110),
    ];
    lines.extend(view.items().iter().map(|s| {
        format!(
            "{:<26} {:<26} {:<34} {:<10} {}",
            truncate(&s.id, 26),
            truncate(&s.title, 26),
            format::time_span(&s.start_time, &s.end_time),
            s.day_of_week.map(|d| d.to_string()).unwrap_or_default(),
            s.location.as_deref().unwrap_or(""),
        )
    }));
    block(lines)
}

pub fn course_detail(course: &Course) -> String {
    let mut lines = vec![course.course_name.clone()];
    lines.extend(field("Code", course.course_code.as_deref()));
    lines.extend(field("Instructor", course.instructor.as_deref()));
    lines.extend(field("Description", course.description.as_deref()));
    lines.extend(field("ID", Some(&course.id)));
    block(lines)
}

pub fn assignment_detail(assignment: &Assignment) -> String {
    let due = format::due_date(&assignment.due_date);
    let status = if assignment.completed { "Completed" } else { "Pending" };

    let mut lines = vec![assignment.title.clone()];
    lines.extend(field(
        "Course",
        Some(assignment.course_name.as_deref().unwrap_or(UNKNOWN_COURSE)),
    ));
    lines.extend(field("Due", Some(&due)));
    lines.extend(field("Priority", Some(assignment.priority.label())));
    lines.extend(field("Status", Some(status)));
    lines.extend(field("Description", assignment.description.as_deref()));
    lines.extend(field("ID", Some(&assignment.id)));
    block(lines)
}

pub fn schedule_detail(schedule: &Schedule) -> String {
    let when = format::time_span(&schedule.start_time, &schedule.end_time);
    let day = schedule.day_of_week.map(|d| d.to_string());

    let mut lines = vec![schedule.title.clone()];
    lines.extend(field("When", Some(&when)));
    lines.extend(field("Day", day.as_deref()));
    lines.extend(field("Course", schedule.course_name.as_deref()));
    lines.extend(field("Location", schedule.location.as_deref()));
    lines.extend(field("Description", schedule.description.as_deref()));
    lines.extend(field("ID", Some(&schedule.id)));
    block(lines)
}

pub fn dashboard(snapshot: &DashboardSnapshot, now: &NaiveDateTime) -> String {
    let stats = &snapshot.stats;
    let mut lines = vec![
        format!("Total Courses:       {}", stats.total_courses),
        format!("Total Assignments:   {}", stats.total_assignments),
        format!("Pending Assignments: {}", stats.pending_assignments),
        format!("Upcoming Events:     {}", stats.upcoming_schedules),
        String::new(),
        "Pending Assignments".to_string(),
    ];

    if snapshot.pending.is_empty() {
        lines.push("  No pending assignments".to_string());
    }
    lines.extend(snapshot.pending.iter().map(|preview| {
        let a = &preview.assignment;
        format!(
            "  [{}] {} ({}) due {}",
            preview.urgency,
            a.title,
            a.course_name.as_deref().unwrap_or(UNKNOWN_COURSE),
            format::due_date(&a.due_date),
        )
    }));

    lines.push(String::new());
    lines.push("Upcoming Schedule".to_string());
    if snapshot.upcoming.is_empty() {
        lines.push("  No upcoming events".to_string());
    }
    lines.extend(snapshot.upcoming.iter().map(|s| {
        let when = format::schedule_time(&s.start_time, now);
        match &s.location {
            Some(location) => format!("  {} - {} @ {}", when, s.title, location),
            None => format!("  {} - {}", when, s.title),
        }
    }));
    block(lines)
}

pub fn chat_message(message: &ChatMessage) -> String {
    let who = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    format!(
        "[{}] {}: {}",
        format::clock(&message.timestamp),
        who,
        message.content
    )
}

pub fn suggestions(questions: &[&str]) -> String {
    if questions.is_empty() {
        return String::new();
    }
    let mut lines = vec!["Suggested questions:".to_string()];
    lines.extend(
        questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("  {}. {}", i + 1, q)),
    );
    block(lines)
}

pub fn toast(toast: &Toast) -> String {
    match toast.level {
        ToastLevel::Success => format!("✓ {}", toast.message),
        ToastLevel::Error => format!("✗ {}", toast.message),
    }
}

pub fn user(profile: &UserProfile) -> String {
    format!("{} <{}>", profile.full_name, profile.email)
}

/// Labelled detail line, skipped when the value is absent
fn field(label: &str, value: Option<&str>) -> Option<String> {
    value.map(|v| format!("  {:<13}{}", format!("{}:", label), v))
}

/// Newline-terminated text from a list of lines
fn block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
