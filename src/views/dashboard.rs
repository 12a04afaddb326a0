//! Dashboard aggregator
//!
//! Fans out one read per entity collection, joins them all-or-nothing and
//! derives the summary the dashboard shows. The derivation is a pure function
//! of the three collections and the current time.

use chrono::NaiveDateTime;

use crate::client::ApiClient;
use crate::models::{timestamp, Assignment, Course, Priority, Schedule};

use super::notify::Notifications;

/// Maximum entries in each dashboard preview list
pub const PREVIEW_LIMIT: usize = 5;

/// Status badge for a pending assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    DueSoon,
    HighPriority,
    OnTrack,
}

impl Urgency {
    /// Classify an assignment; the first matching rule wins
    pub fn classify(assignment: &Assignment, now: &NaiveDateTime) -> Self {
        let due = assignment.due_date;
        if due < *now {
            Urgency::Overdue
        } else if (due - *now).num_days() <= 1 {
            Urgency::DueSoon
        } else if assignment.priority == Priority::High {
            Urgency::HighPriority
        } else {
            Urgency::OnTrack
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Overdue => "Overdue",
            Urgency::DueSoon => "Due Soon",
            Urgency::HighPriority => "High Priority",
            Urgency::OnTrack => "On Track",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_courses: usize,
    pub total_assignments: usize,
    pub pending_assignments: usize,
    pub upcoming_schedules: usize,
}

/// A pending assignment with its badge
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPreview {
    pub assignment: Assignment,
    pub urgency: Urgency,
}

/// Everything the dashboard renders, derived at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub pending: Vec<AssignmentPreview>,
    pub upcoming: Vec<Schedule>,
    pub computed_at: Option<NaiveDateTime>,
}

impl DashboardSnapshot {
    /// Derive counts and previews. Input order is preserved in the previews.
    pub fn compute(
        courses: &[Course],
        assignments: &[Assignment],
        schedules: &[Schedule],
        now: NaiveDateTime,
    ) -> Self {
        let pending: Vec<&Assignment> = assignments.iter().filter(|a| a.is_pending()).collect();
        let upcoming: Vec<&Schedule> = schedules.iter().filter(|s| s.start_time > now).collect();

        Self {
            stats: DashboardStats {
                total_courses: courses.len(),
                total_assignments: assignments.len(),
                pending_assignments: pending.len(),
                upcoming_schedules: upcoming.len(),
            },
            pending: pending
                .into_iter()
                .take(PREVIEW_LIMIT)
                .map(|a| AssignmentPreview {
                    urgency: Urgency::classify(a, &now),
                    assignment: a.clone(),
                })
                .collect(),
            upcoming: upcoming.into_iter().take(PREVIEW_LIMIT).cloned().collect(),
            computed_at: Some(now),
        }
    }
}

/// Dashboard view state
#[derive(Debug, Default)]
pub struct Dashboard {
    snapshot: Option<DashboardSnapshot>,
    notifications: Notifications,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully computed snapshot
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Fetch all three collections concurrently and recompute.
    ///
    /// Any single failure fails the whole load and keeps the previous snapshot.
    pub async fn load(&mut self, client: &ApiClient) -> bool {
        let courses_api = client.courses();
        let assignments_api = client.assignments();
        let schedules_api = client.schedules();

        let result = tokio::try_join!(
            courses_api.list_all(),
            assignments_api.list_all(),
            schedules_api.list_all()
        );

        match result {
            Ok((courses, assignments, schedules)) => {
                let snapshot =
                    DashboardSnapshot::compute(&courses, &assignments, &schedules, timestamp::now());
                tracing::debug!(
                    courses = snapshot.stats.total_courses,
                    pending = snapshot.stats.pending_assignments,
                    upcoming = snapshot.stats.upcoming_schedules,
                    "Dashboard loaded"
                );
                self.snapshot = Some(snapshot);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "Dashboard load failed");
                self.notifications.error("Failed to load dashboard data");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn assignment(id: &str, due: NaiveDateTime, priority: Priority, completed: bool) -> Assignment {
        Assignment {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            course_id: "c1".to_string(),
            course_name: Some("Physics".to_string()),
            due_date: due,
            priority,
            completed,
            created_at: None,
        }
    }

    fn schedule(id: &str, start: NaiveDateTime) -> Schedule {
        Schedule {
            id: id.to_string(),
            title: format!("Session {}", id),
            description: None,
            course_id: None,
            course_name: None,
            start_time: start,
            end_time: start + Duration::hours(1),
            day_of_week: None,
            location: None,
            created_at: None,
        }
    }

    #[test]
    fn test_overdue_wins_over_high_priority() {
        let a = assignment("a", now() - Duration::days(1), Priority::High, false);
        assert_eq!(Urgency::classify(&a, &now()), Urgency::Overdue);
    }

    #[test]
    fn test_due_within_a_day_is_due_soon() {
        let a = assignment("a", now() + Duration::hours(20), Priority::Low, false);
        assert_eq!(Urgency::classify(&a, &now()), Urgency::DueSoon);

        // 1 day 23 hours still counts as one whole day
        let b = assignment("b", now() + Duration::hours(47), Priority::Low, false);
        assert_eq!(Urgency::classify(&b, &now()), Urgency::DueSoon);
    }

    #[test]
    fn test_far_off_high_priority() {
        let a = assignment("a", now() + Duration::days(3), Priority::High, false);
        assert_eq!(Urgency::classify(&a, &now()), Urgency::HighPriority);
        assert_eq!(Urgency::HighPriority.label(), "High Priority");

        let b = assignment("b", now() + Duration::days(3), Priority::Medium, false);
        assert_eq!(Urgency::classify(&b, &now()), Urgency::OnTrack);
    }

    #[test]
    fn test_pending_count_ignores_completed() {
        let assignments = vec![
            assignment("1", now() + Duration::days(2), Priority::Low, false),
            assignment("2", now() + Duration::days(2), Priority::Low, true),
            assignment("3", now() + Duration::days(2), Priority::Low, false),
        ];

        let snapshot = DashboardSnapshot::compute(&[], &assignments, &[], now());
        assert_eq!(snapshot.stats.total_assignments, 3);
        assert_eq!(snapshot.stats.pending_assignments, 2);
        assert_eq!(snapshot.pending.len(), 2);
    }

    #[test]
    fn test_preview_limit_and_input_order() {
        let assignments: Vec<Assignment> = (0..7)
            .map(|i| {
                assignment(
                    &i.to_string(),
                    now() + Duration::days(10 - i),
                    Priority::Medium,
                    false,
                )
            })
            .collect();

        let snapshot = DashboardSnapshot::compute(&[], &assignments, &[], now());
        assert_eq!(snapshot.stats.pending_assignments, 7);
        let ids: Vec<&str> = snapshot
            .pending
            .iter()
            .map(|p| p.assignment.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_upcoming_schedules_strictly_after_now() {
        let schedules = vec![
            schedule("past", now() - Duration::hours(2)),
            schedule("exact", now()),
            schedule("soon", now() + Duration::minutes(30)),
        ];

        let snapshot = DashboardSnapshot::compute(&[], &[], &schedules, now());
        assert_eq!(snapshot.stats.upcoming_schedules, 1);
        assert_eq!(snapshot.upcoming[0].id, "soon");
    }
}
