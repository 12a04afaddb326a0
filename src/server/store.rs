//! In-memory planner store
//!
//! Holds accounts, issued tokens and every user's entities. All data lives in
//! process memory and is gone on restart. Entity queries are always scoped to
//! the owning user; another user's id reads as "not found".

use std::collections::HashMap;

use crate::models::{
    timestamp, AccessToken, Assignment, AssignmentInput, CompletionStatus, Course, CourseInput,
    NewUser, Schedule, ScheduleInput, UserProfile,
};

use super::error::{ServerError, ServerResult};

const UNKNOWN_COURSE: &str = "Unknown Course";

#[derive(Debug, Clone)]
struct Account {
    profile: UserProfile,
    // Development server only: kept as given
    password: String,
}

#[derive(Debug, Clone)]
struct Owned<T> {
    owner: String,
    item: T,
}

/// All server-side data
#[derive(Debug, Default)]
pub struct Store {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    courses: Vec<Owned<Course>>,
    assignments: Vec<Owned<Assignment>>,
    schedules: Vec<Owned<Schedule>>,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn require(value: &str, field: &str) -> ServerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(ServerError::Validation(format!("{}: field required", field)))
    } else {
        Ok(value.to_string())
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- accounts ----

    pub fn register(&mut self, user: NewUser) -> ServerResult<UserProfile> {
        let email = require(&user.email, "email")?;
        let full_name = require(&user.full_name, "full_name")?;
        if user.password.is_empty() {
            return Err(ServerError::Validation("password: field required".to_string()));
        }

        if self.accounts.values().any(|a| a.profile.email == email) {
            return Err(ServerError::BadRequest("Email already registered".to_string()));
        }

        let profile = UserProfile {
            id: new_id(),
            email,
            full_name,
        };
        self.accounts.insert(
            profile.id.clone(),
            Account {
                profile: profile.clone(),
                password: user.password,
            },
        );

        tracing::info!(email = %profile.email, "Account registered");
        Ok(profile)
    }

    /// Issue a fresh token for valid credentials
    pub fn login(&mut self, email: &str, password: &str) -> ServerResult<AccessToken> {
        let account = self
            .accounts
            .values()
            .find(|a| a.profile.email == email.trim() && a.password == password)
            .ok_or_else(|| ServerError::Unauthorized("Incorrect email or password".to_string()))?;

        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), account.profile.id.clone());

        tracing::info!(email = %account.profile.email, "Token issued");
        Ok(AccessToken {
            access_token: token,
            token_type: "bearer".to_string(),
        })
    }

    pub fn user_for_token(&self, token: &str) -> Option<UserProfile> {
        let user_id = self.tokens.get(token)?;
        self.accounts.get(user_id).map(|a| a.profile.clone())
    }

    // ---- courses ----

    pub fn list_courses(&self, owner: &str) -> Vec<Course> {
        self.courses
            .iter()
            .filter(|c| c.owner == owner)
            .map(|c| c.item.clone())
            .collect()
    }

    fn course_mut(&mut self, owner: &str, id: &str) -> ServerResult<&mut Course> {
        self.courses
            .iter_mut()
            .find(|c| c.owner == owner && c.item.id == id)
            .map(|c| &mut c.item)
            .ok_or_else(|| ServerError::not_found("Course"))
    }

    pub fn get_course(&self, owner: &str, id: &str) -> ServerResult<Course> {
        self.courses
            .iter()
            .find(|c| c.owner == owner && c.item.id == id)
            .map(|c| c.item.clone())
            .ok_or_else(|| ServerError::not_found("Course"))
    }

    fn course_name(&self, owner: &str, id: &str) -> Option<&str> {
        self.courses
            .iter()
            .find(|c| c.owner == owner && c.item.id == id)
            .map(|c| c.item.course_name.as_str())
    }

    pub fn create_course(&mut self, owner: &str, input: CourseInput) -> ServerResult<Course> {
        let course = Course {
            id: new_id(),
            course_name: require(&input.course_name, "course_name")?,
            course_code: input.course_code,
            instructor: input.instructor,
            description: input.description,
            created_at: Some(timestamp::now()),
        };

        self.courses.push(Owned {
            owner: owner.to_string(),
            item: course.clone(),
        });
        Ok(course)
    }

    pub fn update_course(
        &mut self,
        owner: &str,
        id: &str,
        input: CourseInput,
    ) -> ServerResult<Course> {
        let course_name = require(&input.course_name, "course_name")?;
        let course = self.course_mut(owner, id)?;

        course.course_name = course_name;
        course.course_code = input.course_code;
        course.instructor = input.instructor;
        course.description = input.description;
        Ok(course.clone())
    }

    /// Remove a course. Assignments and schedules referring to it are kept.
    pub fn delete_course(&mut self, owner: &str, id: &str) -> ServerResult<()> {
        let before = self.courses.len();
        self.courses
            .retain(|c| !(c.owner == owner && c.item.id == id));

        if self.courses.len() == before {
            return Err(ServerError::not_found("Course"));
        }
        Ok(())
    }

    fn check_course(&self, owner: &str, id: &str) -> ServerResult<()> {
        self.course_name(owner, id)
            .map(|_| ())
            .ok_or_else(|| ServerError::not_found("Course"))
    }

    // ---- assignments ----

    /// Fill in the display-only course name
    fn resolve_assignment(&self, owner: &str, assignment: &Assignment) -> Assignment {
        let mut assignment = assignment.clone();
        assignment.course_name = Some(
            self.course_name(owner, &assignment.course_id)
                .unwrap_or(UNKNOWN_COURSE)
                .to_string(),
        );
        assignment
    }

    /// The user's assignments, earliest due first
    pub fn list_assignments(&self, owner: &str) -> Vec<Assignment> {
        let mut assignments: Vec<Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.owner == owner)
            .map(|a| self.resolve_assignment(owner, &a.item))
            .collect();
        assignments.sort_by_key(|a| a.due_date);
        assignments
    }

    pub fn get_assignment(&self, owner: &str, id: &str) -> ServerResult<Assignment> {
        self.assignments
            .iter()
            .find(|a| a.owner == owner && a.item.id == id)
            .map(|a| self.resolve_assignment(owner, &a.item))
            .ok_or_else(|| ServerError::not_found("Assignment"))
    }

    fn assignment_mut(&mut self, owner: &str, id: &str) -> ServerResult<&mut Assignment> {
        self.assignments
            .iter_mut()
            .find(|a| a.owner == owner && a.item.id == id)
            .map(|a| &mut a.item)
            .ok_or_else(|| ServerError::not_found("Assignment"))
    }

    pub fn create_assignment(
        &mut self,
        owner: &str,
        input: AssignmentInput,
    ) -> ServerResult<Assignment> {
        let title = require(&input.title, "title")?;
        self.check_course(owner, &input.course_id)?;

        let assignment = Assignment {
            id: new_id(),
            title,
            description: input.description,
            course_id: input.course_id,
            course_name: None,
            due_date: input.due_date,
            priority: input.priority,
            completed: false,
            created_at: Some(timestamp::now()),
        };

        self.assignments.push(Owned {
            owner: owner.to_string(),
            item: assignment.clone(),
        });
        Ok(self.resolve_assignment(owner, &assignment))
    }

    /// Replace the editable fields; `completed` is left as is
    pub fn update_assignment(
        &mut self,
        owner: &str,
        id: &str,
        input: AssignmentInput,
    ) -> ServerResult<Assignment> {
        let title = require(&input.title, "title")?;
        self.check_course(owner, &input.course_id)?;

        let assignment = self.assignment_mut(owner, id)?;
        assignment.title = title;
        assignment.description = input.description;
        assignment.course_id = input.course_id;
        assignment.due_date = input.due_date;
        assignment.priority = input.priority;

        let updated = assignment.clone();
        Ok(self.resolve_assignment(owner, &updated))
    }

    pub fn toggle_assignment(&mut self, owner: &str, id: &str) -> ServerResult<CompletionStatus> {
        let assignment = self.assignment_mut(owner, id)?;
        assignment.completed = !assignment.completed;

        Ok(CompletionStatus {
            message: "Assignment status updated".to_string(),
            completed: assignment.completed,
        })
    }

    pub fn delete_assignment(&mut self, owner: &str, id: &str) -> ServerResult<()> {
        let before = self.assignments.len();
        self.assignments
            .retain(|a| !(a.owner == owner && a.item.id == id));

        if self.assignments.len() == before {
            return Err(ServerError::not_found("Assignment"));
        }
        Ok(())
    }

    // ---- schedules ----

    fn resolve_schedule(&self, owner: &str, schedule: &Schedule) -> Schedule {
        let mut schedule = schedule.clone();
        schedule.course_name = schedule
            .course_id
            .as_deref()
            .map(|id| self.course_name(owner, id).unwrap_or(UNKNOWN_COURSE).to_string());
        schedule
    }

    /// The user's schedules, earliest start first
    pub fn list_schedules(&self, owner: &str) -> Vec<Schedule> {
        let mut schedules: Vec<Schedule> = self
            .schedules
            .iter()
            .filter(|s| s.owner == owner)
            .map(|s| self.resolve_schedule(owner, &s.item))
            .collect();
        schedules.sort_by_key(|s| s.start_time);
        schedules
    }

    pub fn get_schedule(&self, owner: &str, id: &str) -> ServerResult<Schedule> {
        self.schedules
            .iter()
            .find(|s| s.owner == owner && s.item.id == id)
            .map(|s| self.resolve_schedule(owner, &s.item))
            .ok_or_else(|| ServerError::not_found("Schedule"))
    }

    fn schedule_mut(&mut self, owner: &str, id: &str) -> ServerResult<&mut Schedule> {
        self.schedules
            .iter_mut()
            .find(|s| s.owner == owner && s.item.id == id)
            .map(|s| &mut s.item)
            .ok_or_else(|| ServerError::not_found("Schedule"))
    }

    /// Start after end is stored as given
    pub fn create_schedule(&mut self, owner: &str, input: ScheduleInput) -> ServerResult<Schedule> {
        let title = require(&input.title, "title")?;
        if let Some(course_id) = &input.course_id {
            self.check_course(owner, course_id)?;
        }

        let schedule = Schedule {
            id: new_id(),
            title,
            description: input.description,
            course_id: input.course_id,
            course_name: None,
            start_time: input.start_time,
            end_time: input.end_time,
            day_of_week: input.day_of_week,
            location: input.location,
            created_at: Some(timestamp::now()),
        };

        self.schedules.push(Owned {
            owner: owner.to_string(),
            item: schedule.clone(),
        });
        Ok(self.resolve_schedule(owner, &schedule))
    }

    pub fn update_schedule(
        &mut self,
        owner: &str,
        id: &str,
        input: ScheduleInput,
    ) -> ServerResult<Schedule> {
        let title = require(&input.title, "title")?;
        if let Some(course_id) = &input.course_id {
            self.check_course(owner, course_id)?;
        }

        let schedule = self.schedule_mut(owner, id)?;
        schedule.title = title;
        schedule.description = input.description;
        schedule.course_id = input.course_id;
        schedule.start_time = input.start_time;
        schedule.end_time = input.end_time;
        schedule.day_of_week = input.day_of_week;
        schedule.location = input.location;

        let updated = schedule.clone();
        Ok(self.resolve_schedule(owner, &updated))
    }

    pub fn delete_schedule(&mut self, owner: &str, id: &str) -> ServerResult<()> {
        let before = self.schedules.len();
        self.schedules
            .retain(|s| !(s.owner == owner && s.item.id == id));

        if self.schedules.len() == before {
            return Err(ServerError::not_found("Schedule"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn store_with_user() -> (Store, String) {
        let mut store = Store::new();
        let profile = store
            .register(NewUser {
                email: "sam@example.com".to_string(),
                full_name: "Sam".to_string(),
                password: "pw".to_string(),
            })
            .unwrap();
        (store, profile.id)
    }

    fn assignment_input(course_id: &str, due: NaiveDateTime) -> AssignmentInput {
        AssignmentInput {
            title: "Problem set".to_string(),
            description: None,
            course_id: course_id.to_string(),
            due_date: due,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (mut store, _) = store_with_user();
        let err = store
            .register(NewUser {
                email: "sam@example.com".to_string(),
                full_name: "Other".to_string(),
                password: "x".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_login_and_token_lookup() {
        let (mut store, user_id) = store_with_user();
        assert!(store.login("sam@example.com", "wrong").is_err());

        let token = store.login("sam@example.com", "pw").unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(store.user_for_token(&token.access_token).unwrap().id, user_id);
        assert!(store.user_for_token("bogus").is_none());
    }

    #[test]
    fn test_assignment_needs_existing_course() {
        let (mut store, user) = store_with_user();
        let err = store
            .create_assignment(&user, assignment_input("nope", at(3, 9)))
            .unwrap_err();
        assert_eq!(err.to_string(), "Course not found");
    }

    #[test]
    fn test_update_keeps_completed_and_toggle_flips() {
        let (mut store, user) = store_with_user();
        let course = store.create_course(&user, CourseInput::new("Math")).unwrap();
        let a = store
            .create_assignment(&user, assignment_input(&course.id, at(3, 9)))
            .unwrap();
        assert!(!a.completed);
        assert_eq!(a.course_name.as_deref(), Some("Math"));

        assert!(store.toggle_assignment(&user, &a.id).unwrap().completed);
        let updated = store
            .update_assignment(&user, &a.id, assignment_input(&course.id, at(4, 9)))
            .unwrap();
        assert!(updated.completed);
        assert!(!store.toggle_assignment(&user, &a.id).unwrap().completed);
    }

    #[test]
    fn test_course_delete_orphans_assignments() {
        let (mut store, user) = store_with_user();
        let course = store.create_course(&user, CourseInput::new("Art")).unwrap();
        store
            .create_assignment(&user, assignment_input(&course.id, at(3, 9)))
            .unwrap();

        store.delete_course(&user, &course.id).unwrap();
        let listed = store.list_assignments(&user);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course_name.as_deref(), Some("Unknown Course"));
    }

    #[test]
    fn test_lists_sorted_and_scoped() {
        let (mut store, user) = store_with_user();
        let course = store.create_course(&user, CourseInput::new("Bio")).unwrap();
        store
            .create_assignment(&user, assignment_input(&course.id, at(9, 9)))
            .unwrap();
        store
            .create_assignment(&user, assignment_input(&course.id, at(2, 9)))
            .unwrap();

        let due: Vec<NaiveDateTime> = store
            .list_assignments(&user)
            .iter()
            .map(|a| a.due_date)
            .collect();
        assert_eq!(due, vec![at(2, 9), at(9, 9)]);

        assert!(store.list_assignments("someone-else").is_empty());
        assert!(store.get_course("someone-else", &course.id).is_err());
    }

    #[test]
    fn test_schedule_inverted_range_stored() {
        let (mut store, user) = store_with_user();
        let schedule = store
            .create_schedule(
                &user,
                ScheduleInput {
                    title: "Backwards".to_string(),
                    description: None,
                    course_id: None,
                    start_time: at(1, 12),
                    end_time: at(1, 12) - Duration::hours(2),
                    day_of_week: None,
                    location: None,
                },
            )
            .unwrap();

        assert!(schedule.end_time < schedule.start_time);
        assert_eq!(schedule.course_name, None);
    }
}
