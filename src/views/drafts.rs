//! Form drafts for the three entity types

use crate::models::{
    Assignment, AssignmentInput, Course, CourseInput, DayOfWeek, Priority, Schedule,
    ScheduleInput,
};

use super::form::{optional, required, FormDraft, FormError};
use crate::models::format;

/// Course form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    pub course_name: String,
    pub course_code: String,
    pub instructor: String,
    pub description: String,
}

impl FormDraft for CourseDraft {
    type Entity = Course;
    type Input = CourseInput;

    fn blank(_courses: &[Course]) -> Self {
        Self::default()
    }

    fn from_entity(course: &Course) -> Self {
        Self {
            course_name: course.course_name.clone(),
            course_code: course.course_code.clone().unwrap_or_default(),
            instructor: course.instructor.clone().unwrap_or_default(),
            description: course.description.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<CourseInput, FormError> {
        Ok(CourseInput {
            course_name: required(&self.course_name, "Course name")?,
            course_code: optional(&self.course_code),
            instructor: optional(&self.instructor),
            description: optional(&self.description),
        })
    }
}

/// Assignment form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentDraft {
    pub title: String,
    pub description: String,
    pub course_id: String,
    /// `YYYY-MM-DDTHH:MM`
    pub due_date: String,
    pub priority: Priority,
}

impl FormDraft for AssignmentDraft {
    type Entity = Assignment;
    type Input = AssignmentInput;

    /// Defaults the course picker to the first course
    fn blank(courses: &[Course]) -> Self {
        Self {
            course_id: courses.first().map(|c| c.id.clone()).unwrap_or_default(),
            ..Self::default()
        }
    }

    fn from_entity(assignment: &Assignment) -> Self {
        Self {
            title: assignment.title.clone(),
            description: assignment.description.clone().unwrap_or_default(),
            course_id: assignment.course_id.clone(),
            due_date: format::to_input(&assignment.due_date),
            priority: assignment.priority,
        }
    }

    fn validate(&self) -> Result<AssignmentInput, FormError> {
        let title = required(&self.title, "Title")?;
        let course_id = required(&self.course_id, "Course")?;
        let due_date = parse_timestamp(&self.due_date, "Due date")?;

        Ok(AssignmentInput {
            title,
            description: optional(&self.description),
            course_id,
            due_date,
            priority: self.priority,
        })
    }
}

/// Schedule form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleDraft {
    pub title: String,
    pub description: String,
    /// Empty for "no course"
    pub course_id: String,
    pub start_time: String,
    pub end_time: String,
    /// Empty for "no day"
    pub day_of_week: String,
    pub location: String,
}

impl FormDraft for ScheduleDraft {
    type Entity = Schedule;
    type Input = ScheduleInput;

    fn blank(_courses: &[Course]) -> Self {
        Self::default()
    }

    fn from_entity(schedule: &Schedule) -> Self {
        Self {
            title: schedule.title.clone(),
            description: schedule.description.clone().unwrap_or_default(),
            course_id: schedule.course_id.clone().unwrap_or_default(),
            start_time: format::to_input(&schedule.start_time),
            end_time: format::to_input(&schedule.end_time),
            day_of_week: schedule
                .day_of_week
                .map(|d| d.to_string())
                .unwrap_or_default(),
            location: schedule.location.clone().unwrap_or_default(),
        }
    }

    /// Start after end is accepted; see `warnings`
    fn validate(&self) -> Result<ScheduleInput, FormError> {
        let title = required(&self.title, "Title")?;
        let start_time = parse_timestamp(&self.start_time, "Start time")?;
        let end_time = parse_timestamp(&self.end_time, "End time")?;

        let day_of_week = match optional(&self.day_of_week) {
            None => None,
            Some(day) => Some(day.parse::<DayOfWeek>().map_err(|_| FormError::Invalid {
                field: "day of week",
                value: day,
            })?),
        };

        Ok(ScheduleInput {
            title,
            description: optional(&self.description),
            course_id: optional(&self.course_id),
            start_time,
            end_time,
            day_of_week,
            location: optional(&self.location),
        })
    }

    fn warnings(&self) -> Vec<String> {
        match (
            format::parse_input(&self.start_time),
            format::parse_input(&self.end_time),
        ) {
            (Some(start), Some(end)) if end < start => {
                vec!["End time is before start time".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

fn parse_timestamp(
    value: &str,
    field: &'static str,
) -> Result<chrono::NaiveDateTime, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required(field));
    }
    format::parse_input(value).ok_or_else(|| FormError::Invalid {
        field,
        value: value.to_string(),
    })
}
