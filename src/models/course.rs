use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{timestamp, Entity};

/// A course as returned by `/api/courses/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: String,
    pub course_name: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
}

impl Course {
    /// The editable fields of this course, as an update payload
    pub fn to_input(&self) -> CourseInput {
        CourseInput {
            course_name: self.course_name.clone(),
            course_code: self.course_code.clone(),
            instructor: self.instructor.clone(),
            description: self.description.clone(),
        }
    }
}

impl Entity for Course {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.course_name
    }
}

/// Create/update payload for a course
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CourseInput {
    pub course_name: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CourseInput {
    pub fn new(course_name: impl Into<String>) -> Self {
        Self {
            course_name: course_name.into(),
            ..Default::default()
        }
    }

    /// Builder method: set the course code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.course_code = Some(code.into());
        self
    }

    /// Builder method: set the instructor
    pub fn instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Builder method: set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_deserialize_minimal() {
        let course: Course =
            serde_json::from_str(r#"{"id": "c1", "course_name": "Linear Algebra"}"#).unwrap();
        assert_eq!(course.id(), "c1");
        assert_eq!(course.label(), "Linear Algebra");
        assert!(course.course_code.is_none());
        assert!(course.created_at.is_none());
    }

    #[test]
    fn test_course_to_input() {
        let course: Course = serde_json::from_str(
            r#"{"id": "c1", "course_name": "Physics", "course_code": "PHY101",
                "instructor": "Dr. Noether", "created_at": "2024-01-10T08:00:00.512000"}"#,
        )
        .unwrap();

        let input = course.to_input();
        assert_eq!(
            input,
            CourseInput::new("Physics").code("PHY101").instructor("Dr. Noether")
        );
    }
}
